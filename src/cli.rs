use std::path::PathBuf;

use clap::Parser;

/// Interactive shell over a sandboxed copy of a zip archive.
#[derive(Debug, Parser)]
#[command(name = "vfs-shell", version, about)]
pub struct Args {
    /// TOML configuration file with `vfs_path` and `log_file`.
    pub config: Option<PathBuf>,

    /// Zip archive to mount, overrides `vfs_path`.
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// Action log destination, overrides `log_file`.
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Leave the extracted sandbox on disk after exit.
    #[arg(long)]
    pub keep_sandbox: bool,
}
