mod cli;
mod signal;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vfs_shell::{ArchiveFS, Config, FsBackend, Shell};

use crate::signal::SandboxCleanupGuard;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();
    let config = Config::resolve(args.config.as_deref(), args.archive, args.log)?;

    let mut fs = ArchiveFS::from_archive(&config.vfs_path)
        .with_context(|| format!("cannot start shell on {}", config.vfs_path.display()))?;
    if args.keep_sandbox {
        fs.set_auto_clean(false);
    }
    tracing::info!(archive = %config.vfs_path.display(), log = %config.log_file.display(), "session started");

    let sandbox = (!args.keep_sandbox).then(|| fs.root().to_path_buf());
    let _cleanup = SandboxCleanupGuard::new(sandbox)?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    Shell::new(fs, config.log_file).run_loop(stdin.lock(), &mut stdout)?;
    Ok(())
}
