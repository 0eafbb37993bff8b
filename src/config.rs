//! Session configuration: which archive to mount and where the action log goes.
//!
//! ```toml
//! vfs_path = "fs.zip"
//! log_file = "session.json"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Zip archive the sandbox is populated from.
    #[serde(alias = "vfs")]
    pub vfs_path: PathBuf,
    /// Destination of the action log, overwritten at the end of the session.
    #[serde(alias = "log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read configuration {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Combines an optional configuration file with explicit overrides.
    /// Overrides win; without a file both of them are required.
    pub fn resolve(
        file: Option<&Path>,
        vfs_path: Option<PathBuf>,
        log_file: Option<PathBuf>,
    ) -> anyhow::Result<Self> {
        match (file, vfs_path, log_file) {
            (_, Some(vfs_path), Some(log_file)) => Ok(Self { vfs_path, log_file }),
            (Some(file), vfs_path, log_file) => {
                let mut config = Self::load(file)?;
                if let Some(vfs_path) = vfs_path {
                    config.vfs_path = vfs_path;
                }
                if let Some(log_file) = log_file {
                    config.log_file = log_file;
                }
                Ok(config)
            }
            (None, _, _) => Err(anyhow!(
                "no configuration: pass a config file or both --archive and --log"
            )),
        }
    }
}
