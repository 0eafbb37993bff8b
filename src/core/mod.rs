mod error;
pub mod utils;

use std::path::{Path, PathBuf};

use crate::vfs::{DirEntry, TransferMode};

pub use error::{PathError, VfsError};

pub type Result<T> = std::result::Result<T, VfsError>;

/// Operations of a sandboxed file system session.
///
/// Paths accepted by the methods are user input: relative to `cwd()` unless they start
/// with a separator, in which case they are anchored at the virtual root. Every one of
/// them is resolved and containment-checked before the host file system is touched.
pub trait FsBackend {
    /// Returns root path related to the host file system.
    fn root(&self) -> &Path;

    /// Returns current working directory as an inner absolute path (`/`, `/docs`, ...).
    fn cwd(&self) -> &Path;

    /// Returns the current working directory relative to the root, always `/`-separated.
    /// At the root this is `.`.
    fn pwd(&self) -> String;

    /// Returns the path on the host system that matches the specified inner path.
    fn to_host<P: AsRef<Path>>(&self, inner_path: P) -> PathBuf;

    /// Checks if `path` resolves to an existing entry.
    fn exists(&self, path: &str) -> bool;

    /// Changes the current working directory.
    /// On error the current working directory is left unchanged.
    fn cd(&mut self, path: &str) -> Result<()>;

    /// Lists the immediate children of the current working directory.
    fn ls(&self) -> Result<Vec<DirEntry>>;

    /// Reads a text file and returns its lines without line terminators.
    fn read_lines(&self, name: &str) -> Result<Vec<String>>;

    /// Copies or moves `src` to `dest`. Returns the inner path of the created entry.
    fn transfer(&mut self, src: &str, dest: &str, mode: TransferMode) -> Result<PathBuf>;

    /// Whole seconds since the session started.
    fn uptime(&self) -> u64;

    /// Cosmetic owner change: only checks that `name` exists.
    fn chown(&self, owner: &str, name: &str) -> Result<PathBuf>;
}
