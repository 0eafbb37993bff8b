use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the virtual file system.
///
/// Everything except [`VfsError::Archive`] is recoverable: the shell reports the message and
/// keeps the session running.
#[derive(Debug, Error)]
pub enum VfsError {
    #[error("cannot materialize archive {}: {reason}", .archive.display())]
    Archive { archive: PathBuf, reason: String },

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("{0}: No such file or directory")]
    NotFound(String),

    #[error("{0}: unsupported characters, not a UTF-8 text file")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VfsError {
    pub(crate) fn archive<P: Into<PathBuf>, R: ToString>(archive: P, reason: R) -> Self {
        VfsError::Archive {
            archive: archive.into(),
            reason: reason.to_string(),
        }
    }
}

/// Reasons a user supplied path is refused by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("already at root")]
    AlreadyAtRoot,

    #[error("invalid path segment: {0}")]
    InvalidSegment(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("path leaves the sandbox: {0}")]
    OutsideRoot(String),

    #[error("the root directory cannot be copied or moved")]
    RootNotAllowed,

    #[error("cannot place {0} inside itself")]
    IntoItself(String),

    #[error("{0} contains the current directory")]
    InUse(String),
}
