//! An interactive shell over a sandboxed virtual file system (VFS).
//!
//! ### Overview
//!
//! `vfs-shell` extracts a zip archive into a private sandbox directory and lets a user walk
//! it with a handful of shell verbs (`ls`, `cd`, `pwd`, `head`, `cp`, `mv`, `chown`,
//! `uptime`, `exit`). Every command and its result are kept in an action log that is written
//! once, when the session ends.
//!
//! **Key ideas**:
//! - **Containment**: Every user supplied path goes through one resolver; nothing can reach
//!   above the sandbox root, `...` segments are refused outright.
//! - **Abstraction**: The shell talks to the `FsBackend` trait; `ArchiveFS` is the archive
//!   backed implementation.
//! - **Cleanup**: The sandbox is removed when the `ArchiveFS` is dropped.
//! - **Reported errors**: Bad paths, missing files and unreadable content become messages,
//!   only an unreadable archive ends the program.

pub mod action_log;
pub mod config;
mod core;
pub mod shell;
mod vfs;

pub use action_log::{ActionLog, LogEntry};
pub use config::Config;
pub use crate::core::{FsBackend, PathError, Result, VfsError, utils};
pub use shell::{Command, Shell};
pub use vfs::resolver::{self, Target};
pub use vfs::{ArchiveFS, DirEntry, EntryType, TransferMode, archive};
