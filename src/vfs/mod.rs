pub mod archive;
mod archive_fs;
mod entry;
pub mod resolver;

pub use archive_fs::ArchiveFS;
pub use entry::{DirEntry, EntryType};

/// Whether `transfer` keeps the source in place.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransferMode {
    Copy,
    Move,
}
