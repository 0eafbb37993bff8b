use std::fmt;
use std::fs::Metadata;

use chrono::{DateTime, Local};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
    /// A symbolic link, never followed for listing.
    Link,
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryType::File => "File",
            EntryType::Directory => "Directory",
            EntryType::Link => "Link",
        };
        f.pad(label)
    }
}

/// A snapshot of one directory child, taken when the directory is listed.
#[derive(Debug, Clone, PartialEq)]
pub struct DirEntry {
    name: String,
    entry_type: EntryType,
    size: u64,
    modified: Option<DateTime<Local>>,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, entry_type: EntryType, size: u64) -> DirEntry {
        DirEntry {
            name: name.into(),
            entry_type,
            size,
            modified: None,
        }
    }

    pub(crate) fn from_metadata(name: impl Into<String>, meta: &Metadata) -> DirEntry {
        let entry_type = if meta.file_type().is_symlink() {
            EntryType::Link
        } else if meta.is_dir() {
            EntryType::Directory
        } else {
            EntryType::File
        };
        DirEntry {
            name: name.into(),
            entry_type,
            size: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Local>::from),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn modified(&self) -> Option<DateTime<Local>> {
        self.modified
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}

/// `Directory  4096       2024-05-01 12:00:00 docs`
impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modified = match self.modified {
            Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "-".repeat(19),
        };
        write!(
            f,
            "{:<10} {:<10} {} {}",
            self.entry_type, self.size, modified, self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_columns() {
        let entry = DirEntry::new("notes.txt", EntryType::File, 42);
        let line = entry.to_string();
        assert!(line.starts_with("File       42         "));
        assert!(line.ends_with(" notes.txt"));
    }

    #[test]
    fn test_kind_predicates() {
        let dir = DirEntry::new("docs", EntryType::Directory, 0);
        assert!(dir.is_dir());
        assert!(!dir.is_file());
        assert_eq!(dir.name(), "docs");
        assert_eq!(dir.modified(), None);
    }
}
