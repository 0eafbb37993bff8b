//! This module provides a virtual filesystem (VFS) that lives in a sandbox directory on the
//! host, populated from a zip archive.
//!
//! ### Key Features:
//! - **Isolated root**: All operations are confined to the sandbox directory (`self.root`).
//! - **Single choke point**: Every user supplied path goes through the resolver, which
//!   rejects `...` segments, ascents above the root and symlinks leaving the sandbox.
//! - **Fresh reads**: Listings and metadata are read from the host on every call.
//! - **Auto‑cleanup**: The sandbox is removed on Drop (when `is_auto_clean = true`).

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::{FsBackend, PathError, Result, VfsError, utils};
use crate::vfs::archive;
use crate::vfs::resolver::{self, Target};
use crate::vfs::{DirEntry, TransferMode};

/// A virtual filesystem backed by a sandbox directory materialized from a zip archive.
///
/// ### Usage notes:
/// - Inner paths are absolute and normalized; `/` is the sandbox root.
/// - The only navigation state is `cwd`, and only a successful `cd()` changes it.
/// - Not thread‑safe; a session owns its `ArchiveFS` exclusively.
///
/// ### Example:
/// ```no_run
/// use vfs_shell::{ArchiveFS, FsBackend};
///
/// let mut fs = ArchiveFS::from_archive("fs.zip").unwrap();
/// fs.cd("docs").unwrap();
/// assert_eq!(fs.pwd(), "docs");
/// for entry in fs.ls().unwrap() {
///     println!("{entry}");
/// }
/// ```
pub struct ArchiveFS {
    root: PathBuf, // host-related absolute canonical path
    cwd: PathBuf,  // inner absolute normalized path
    started: Instant,
    is_auto_clean: bool,
}

impl ArchiveFS {
    /// Extracts `archive` into a fresh sandbox and opens a session on it.
    /// The current working directory starts at the root.
    /// By default, the `is_auto_clean` flag is set to `true`.
    pub fn from_archive<P: AsRef<Path>>(archive: P) -> Result<Self> {
        let root = archive::materialize(archive)?;
        Ok(Self {
            root,
            cwd: PathBuf::from("/"),
            started: Instant::now(),
            is_auto_clean: true,
        })
    }

    /// Changes auto-clean flag.
    /// If auto-clean flag is true the sandbox directory is removed on drop.
    pub fn set_auto_clean(&mut self, clean: bool) {
        self.is_auto_clean = clean;
    }

    fn resolve(&self, path: &str, target: Target) -> std::result::Result<PathBuf, PathError> {
        resolver::resolve(&self.root, &self.cwd, path, target)
    }

    /// Resolves an existing entry for a non-navigation operation.
    fn lookup(&self, path: &str) -> Result<PathBuf> {
        self.resolve(path, Target::Existing).map_err(|e| match e {
            PathError::NotFound(_) => VfsError::NotFound(path.to_string()),
            other => other.into(),
        })
    }
}

impl FsBackend for ArchiveFS {
    fn root(&self) -> &Path {
        self.root.as_path()
    }

    fn cwd(&self) -> &Path {
        self.cwd.as_path()
    }

    fn pwd(&self) -> String {
        utils::to_slash(&self.cwd)
    }

    /// Relative inner paths are taken from `cwd`; the result never leaves the root.
    fn to_host<P: AsRef<Path>>(&self, inner_path: P) -> PathBuf {
        let inner = utils::normalize(self.cwd.join(inner_path));
        resolver::host_path(&self.root, &inner)
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path, Target::Existing).is_ok()
    }

    fn cd(&mut self, path: &str) -> Result<()> {
        let target = self.resolve(path, Target::Directory)?;
        tracing::debug!(from = %self.cwd.display(), to = %target.display(), "cd");
        self.cwd = target;
        Ok(())
    }

    /// Entries come in host enumeration order. Nothing is cached between calls.
    fn ls(&self) -> Result<Vec<DirEntry>> {
        let host = self.to_host(&self.cwd);
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&host)? {
            let entry = entry?;
            // Links are described by themselves, never by what they point at.
            let meta = entry.metadata()?;
            entries.push(DirEntry::from_metadata(
                entry.file_name().to_string_lossy(),
                &meta,
            ));
        }
        Ok(entries)
    }

    fn read_lines(&self, name: &str) -> Result<Vec<String>> {
        let inner = self.lookup(name)?;
        let host = self.to_host(&inner);
        if !host.is_file() {
            return Err(VfsError::NotFound(name.to_string()));
        }
        let content = std::fs::read(&host)?;
        let text = String::from_utf8(content).map_err(|_| VfsError::Decode(name.to_string()))?;
        Ok(text.lines().map(str::to_string).collect())
    }

    /// An existing directory as `dest` receives `src` under its own name.
    /// Directories are copied recursively. Existing files at the destination are replaced.
    fn transfer(&mut self, src: &str, dest: &str, mode: TransferMode) -> Result<PathBuf> {
        let src_inner = self.lookup(src)?;
        if utils::is_virtual_root(&src_inner) {
            return Err(PathError::RootNotAllowed.into());
        }

        let mut dest_inner = self.resolve(dest, Target::Creatable)?;
        if self.to_host(&dest_inner).is_dir() {
            if let Some(name) = src_inner.file_name() {
                // The joined entry may itself be a link; it gets the same checks as `dest`.
                let name = name.to_string_lossy();
                dest_inner = resolver::resolve(&self.root, &dest_inner, &name, Target::Creatable)?;
            }
        }

        if dest_inner.starts_with(&src_inner) {
            return Err(PathError::IntoItself(utils::to_slash(&src_inner)).into());
        }
        if mode == TransferMode::Move && self.cwd.starts_with(&src_inner) {
            return Err(PathError::InUse(utils::to_slash(&src_inner)).into());
        }

        let (from, to) = (self.to_host(&src_inner), self.to_host(&dest_inner));
        match mode {
            TransferMode::Copy => utils::copy_on_host(&from, &to)?,
            TransferMode::Move => std::fs::rename(&from, &to)?,
        }
        tracing::debug!(?mode, src = %src_inner.display(), dest = %dest_inner.display(), "transfer");
        Ok(dest_inner)
    }

    fn uptime(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    fn chown(&self, owner: &str, name: &str) -> Result<PathBuf> {
        let inner = self.lookup(name)?;
        tracing::info!(owner, path = %inner.display(), "owner label changed");
        Ok(inner)
    }
}

impl Drop for ArchiveFS {
    fn drop(&mut self) {
        if !self.is_auto_clean {
            return;
        }
        match utils::rm_on_host(&self.root) {
            Ok(()) => tracing::info!(root = %self.root.display(), "sandbox removed"),
            Err(e) => tracing::warn!(root = %self.root.display(), error = %e, "unable to remove sandbox"),
        }
    }
}
