//! Materializes a zip archive into a fresh sandbox directory on the host.

use std::fs::File;
use std::path::{Path, PathBuf};

use tempdir::TempDir;
use zip::ZipArchive;
use zip::read::ZipFile;

use crate::core::{Result, VfsError};

const SANDBOX_PREFIX: &str = "vfs-shell";

/// Extracts `archive` into a new, uniquely named directory under the system temp directory
/// and returns the canonical path of that directory.
///
/// Extraction is all-or-nothing: on any failure the directory is removed again and
/// `VfsError::Archive` is returned.
pub fn materialize<P: AsRef<Path>>(archive: P) -> Result<PathBuf> {
    let archive = archive.as_ref();
    let sandbox = TempDir::new(SANDBOX_PREFIX)
        .map_err(|e| VfsError::archive(archive, format!("cannot create sandbox: {e}")))?;

    // `sandbox` is dropped (and removed) on every early return below.
    let count = extract(archive, sandbox.path())?;
    let root = sandbox
        .path()
        .canonicalize()
        .map_err(|e| VfsError::archive(archive, e))?;

    let _ = sandbox.into_path();
    tracing::info!(archive = %archive.display(), root = %root.display(), entries = count, "archive materialized");
    Ok(root)
}

/// Extracts every entry of `archive` below `dest`. Returns the number of entries written.
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(archive: P, dest: Q) -> Result<usize> {
    let (archive, dest) = (archive.as_ref(), dest.as_ref());

    let file = File::open(archive).map_err(|e| VfsError::archive(archive, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| VfsError::archive(archive, e))?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| VfsError::archive(archive, e))?;
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            return Err(VfsError::archive(
                archive,
                format!("unsafe entry name: {}", entry.name()),
            ));
        };
        let outpath = dest.join(&relative);
        tracing::debug!(entry = %relative.display(), "extracting");

        write_entry(&mut entry, &outpath)
            .map_err(|e| VfsError::archive(archive, format!("{}: {e}", relative.display())))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            // Directories keep their default mode so the sandbox stays traversable.
            if !entry.is_dir() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode)).ok();
            }
        }
    }

    Ok(zip.len())
}

fn write_entry(entry: &mut ZipFile<'_>, outpath: &Path) -> std::io::Result<()> {
    if entry.is_dir() {
        std::fs::create_dir_all(outpath)?;
    } else {
        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut outfile = File::create(outpath)?;
        std::io::copy(entry, &mut outfile)?;
    }
    Ok(())
}
