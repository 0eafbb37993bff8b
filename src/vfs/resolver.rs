//! Maps user supplied paths onto inner sandbox paths.
//!
//! Inner paths are absolute and normalized (`/`, `/dir1`, `/dir1/notes.txt`). The host path
//! of an inner path is the sandbox root joined with the inner path stripped of its leading
//! `/`. Resolution never mutates anything; callers commit the result.

use std::path::{Path, PathBuf};

use crate::core::PathError;
use crate::core::utils;

/// What the last segment of a path has to point at.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Target {
    /// An existing directory (`cd`).
    Directory,
    /// Any existing entry (read, chown, copy/move source).
    Existing,
    /// An entry that may not exist yet; its parent must (copy/move destination).
    Creatable,
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Resolves `input` against `cwd` inside the sandbox rooted at host path `root`.
///
/// `root` must be canonical. Every segment is syntax checked before the host file system
/// is consulted, so a `...` segment is rejected even if a matching entry exists.
pub fn resolve(root: &Path, cwd: &Path, input: &str, target: Target) -> Result<PathBuf, PathError> {
    let segments: Vec<&str> = input.split(is_separator).filter(|s| !s.is_empty()).collect();

    if let Some(bad) = segments.iter().find(|s| s.contains("...")) {
        return Err(PathError::InvalidSegment(bad.to_string()));
    }

    let mut inner = if input.starts_with(is_separator) {
        PathBuf::from("/")
    } else {
        cwd.to_path_buf()
    };

    let last = segments.len().saturating_sub(1);
    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            "." => {}
            ".." => {
                if utils::is_virtual_root(&inner) {
                    return Err(PathError::AlreadyAtRoot);
                }
                inner.pop();
            }
            name => {
                inner.push(name);
                let host = host_path(root, &inner);
                let requirement = if i == last { target } else { Target::Directory };
                check(root, &host, &inner, requirement)?;
            }
        }
    }

    // Ascents can end on a directory that was never checked in this call (for example
    // the `cwd` itself after `x/..`); confirm the final directory for navigation.
    if target == Target::Directory {
        check(root, &host_path(root, &inner), &inner, Target::Directory)?;
    }

    tracing::debug!(input, resolved = %inner.display(), "path resolved");
    Ok(inner)
}

/// Host path of an already resolved inner path.
pub fn host_path(root: &Path, inner: &Path) -> PathBuf {
    match inner.strip_prefix("/") {
        Ok(relative) => root.join(relative),
        Err(_) => root.join(inner),
    }
}

fn check(root: &Path, host: &Path, inner: &Path, requirement: Target) -> Result<(), PathError> {
    let shown = || utils::to_slash(inner);

    let meta = match std::fs::symlink_metadata(host) {
        Ok(meta) => meta,
        Err(_) if requirement == Target::Creatable => return Ok(()),
        Err(_) => return Err(PathError::NotFound(shown())),
    };

    if meta.file_type().is_symlink() {
        let real = host.canonicalize().map_err(|_| PathError::NotFound(shown()))?;
        if !real.starts_with(root) {
            return Err(PathError::OutsideRoot(shown()));
        }
    }

    if requirement == Target::Directory && !host.is_dir() {
        return Err(PathError::NotADirectory(shown()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn setup_tree() -> (TempDir, PathBuf) {
        let tmp = TempDir::new("resolver_test").unwrap();
        let root = tmp.path().canonicalize().unwrap();
        std::fs::create_dir_all(root.join("dir1/sub")).unwrap();
        std::fs::write(root.join("test_file.txt"), "Test content").unwrap();
        std::fs::write(root.join("dir1/test_file2.txt"), "More").unwrap();
        (tmp, root)
    }

    mod navigation {
        use super::*;

        #[test]
        fn test_descend_and_ascend() {
            let (_tmp, root) = setup_tree();
            let cwd = Path::new("/");

            let dir1 = resolve(&root, cwd, "dir1", Target::Directory).unwrap();
            assert_eq!(dir1, PathBuf::from("/dir1"));

            let back = resolve(&root, &dir1, "..", Target::Directory).unwrap();
            assert_eq!(back, PathBuf::from("/"));

            let nested = resolve(&root, cwd, "dir1/./sub", Target::Directory).unwrap();
            assert_eq!(nested, PathBuf::from("/dir1/sub"));

            let up_two = resolve(&root, &nested, "../..", Target::Directory).unwrap();
            assert_eq!(up_two, PathBuf::from("/"));
        }

        #[test]
        fn test_dot_and_empty_input_stay_put() {
            let (_tmp, root) = setup_tree();
            let cwd = Path::new("/dir1");
            assert_eq!(resolve(&root, cwd, ".", Target::Directory).unwrap(), cwd);
            assert_eq!(resolve(&root, cwd, "", Target::Directory).unwrap(), cwd);
            assert_eq!(resolve(&root, cwd, "./", Target::Directory).unwrap(), cwd);
        }

        #[test]
        fn test_leading_separator_anchors_at_root() {
            let (_tmp, root) = setup_tree();
            let cwd = Path::new("/dir1/sub");
            let resolved = resolve(&root, cwd, "/dir1", Target::Directory).unwrap();
            assert_eq!(resolved, PathBuf::from("/dir1"));
        }

        #[test]
        fn test_backslash_is_a_separator() {
            let (_tmp, root) = setup_tree();
            let resolved = resolve(&root, Path::new("/"), "dir1\\sub", Target::Directory).unwrap();
            assert_eq!(resolved, PathBuf::from("/dir1/sub"));
        }
    }

    mod refusals {
        use super::*;

        #[test]
        fn test_parent_of_root() {
            let (_tmp, root) = setup_tree();
            let result = resolve(&root, Path::new("/"), "..", Target::Directory);
            assert_eq!(result, Err(PathError::AlreadyAtRoot));

            let result = resolve(&root, Path::new("/"), "dir1/../..", Target::Directory);
            assert_eq!(result, Err(PathError::AlreadyAtRoot));
        }

        #[test]
        fn test_three_dots_rejected_before_lookup() {
            let (_tmp, root) = setup_tree();
            // An entry with that name exists, the segment is still refused.
            std::fs::create_dir(root.join("a...b")).unwrap();

            for input in ["...", "a...b", "dir1/....", "..../dir1", "dir1/missing/..."] {
                let result = resolve(&root, Path::new("/"), input, Target::Directory);
                assert!(
                    matches!(result, Err(PathError::InvalidSegment(_))),
                    "{input} should be rejected, got {result:?}"
                );
            }
        }

        #[test]
        fn test_missing_and_wrong_kind() {
            let (_tmp, root) = setup_tree();
            let cwd = Path::new("/");

            let result = resolve(&root, cwd, "invalid_dir", Target::Directory);
            assert_eq!(result, Err(PathError::NotFound("invalid_dir".into())));

            let result = resolve(&root, cwd, "test_file.txt", Target::Directory);
            assert_eq!(result, Err(PathError::NotADirectory("test_file.txt".into())));

            let result = resolve(&root, cwd, "test_file.txt/x", Target::Existing);
            assert_eq!(result, Err(PathError::NotADirectory("test_file.txt".into())));
        }

        #[cfg(unix)]
        #[test]
        fn test_symlink_leaving_sandbox() {
            let (_tmp, root) = setup_tree();
            let outside = TempDir::new("resolver_outside").unwrap();
            std::os::unix::fs::symlink(outside.path(), root.join("escape")).unwrap();

            let result = resolve(&root, Path::new("/"), "escape", Target::Directory);
            assert_eq!(result, Err(PathError::OutsideRoot("escape".into())));
        }

        #[cfg(unix)]
        #[test]
        fn test_creatable_link_leaving_sandbox() {
            let (_tmp, root) = setup_tree();
            let outside = TempDir::new("resolver_outside").unwrap();
            let victim = outside.path().join("victim.txt");
            std::fs::write(&victim, "untouched").unwrap();
            std::os::unix::fs::symlink(&victim, root.join("dir1/copy.txt")).unwrap();

            let result = resolve(&root, Path::new("/dir1"), "copy.txt", Target::Creatable);
            assert_eq!(result, Err(PathError::OutsideRoot("dir1/copy.txt".into())));
        }
    }

    mod targets {
        use super::*;

        #[test]
        fn test_existing_accepts_files_and_dirs() {
            let (_tmp, root) = setup_tree();
            let cwd = Path::new("/dir1");
            assert_eq!(
                resolve(&root, cwd, "test_file2.txt", Target::Existing).unwrap(),
                PathBuf::from("/dir1/test_file2.txt")
            );
            assert_eq!(
                resolve(&root, cwd, "sub", Target::Existing).unwrap(),
                PathBuf::from("/dir1/sub")
            );
            assert!(resolve(&root, cwd, "nope.txt", Target::Existing).is_err());
        }

        #[test]
        fn test_creatable_requires_parent() {
            let (_tmp, root) = setup_tree();
            let cwd = Path::new("/");
            assert_eq!(
                resolve(&root, cwd, "dir1/new.txt", Target::Creatable).unwrap(),
                PathBuf::from("/dir1/new.txt")
            );
            assert_eq!(
                resolve(&root, cwd, "nowhere/new.txt", Target::Creatable),
                Err(PathError::NotFound("nowhere".into()))
            );
        }
    }

    #[test]
    fn test_host_path() {
        let root = Path::new("/tmp/sandbox");
        assert_eq!(host_path(root, Path::new("/")), PathBuf::from("/tmp/sandbox"));
        assert_eq!(
            host_path(root, Path::new("/dir1/a.txt")),
            PathBuf::from("/tmp/sandbox/dir1/a.txt")
        );
    }
}
