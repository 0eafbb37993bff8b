use std::path::{Component, Path, PathBuf};

/// Resolves `.` and `..` components lexically and removes trailing separators.
/// `..` never climbs above the first component: `/..` stays `/`.
pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(parent) = result.parent() {
                    result = parent.to_path_buf();
                }
            }
            _ => result.push(component),
        }
    }
    result
}

pub fn is_virtual_root<P: AsRef<Path>>(path: P) -> bool {
    let mut components = path.as_ref().components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::RootDir), None)
    )
}

/// Renders an inner path relative to the virtual root with `/` separators,
/// whatever the host separator is. The root itself is rendered as `.`.
pub fn to_slash<P: AsRef<Path>>(inner_path: P) -> String {
    let parts: Vec<_> = inner_path
        .as_ref()
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Removes a file or a whole directory tree on the host.
pub fn rm_on_host<P: AsRef<Path>>(host_path: P) -> std::io::Result<()> {
    let host_path = host_path.as_ref();
    if std::fs::symlink_metadata(host_path)?.is_dir() {
        std::fs::remove_dir_all(host_path)
    } else {
        std::fs::remove_file(host_path)
    }
}

/// Copies a file, or a directory recursively, on the host.
/// Symbolic links inside a copied tree are skipped, so a copy never pulls in data from
/// outside the tree.
pub fn copy_on_host<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dest: Q) -> std::io::Result<()> {
    let (src, dest) = (src.as_ref(), dest.as_ref());
    let meta = std::fs::symlink_metadata(src)?;
    if meta.is_dir() {
        std::fs::create_dir(dest)?;
        for entry in std::fs::read_dir(src)? {
            let entry = entry?;
            if entry.file_type()?.is_symlink() {
                tracing::warn!(path = %entry.path().display(), "skipping symbolic link");
                continue;
            }
            copy_on_host(entry.path(), dest.join(entry.file_name()))?;
        }
    } else {
        std::fs::copy(src, dest)?;
    }
    Ok(())
}
