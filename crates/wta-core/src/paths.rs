//! Request path resolution.

use std::path::{Component, Path, PathBuf};

/// Join a request-supplied relative path onto `root`.
///
/// Returns `None` if the path tries to leave `root` (`..`, an absolute
/// path, or a drive prefix). `.` components are dropped.
pub fn resolve_within(root: &Path, relative: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}
