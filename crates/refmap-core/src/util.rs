//! Path utilities.
//!
//! Provides lexical path normalization used by the mapping store to index
//! local paths consistently. Normalization is purely textual: it never
//! touches the filesystem, so paths that do not exist normalize the same
//! way as paths that do.

use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically.
///
/// Performs the following transformations without touching the filesystem:
///
/// 1. Removes `.` components
/// 2. Resolves `..` against preceding normal components
/// 3. Preserves leading `..` components that cannot be resolved
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use refmap_core::util::normalize_path;
///
/// assert_eq!(normalize_path(Path::new("/a/./b/../c")), Path::new("/a/c").to_path_buf());
/// assert_eq!(normalize_path(Path::new("a/b/../../..")), Path::new("..").to_path_buf());
/// assert_eq!(normalize_path(Path::new("./docs/post.md")), Path::new("docs/post.md").to_path_buf());
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut depth: usize = 0;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    out.pop();
                    depth -= 1;
                } else if !has_root(&out) {
                    // Leading `..` on a relative path is preserved
                    out.push("..");
                }
                // `..` at the root of an absolute path is dropped
            }
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

fn has_root(path: &Path) -> bool {
    path.components()
        .next()
        .is_some_and(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_cur_dir() {
        assert_eq!(normalize_path(Path::new("./a/./b")), PathBuf::from("a/b"));
    }

    #[test]
    fn test_resolves_parent_dir() {
        assert_eq!(normalize_path(Path::new("a/b/../c")), PathBuf::from("a/c"));
    }

    #[test]
    fn test_parent_past_absolute_root_dropped() {
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_leading_parent_preserved_for_relative() {
        assert_eq!(normalize_path(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_empty_result_is_dot() {
        assert_eq!(normalize_path(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(normalize_path(Path::new(".")), PathBuf::from("."));
    }

    #[test]
    fn test_absolute_unchanged() {
        assert_eq!(
            normalize_path(Path::new("/var/www/post.html")),
            PathBuf::from("/var/www/post.html")
        );
    }
}
