//! Path containment boundary.
//!
//! Every operation that accepts an externally supplied path must pass it
//! through [`is_inside`] before touching the filesystem. The check is
//! pure: no stat calls, no symlink resolution, so it can run on paths
//! that no longer exist.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` segments lexically, without touching the disk.
///
/// A `..` at the filesystem root clamps (lexically, `/..` is `/`); on a
/// relative path, leading `..` segments that cannot be popped are kept.
#[must_use]
pub fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Check whether `candidate` is `root` itself or contained within it.
///
/// Both paths must be absolute; a relative candidate is rejected (the
/// guard cannot resolve it without ambient state, so it fails closed).
/// Containment is component-wise, so a sibling directory sharing a name
/// prefix (`/a/bcd` under root `/a/bc`) is rejected, as is a candidate
/// under a different prefix or drive.
#[must_use]
pub fn is_inside(root: &Path, candidate: &Path) -> bool {
    if !root.is_absolute() || !candidate.is_absolute() {
        return false;
    }
    let root = normalize_lexical(root);
    let candidate = normalize_lexical(candidate);
    candidate.starts_with(&root)
}
