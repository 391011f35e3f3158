//! Markdown inventory scanner.
//!
//! Walks the root directory tree and produces a flat inventory of
//! markdown files. Every change triggers a full re-walk; there is no
//! incremental variant.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::events::MarkdownEntry;

/// Directory names that are never descended into, even if they contain
/// markdown files. Fixed by design, not configurable.
pub const SKIP_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "out", "target"];

/// Recognized markdown extensions (matched case-insensitively against
/// the substring after the last `.` in the file name).
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];

/// Check whether a file name carries a recognized markdown extension.
///
/// Files with no `.` in their name are never markdown.
#[must_use]
pub fn is_markdown_name(name: &str) -> bool {
    name.rfind('.').is_some_and(|dot| {
        let ext = &name[dot + 1..];
        MARKDOWN_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    })
}

/// Check whether a path's file name carries a recognized markdown extension.
#[must_use]
pub fn is_markdown_path(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .is_some_and(|name| is_markdown_name(&name))
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    // depth 0 is the root itself; a root named like a skip dir still scans.
    entry.file_type().is_dir()
        && entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

/// Scan `root` for markdown files.
///
/// Symbolic links are not followed, which also bounds link cycles.
/// Unreadable directories are skipped rather than aborting the walk, so
/// the returned inventory may be partial. Ordering is walk order and
/// carries no guarantee.
#[must_use]
pub fn scan(root: &Path) -> Vec<MarkdownEntry> {
    let mut entries = Vec::new();
    let mut errors = 0u64;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_skipped_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable entry");
                errors += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if !is_markdown_name(&entry.file_name().to_string_lossy()) {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative_path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        entries.push(MarkdownEntry::new(entry.path(), relative_path));
    }

    tracing::info!(
        root = %root.display(),
        found = entries.len(),
        errors,
        "Markdown scan complete"
    );

    entries
}

/// Async wrapper running [`scan`] on the blocking pool.
pub async fn scan_async(root: PathBuf) -> Vec<MarkdownEntry> {
    match tokio::task::spawn_blocking(move || scan(&root)).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Scan task failed");
            Vec::new()
        }
    }
}
