//! Inventory entries and outbound signals.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A discovered markdown file.
///
/// `relative_path` is root-relative and slash-separated on every
/// platform; `path` is the absolute location on disk. Each scan produces
/// fresh entries, they are never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownEntry {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Root-relative path, `/`-separated.
    pub relative_path: String,
}

impl MarkdownEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, relative_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            relative_path: relative_path.into(),
        }
    }
}

/// Outbound signal delivered to listening presentation-layer windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum VaultEvent {
    /// The full inventory was rebuilt after a coalesced rescan.
    #[serde(rename_all = "camelCase")]
    InventoryUpdated { entries: Vec<MarkdownEntry> },

    /// Best-effort notice that one specific markdown file changed.
    ///
    /// Advisory only: the file may no longer exist by the time a
    /// consumer reacts, and its content may be unchanged.
    #[serde(rename_all = "camelCase")]
    FileChanged { path: PathBuf },
}
