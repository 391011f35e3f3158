//! The vault: single-root filesystem access for the presentation layer.
//!
//! This module provides:
//! - Root management with a 1:1 watch session (close-before-replace)
//! - Markdown inventory scanning
//! - Path-containment checks for every externally supplied path
//! - Outbound signals over a broadcast channel

pub mod boundary;
pub mod events;
pub mod scanner;
pub mod tree;
mod watcher;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use boundary::{is_inside, normalize_lexical};
use watcher::{SharedRoot, WatchSession};

pub use events::{MarkdownEntry, VaultEvent};
pub use tree::{build_tree, TreeNode};
pub use watcher::DEBOUNCE_DURATION;

/// Capacity of the outbound signal channel. Slow windows lag rather
/// than block the core.
const SIGNAL_CAPACITY: usize = 64;

/// The privileged core context.
///
/// Owns the single current root, the watch session bound to it, and the
/// signal channel. All mutation of root and session goes through this
/// type; everything else reads snapshots.
pub struct Vault {
    root: SharedRoot,
    session: Option<WatchSession>,
    signals: broadcast::Sender<VaultEvent>,
    debounce: std::time::Duration,
}

impl Vault {
    /// Create a vault with no root set.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let (signals, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self {
            root: Arc::new(RwLock::new(None)),
            session: None,
            signals,
            debounce: config.debounce(),
        }
    }

    /// Subscribe to outbound signals. Any number of windows may listen.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<VaultEvent> {
        self.signals.subscribe()
    }

    /// The current root, if one is set.
    #[must_use]
    pub fn root(&self) -> Option<PathBuf> {
        self.root.read().clone()
    }

    /// Whether a live watch session exists. `false` means manual-refresh
    /// mode: the inventory only updates via [`Self::scan_current_root`].
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.session.as_ref().is_some_and(WatchSession::is_alive)
    }

    /// Replace the root wholesale and restart the watch.
    ///
    /// The path must be absolute; it is normalized lexically and
    /// installed even if the directory does not currently exist
    /// (existence surfaces at the first scan). If the watch cannot be
    /// established the vault stays in manual-refresh mode; that is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the path is not absolute.
    pub async fn set_root(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if !path.is_absolute() {
            return Err(Error::invalid_input(format!(
                "root must be an absolute path, got '{}'",
                path.display()
            )));
        }
        let normalized = normalize_lexical(path);

        // Closing the old watch strictly before installing the new root
        // keeps a stale session from emitting against the wrong root.
        if let Some(session) = self.session.take() {
            session.close().await;
        }

        *self.root.write() = Some(normalized.clone());
        tracing::info!(root = %normalized.display(), "Root installed");

        match WatchSession::start(
            normalized.clone(),
            Arc::clone(&self.root),
            self.signals.clone(),
            self.debounce,
        ) {
            Ok(session) => self.session = Some(session),
            Err(e) => {
                tracing::warn!(
                    root = %normalized.display(),
                    error = %e,
                    "Could not establish watch, falling back to manual refresh"
                );
            }
        }

        Ok(())
    }

    /// Install the first startup candidate that is an absolute path to
    /// an existing directory. Relative candidates are ignored on
    /// purpose (dev-time arguments often carry them).
    ///
    /// Returns the installed root, or `None` with no side effects.
    ///
    /// # Errors
    ///
    /// Propagates errors from installing the root.
    pub async fn initial_root<I, P>(&mut self, candidates: I) -> Result<Option<PathBuf>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for candidate in candidates {
            let candidate = candidate.as_ref();
            if !candidate.is_absolute() {
                continue;
            }
            if let Ok(meta) = tokio::fs::metadata(candidate).await {
                if meta.is_dir() {
                    self.set_root(candidate).await?;
                    return Ok(self.root());
                }
            }
        }
        Ok(None)
    }

    /// Scan the current root for markdown files.
    ///
    /// # Errors
    ///
    /// Returns `NoRootSet` if no root is installed.
    pub async fn scan_current_root(&self) -> Result<Vec<MarkdownEntry>> {
        let root = self.root().ok_or(Error::NoRootSet)?;
        Ok(scanner::scan_async(root).await)
    }

    /// Read a file as text. Relative paths resolve against the root;
    /// every path is checked against the containment boundary first.
    ///
    /// # Errors
    ///
    /// Returns `NoRootSet` without a root, `AccessDenied` if the
    /// resolved path escapes it, and `Io` if the read itself fails
    /// (e.g. the file was deleted between scan and read).
    pub async fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::invalid_input("empty path"));
        }
        let root = self.root().ok_or(Error::NoRootSet)?;

        let resolved = if path.is_absolute() {
            normalize_lexical(path)
        } else {
            normalize_lexical(&root.join(path))
        };

        if !is_inside(&root, &resolved) {
            return Err(Error::access_denied(resolved.display().to_string()));
        }

        Ok(tokio::fs::read_to_string(&resolved).await?)
    }

    /// Resolve a dropped path or `file://` URI and install a root from
    /// it: a directory becomes the root, a file's parent becomes the
    /// root, anything else resolves to `None` without side effects.
    ///
    /// # Errors
    ///
    /// Propagates errors from installing the root.
    pub async fn resolve_dropped_path(&mut self, raw: &str) -> Result<Option<PathBuf>> {
        if raw.is_empty() {
            return Ok(None);
        }

        let candidate: PathBuf = if raw.starts_with("file://") {
            match Url::parse(raw).ok().and_then(|u| u.to_file_path().ok()) {
                Some(path) => path,
                None => return Ok(None),
            }
        } else {
            PathBuf::from(raw)
        };

        if !candidate.is_absolute() {
            return Ok(None);
        }

        let Ok(meta) = tokio::fs::metadata(&candidate).await else {
            return Ok(None);
        };

        if meta.is_dir() {
            self.set_root(&candidate).await?;
            return Ok(self.root());
        }
        if meta.is_file() {
            if let Some(parent) = candidate.parent() {
                self.set_root(parent).await?;
                return Ok(self.root());
            }
        }
        Ok(None)
    }

    /// Close the watch session and cancel any pending rescan timer.
    /// The root value itself stays installed.
    pub async fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            session.close().await;
        }
    }
}
