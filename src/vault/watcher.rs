//! Filesystem change watching using notify-rs.
//!
//! One watch session is bound to one root. Raw notification events are
//! forwarded from the notify callback thread into a tokio channel; a
//! spawned task runs a debounce state machine over them (Idle, or
//! Pending with a deadline). Every event re-arms the deadline and may
//! immediately emit a targeted file-changed signal; when the deadline
//! expires with no further events, exactly one rescan of the current
//! root runs and the resulting inventory is broadcast.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::RwLock;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use super::boundary::{is_inside, normalize_lexical};
use super::events::VaultEvent;
use super::scanner;
use crate::error::WatchError;

/// Default debounce window for coalesced rescans.
pub const DEBOUNCE_DURATION: Duration = Duration::from_millis(500);

/// Shared handle to the current root, written only by the vault.
pub(crate) type SharedRoot = Arc<RwLock<Option<PathBuf>>>;

/// An active watch bound to one root directory.
pub(crate) struct WatchSession {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl WatchSession {
    /// Establish a recursive watch on `root` and spawn the event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform watch cannot be established
    /// (no recursive watch support, permission denied, missing path).
    pub(crate) fn start(
        root: PathBuf,
        current_root: SharedRoot,
        signals: broadcast::Sender<VaultEvent>,
        debounce: Duration,
    ) -> Result<Self, WatchError> {
        let (raw_tx, raw_rx) = mpsc::channel(256);

        // The callback runs on the notify backend thread.
        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            let _ = raw_tx.blocking_send(result);
        })
        .map_err(|e| WatchError::InitFailed {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;

        watcher
            .watch(&root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::InitFailed {
                path: root.display().to_string(),
                reason: e.to_string(),
            })?;

        let cancel = CancellationToken::new();
        let task = tokio::spawn(watch_loop(
            watcher,
            raw_rx,
            current_root,
            signals,
            debounce,
            cancel.clone(),
        ));

        tracing::info!(root = %root.display(), "Watching root");
        Ok(Self { cancel, task })
    }

    /// Whether the event loop is still running. A backend error makes
    /// the loop close itself, leaving the session dead until the next
    /// root change.
    pub(crate) fn is_alive(&self) -> bool {
        !self.task.is_finished()
    }

    /// Close the session: cancels the pending debounce timer and drops
    /// the underlying watch.
    pub(crate) async fn close(self) {
        self.cancel.cancel();
        if self.task.await.is_err() {
            tracing::warn!("Watch task panicked during shutdown");
        }
    }
}

async fn watch_loop(
    watcher: RecommendedWatcher,
    mut raw_rx: mpsc::Receiver<notify::Result<Event>>,
    current_root: SharedRoot,
    signals: broadcast::Sender<VaultEvent>,
    debounce: Duration,
    cancel: CancellationToken,
) {
    // Owning the watcher here means the watch actually closes when the
    // loop exits, whichever way it exits.
    let _watcher = watcher;

    // None is Idle; Some is Pending(deadline).
    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            () = async { sleep_until(deadline.unwrap_or_else(Instant::now)).await },
                if deadline.is_some() =>
            {
                deadline = None;
                rescan(&current_root, &signals).await;
            }
            received = raw_rx.recv() => match received {
                None => break,
                Some(Err(e)) => {
                    tracing::warn!(
                        error = %e,
                        "Watch backend error; monitoring stops until a root is set again"
                    );
                    break;
                }
                Some(Ok(event)) => {
                    // Any notification re-arms the rescan, even ones
                    // with no usable path.
                    deadline = Some(Instant::now() + debounce);
                    emit_targeted(&event, &current_root, &signals);
                }
            }
        }
    }
}

/// Run one full rescan of the current root and broadcast the inventory.
async fn rescan(current_root: &SharedRoot, signals: &broadcast::Sender<VaultEvent>) {
    let root = current_root.read().clone();
    let Some(root) = root else {
        return;
    };
    let entries = scanner::scan_async(root).await;
    // No receivers is fine; windows subscribe and drop freely.
    let _ = signals.send(VaultEvent::InventoryUpdated { entries });
}

/// Emit a best-effort file-changed signal for each markdown path the
/// event names, validated against the current root rather than the
/// session's: the root may have been replaced between event emission
/// and handling.
fn emit_targeted(
    event: &Event,
    current_root: &SharedRoot,
    signals: &broadcast::Sender<VaultEvent>,
) {
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return;
    }

    let root = current_root.read().clone();
    let Some(root) = root else {
        return;
    };

    for path in &event.paths {
        if !scanner::is_markdown_path(path) {
            continue;
        }
        let normalized = normalize_lexical(path);
        if !is_inside(&root, &normalized) {
            continue;
        }
        let _ = signals.send(VaultEvent::FileChanged { path: normalized });
    }
}
