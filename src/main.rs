//! Markdex - filesystem core for a desktop markdown viewer.
//!
//! Runs the core as a standalone process: installs an initial root from
//! startup arguments, performs the initial scan, then streams outbound
//! signals as JSON lines on stdout for the presentation layer.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use clap::Parser;
use markdex::observability::init_tracing;
use markdex::vault::{build_tree, Vault, VaultEvent};
use markdex::{Config, Result};
use tokio::sync::broadcast;

/// Markdex - filesystem core for a desktop markdown viewer
#[derive(Parser, Debug)]
#[command(name = "markdex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory candidates; the first absolute path naming an
    /// existing directory becomes the root
    root: Vec<std::path::PathBuf>,

    /// Debounce window for coalesced rescans, in milliseconds
    #[arg(long, env = "MARKDEX_DEBOUNCE_MS", default_value = "500")]
    debounce_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MARKDEX_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, env = "MARKDEX_LOG_JSON")]
    log_json: bool,

    /// Emit the display tree instead of the flat inventory
    #[arg(long, env = "MARKDEX_TREE")]
    tree: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.log_json);
    tracing::info!("Markdex v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config {
        root_candidates: cli.root,
        debounce_ms: cli.debounce_ms,
        log_level: cli.log_level,
        log_json: cli.log_json,
    };
    config.validate()?;

    let mut vault = Vault::new(&config);
    let mut signals = vault.subscribe();

    match vault.initial_root(&config.root_candidates).await? {
        Some(root) => {
            tracing::info!(root = %root.display(), "Initial root installed");
            if !vault.is_watching() {
                tracing::warn!("Watch unavailable; inventory updates require manual refresh");
            }
            let entries = vault.scan_current_root().await?;
            emit(&VaultEvent::InventoryUpdated { entries }, cli.tree);
        }
        None => {
            tracing::info!("No initial root; waiting for the presentation layer to set one");
        }
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            received = signals.recv() => match received {
                Ok(event) => emit(&event, cli.tree),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Dropped signals under load");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    vault.teardown().await;
    tracing::info!("Markdex shut down");
    Ok(())
}

/// Write one signal as a JSON line on stdout.
fn emit(event: &VaultEvent, as_tree: bool) {
    let line = match event {
        VaultEvent::InventoryUpdated { entries } if as_tree => {
            serde_json::json!({ "event": "treeUpdated", "tree": build_tree(entries) }).to_string()
        }
        other => match serde_json::to_string(other) {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize signal");
                return;
            }
        },
    };
    println!("{line}");
}
