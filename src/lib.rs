//! Markdex core library.
//!
//! Privileged filesystem core for a desktop markdown viewer: owns the
//! single root directory, keeps the markdown inventory live under
//! filesystem changes, and enforces a path-containment boundary for
//! every read the presentation layer requests.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod observability;
pub mod vault;

pub use config::Config;
pub use error::{Error, Result, WatchError};
pub use vault::{MarkdownEntry, Vault, VaultEvent};
