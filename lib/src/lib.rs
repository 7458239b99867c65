//! Sync saved Twitter bookmarks from the Composio action API into a
//! markdown file.
//!
//! One run is a linear pipeline: resolve [`config::SyncConfig`], call the
//! bookmarks action through [`fetch::ActionClient`], locate the records with
//! [`extract::extract_bookmarks`], render and write them with [`export`].
//! [`sync::SyncJob`] sequences the stages.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod sync;
pub mod utils;

// Re-export error types for convenience
pub use error::{Result, SyncError};
pub use sync::{run_sync, SyncJob, SyncOutcome, SyncResult};
