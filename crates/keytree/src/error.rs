//! Error types for the keytree facade.

use keytree_store::StoreError;
use thiserror::Error;

/// Errors that can occur while configuring or using a keytree.
#[derive(Debug, Error)]
pub enum KeytreeError {
    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for keytree operations.
pub type Result<T> = std::result::Result<T, KeytreeError>;
