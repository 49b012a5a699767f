//! Error types for the permissions crate.

use thiserror::Error;

/// Errors that can occur while handling permissions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermsError {
    /// A permission label that is not one of `r`, `w`, `rw`, `none`.
    #[error("invalid permission label: {0:?}")]
    InvalidPermission(String),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
