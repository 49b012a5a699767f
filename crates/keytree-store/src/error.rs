//! Error types for the store crate.

use keytree_perms::Access;
use thiserror::Error;

/// Errors that can occur during store operations.
///
/// A missing key is not an error: reads report absence as `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The effective permission of `key` forbids the attempted access.
    #[error("{key} is not {access}")]
    AccessDenied { key: String, access: Access },

    /// The path has more segments than the store accepts.
    #[error("path has {depth} segments, limit is {max}")]
    PathTooDeep { depth: usize, max: usize },

    /// The value has no JSON representation.
    #[error("value cannot be serialized: {0}")]
    NotSerializable(&'static str),
}

impl StoreError {
    pub(crate) fn denied(key: &str, access: Access) -> Self {
        StoreError::AccessDenied {
            key: key.to_string(),
            access,
        }
    }

    /// Whether this is an access denial.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, StoreError::AccessDenied { .. })
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
