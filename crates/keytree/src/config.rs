//! Store configuration.
//!
//! ```json
//! {
//!   "default_policy": "rw",
//!   "max_depth": 16,
//!   "declarations": { "version": "r", "secret": "none" }
//! }
//! ```
//!
//! Every field is optional.

use indexmap::IndexMap;
use keytree_perms::Permission;
use keytree_store::path::{self, DEFAULT_MAX_DEPTH};
use keytree_store::{Store, StoreBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{KeytreeError, Result};

/// Configuration of a root store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Policy of undeclared keys.
    pub default_policy: Permission,
    /// Maximum number of segments in a path.
    pub max_depth: usize,
    /// Declared permissions of top-level keys.
    pub declarations: IndexMap<String, Permission>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_policy: Permission::ReadWrite,
            max_depth: DEFAULT_MAX_DEPTH,
            declarations: IndexMap::new(),
        }
    }
}

impl StoreConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(KeytreeError::Config("max_depth must be at least 1".into()));
        }
        if let Some(key) = self.declarations.keys().find(|k| !path::is_valid_key(k)) {
            return Err(KeytreeError::Config(format!(
                "declared key {key:?} contains '{}'",
                path::SEPARATOR
            )));
        }
        Ok(())
    }

    /// A builder preloaded with this configuration.
    pub fn builder(&self) -> StoreBuilder {
        self.declarations.iter().fold(
            StoreBuilder::new()
                .default_policy(self.default_policy)
                .max_depth(self.max_depth),
            |builder, (key, permission)| builder.declare(key.clone(), *permission),
        )
    }

    /// Validate and build an empty root store.
    pub fn open(&self) -> Result<Store> {
        self.validate()?;
        let store = self.builder().build()?;
        tracing::debug!(
            store = %store.id(),
            default_policy = %self.default_policy,
            declarations = self.declarations.len(),
            "opened store"
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.default_policy, Permission::ReadWrite);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.declarations.is_empty());
    }

    #[test]
    fn test_parse_partial_json() {
        let config = StoreConfig::from_json_str(r#"{"declarations": {"v": "r"}}"#).unwrap();
        assert_eq!(config.default_policy, Permission::ReadWrite);
        assert_eq!(config.declarations["v"], Permission::Read);
    }

    #[test]
    fn test_reject_bad_config() {
        assert!(matches!(
            StoreConfig::from_json_str(r#"{"max_depth": 0}"#),
            Err(KeytreeError::Config(_))
        ));
        assert!(matches!(
            StoreConfig::from_json_str(r#"{"declarations": {"a:b": "r"}}"#),
            Err(KeytreeError::Config(_))
        ));
        assert!(matches!(
            StoreConfig::from_json_str(r#"{"default_policy": "rwx"}"#),
            Err(KeytreeError::Json(_))
        ));
        // Bad labels fail during parsing, not when the store is built.
        assert!(matches!(
            StoreConfig::from_json_str(r#"{"declarations": {"k": "x"}}"#),
            Err(KeytreeError::Json(_))
        ));
    }

    #[test]
    fn test_open_applies_config() {
        let config = StoreConfig::from_json_str(
            r#"{"default_policy": "r", "max_depth": 4, "declarations": {"log": "w"}}"#,
        )
        .unwrap();
        let mut store = config.open().unwrap();

        assert_eq!(store.default_policy(), Permission::Read);
        assert_eq!(store.max_depth(), 4);
        assert!(store.write("log", "line").is_ok());
        assert!(store.write("other", 1).unwrap_err().is_access_denied());
    }

    #[test]
    fn test_config_serializes_with_labels() {
        let mut config = StoreConfig::default();
        config.declarations.insert("k".into(), Permission::None);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["default_policy"], "rw");
        assert_eq!(json["declarations"]["k"], "none");
    }
}
