//! Store configuration
//!
//! Loaded from YAML; every field has a default so an empty file is valid.
//!
//! ```yaml
//! path: data/world.db
//! foreign_keys: true
//! journal_mode: WAL
//! trace: "[rowmap]"
//! busy_timeout_ms: 500
//! ```

use crate::errors::{config_error, io_error, yaml_error, Result};
use serde::Deserialize;
use std::path::Path;

/// Path that opens a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

const JOURNAL_MODES: &[&str] = &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];

/// Connection and tracing settings for a `DbMap`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Database file, or `:memory:`
    pub path: String,
    /// Enforce declared foreign keys (`PRAGMA foreign_keys`)
    pub foreign_keys: bool,
    /// `PRAGMA journal_mode`, left at the SQLite default when unset
    pub journal_mode: Option<String>,
    /// Statement trace prefix; tracing is off when unset
    pub trace: Option<String>,
    pub busy_timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: IN_MEMORY.to_string(),
            foreign_keys: false,
            journal_mode: None,
            trace: None,
            busy_timeout_ms: None,
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Default settings against a database file
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    /// Load and validate a YAML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| io_error("config_load", e))?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML config text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: StoreConfig = if content.trim().is_empty() {
            StoreConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| yaml_error("config_load", e))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(config_error("path must not be empty"));
        }
        if let Some(mode) = &self.journal_mode {
            if !JOURNAL_MODES.iter().any(|m| m.eq_ignore_ascii_case(mode)) {
                return Err(config_error(&format!(
                    "Unsupported journal_mode: {}. Expected one of {}",
                    mode,
                    JOURNAL_MODES.join(", ")
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_core::ExErrorKind;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert!(config.is_in_memory());
        assert!(!config.foreign_keys);
        assert_eq!(config.trace, None);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(
            StoreConfig::from_yaml_str("").unwrap(),
            StoreConfig::default()
        );
    }

    #[test]
    fn test_parse_full() {
        let config = StoreConfig::from_yaml_str(
            "path: world.db\nforeign_keys: true\njournal_mode: wal\ntrace: \"[rowmap]\"\nbusy_timeout_ms: 250\n",
        )
        .unwrap();
        assert_eq!(config.path, "world.db");
        assert!(config.foreign_keys);
        assert_eq!(config.journal_mode.as_deref(), Some("wal"));
        assert_eq!(config.trace.as_deref(), Some("[rowmap]"));
        assert_eq!(config.busy_timeout_ms, Some(250));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = StoreConfig::from_yaml_str("pth: typo.db\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }

    #[test]
    fn test_rejects_bad_journal_mode() {
        let err = StoreConfig::from_yaml_str("journal_mode: sideways\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_load_missing_file_is_io() {
        let err = StoreConfig::load(Path::new("/nonexistent/rowmap.yaml")).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Io);
    }
}
