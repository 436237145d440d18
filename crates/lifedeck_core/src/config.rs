//! Runtime configuration for shells embedding the core.
//!
//! # Responsibility
//! - Load settings from an optional JSON file with per-field defaults.
//! - Apply `LIFEDECK_*` environment overrides on top of file values.
//!
//! # Invariants
//! - Missing file fields fall back to defaults; unknown fields are rejected.
//! - `log_level` is validated with the same rules as `init_logging`.

use crate::logging::{default_log_level, normalize_level};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "LIFEDECK_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "LIFEDECK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LIFEDECK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "lifedeck.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::InvalidLogLevel(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// SQLite file holding the state document.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling logs. Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Loads from `path` when given, then applies process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
            .validated()
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        if let Some(value) = present(ENV_DB_PATH) {
            self.db_path = PathBuf::from(value);
        }
        if let Some(value) = present(ENV_LOG_LEVEL) {
            self.log_level = value;
        }
        if let Some(value) = present(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(value));
        }
        self
    }

    /// Normalizes `log_level` or rejects it.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.log_level = normalize_level(&self.log_level)
            .map_err(ConfigError::InvalidLogLevel)?
            .to_string();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, ENV_DB_PATH, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn missing_fields_use_defaults() {
        let config = CoreConfig::from_json_str(r#"{"log_level":"warn"}"#).unwrap();
        assert_eq!(config.db_path, PathBuf::from("lifedeck.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(CoreConfig::from_json_str(r#"{"db":"x"}"#).is_err());
    }

    #[test]
    fn overrides_replace_file_values_and_skip_blanks() {
        let env = HashMap::from([
            (ENV_DB_PATH, "/tmp/other.sqlite3".to_string()),
            (ENV_LOG_LEVEL, "  ".to_string()),
        ]);
        let config = CoreConfig::default().with_overrides(|name| env.get(name).cloned());
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.sqlite3"));
        assert_eq!(config.log_level, CoreConfig::default().log_level);
    }

    #[test]
    fn validated_normalizes_and_rejects_levels() {
        let config = CoreConfig {
            log_level: "WARNING".to_string(),
            ..CoreConfig::default()
        };
        assert_eq!(config.validated().unwrap().log_level, "warn");

        let bad = CoreConfig {
            log_level: "loud".to_string(),
            ..CoreConfig::default()
        };
        assert!(matches!(bad.validated(), Err(ConfigError::InvalidLogLevel(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CoreConfig::from_json_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
