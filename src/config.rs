//! sqlq configuration.
//!
//! Loaded from `<config dir>/sqlq/config.toml` when present:
//!
//! ```toml
//! log_level = "info"
//!
//! [database]
//! url = "sqlite://counter.db"
//! read_only = false
//! create_if_missing = true
//! max_connections = 5
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{QueryError, QueryResult};

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sqlq").join("config.toml"))
    }

    /// Parse a TOML document.
    pub fn from_toml(doc: &str) -> QueryResult<Self> {
        toml::from_str(doc).map_err(|e| QueryError::Config(e.to_string()))
    }

    /// Read a config file.
    pub fn from_file(path: &Path) -> QueryResult<Self> {
        let doc = std::fs::read_to_string(path)?;
        Self::from_toml(&doc)
    }

    /// Load from `path`, or the default location. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> QueryResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => match Self::default_path() {
                Some(p) if p.exists() => Self::from_file(&p),
                _ => Ok(Self::default()),
            },
        }
    }
}

/// How to open the SQLite database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `sqlite://path/to/file.db` or `sqlite::memory:`. None disables execution.
    pub url: Option<String>,
    pub read_only: bool,
    pub create_if_missing: bool,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            read_only: false,
            create_if_missing: true,
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    /// Create a new configuration builder
    pub fn builder() -> DatabaseConfigBuilder {
        DatabaseConfigBuilder::default()
    }
}

/// Builder for DatabaseConfig
#[derive(Debug, Default)]
pub struct DatabaseConfigBuilder {
    config: DatabaseConfig,
}

impl DatabaseConfigBuilder {
    /// Set the database URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = Some(url.into());
        self
    }

    /// Open without write access
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.config.read_only = read_only;
        self
    }

    /// Create the database file if it does not exist
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.config.create_if_missing = create;
        self
    }

    /// Set the pool size
    pub fn max_connections(mut self, n: u32) -> Self {
        self.config.max_connections = n;
        self
    }

    /// Build the configuration
    pub fn build(self) -> DatabaseConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.log_level, "warn");
        assert!(config.database.url.is_none());
        assert!(config.database.create_if_missing);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_from_toml() {
        let config = Config::from_toml(
            r#"
            log_level = "debug"

            [database]
            url = "sqlite://counter.db"
            read_only = true
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.database.url.as_deref(), Some("sqlite://counter.db"));
        assert!(config.database.read_only);
        assert!(config.database.create_if_missing);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_toml("log_level = ["),
            Err(QueryError::Config(_))
        ));
    }

    #[test]
    fn test_builder() {
        let db = DatabaseConfig::builder()
            .url("sqlite::memory:")
            .max_connections(1)
            .build();
        assert_eq!(db.url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(db.max_connections, 1);
    }
}
