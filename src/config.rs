//! Configuration module
//!
//! `AppConfig` is read from a TOML file. Every section and field has a
//! default, so a partial file (or no file at all) yields a usable config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::DatabaseConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "BOARD_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for in-flight requests after a shutdown signal.
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `url` wins over `path`; with neither, `board.db` in the data directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub pool: PoolConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            max_connections: db.max_connections,
            min_connections: db.min_connections,
            connect_timeout_secs: db.connect_timeout_secs,
        }
    }
}

impl DatabaseSection {
    fn explicit_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// SQLite file backing the database, `None` when an explicit url is set.
    pub fn database_file(&self) -> Option<PathBuf> {
        match self.explicit_url() {
            Some(_) => None,
            None => Some(self.path.clone().unwrap_or_else(default_database_path)),
        }
    }

    pub fn connection_url(&self) -> String {
        match (self.explicit_url(), self.database_file()) {
            (Some(url), _) => url.to_string(),
            (None, Some(path)) => DatabaseConfig::sqlite(&path.to_string_lossy()).url,
            (None, None) => DatabaseConfig::default().url,
        }
    }

    pub fn to_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.connection_url(),
            max_connections: self.pool.max_connections,
            min_connections: self.pool.min_connections,
            connect_timeout_secs: self.pool.connect_timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `board_service=debug,sea_orm=warn`.
    pub level: String,
    /// `text` or `json`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self)?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, raw).map_err(io_err)
    }
}

fn app_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join("board-service")
}

/// `$BOARD_CONFIG`, else `~/.config/board-service/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    app_dir(dirs_next::config_dir()).join("config.toml")
}

fn default_database_path() -> PathBuf {
    app_dir(dirs_next::data_dir()).join("board.db")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("board-config-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = AppConfig::load(&temp_path("absent.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.database.pool.max_connections, 10);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9090

            [database.pool]
            max_connections = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.pool.max_connections, 3);
        assert_eq!(config.database.pool.min_connections, 1);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn url_takes_precedence_over_path() {
        let section = DatabaseSection {
            url: Some("sqlite::memory:".into()),
            path: Some(PathBuf::from("/tmp/ignored.db")),
            pool: PoolConfig::default(),
        };
        assert_eq!(section.connection_url(), "sqlite::memory:");
        assert!(section.database_file().is_none());

        let section = DatabaseSection {
            url: Some("  ".into()),
            path: Some(PathBuf::from("/tmp/board.db")),
            pool: PoolConfig::default(),
        };
        assert_eq!(section.connection_url(), "sqlite:///tmp/board.db?mode=rwc");
        assert_eq!(section.database_file(), Some(PathBuf::from("/tmp/board.db")));
    }

    #[test]
    fn database_config_carries_pool_settings() {
        let section = DatabaseSection {
            url: Some("sqlite::memory:".into()),
            path: None,
            pool: PoolConfig {
                max_connections: 4,
                min_connections: 2,
                connect_timeout_secs: 3,
            },
        };
        let db = section.to_database_config();
        assert_eq!(db.max_connections, 4);
        assert_eq!(db.min_connections, 2);
        assert_eq!(db.connect_timeout_secs, 3);
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("config.toml");
        let mut config = AppConfig::default();
        config.server.port = 7001;
        config.logging.format = "json".into();
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.server.port, 7001);
        assert_eq!(loaded.logging.format, "json");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_path("broken.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[server\nport = ").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
