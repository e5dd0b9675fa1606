//! Server configuration
//!
//! Loads and parses an optional `todo-server.toml` configuration file with
//! listen address and database settings. Environment variables override the
//! file; missing pieces fall back to defaults suitable for local development.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListenConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database file path
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "todo.db".to_string()
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ListenConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from `CONFIG_PATH` or `config/todo-server.toml`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed file is
    /// an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/todo-server.toml"));

        if !path.exists() {
            tracing::info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        let config: ServerConfig = toml::from_str(&raw)?;
        Ok(config)
    }

    /// SQLite connection URL for the configured database path.
    ///
    /// `DATABASE_URL` in the environment takes precedence. The file is
    /// created on first connect.
    pub fn database_url(&self) -> String {
        std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| format!("sqlite:{}?mode=rwc", self.database.path))
    }

    /// Socket address to bind, honoring `HOST`/`PORT` overrides.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| self.server.host.clone());
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidConfig(format!("PORT is not a valid port: {}", value)))?,
            Err(_) => self.server.port,
        };

        format!("{}:{}", host, port)
            .parse()
            .map_err(|e| ConfigError::InvalidConfig(format!("invalid listen address: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "todo.db");
    }

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [database]
            path = "/var/lib/todo/tasks.db"
        "#;
        let config: ServerConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.path, "/var/lib/todo/tasks.db");
    }

    #[test]
    fn test_parse_partial_config_fills_defaults() {
        let raw = r#"
            [database]
            path = "other.db"
        "#;
        let config: ServerConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "other.db");
    }
}
