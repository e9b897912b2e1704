// File: ./src/config.rs
// Client config file (TOML) and server settings (environment)
use crate::storage::LocalStorage;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_FILTER: &str = "taskboard=debug,tower_http=debug";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub allow_insecure_certs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            allow_insecure_certs: false,
        }
    }
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "taskboard", "taskboard")
            .map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Reads the config file (defaults when absent), then applies
    /// `TASKBOARD_API_URL`.
    pub fn load() -> Result<Self> {
        let mut config = match Self::get_path() {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Self::from_toml(&raw).with_context(|| format!("parsing {}", path.display()))?
            }
            _ => Self::default(),
        };
        if let Ok(url) = std::env::var("TASKBOARD_API_URL")
            && !url.trim().is_empty()
        {
            config.api_url = url;
        }
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got `{0}`")]
    InvalidPort(String),

    #[error("TASKBOARD_STORE is not set and no data directory is available")]
    NoDataDir,
}

/// Where the server keeps its documents.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store: StoreLocation,
    /// `RUST_LOG` directive for the subscriber.
    pub log_filter: String,
}

impl ServerConfig {
    /// Reads `HOST`, `PORT`, `TASKBOARD_STORE` and `RUST_LOG` from the
    /// process environment (after `.env`, if any).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT").filter(|p| !p.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let store = match lookup("TASKBOARD_STORE").filter(|s| !s.trim().is_empty()) {
            Some(raw) if raw.trim().eq_ignore_ascii_case("memory") => StoreLocation::Memory,
            Some(raw) => StoreLocation::File(PathBuf::from(raw.trim())),
            None => StoreLocation::File(LocalStorage::default_path().ok_or(ConfigError::NoDataDir)?),
        };

        let log_filter = lookup("RUST_LOG")
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            host,
            port,
            store,
            log_filter,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn server_defaults() {
        let cfg = ServerConfig::from_lookup(lookup(&[("TASKBOARD_STORE", "memory")])).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.store, StoreLocation::Memory);
        assert_eq!(cfg.bind_address(), "0.0.0.0:5000");
        assert_eq!(cfg.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn log_filter_comes_from_the_same_lookup_as_dotenv_values() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("TASKBOARD_STORE", "memory"),
            ("RUST_LOG", "taskboard=trace"),
        ]))
        .unwrap();
        assert_eq!(cfg.log_filter, "taskboard=trace");
    }

    #[test]
    fn server_reads_port_and_store_path() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("TASKBOARD_STORE", "/var/lib/taskboard/tasks.json"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_address(), "127.0.0.1:8080");
        assert_eq!(
            cfg.store,
            StoreLocation::File(PathBuf::from("/var/lib/taskboard/tasks.json"))
        );
    }

    #[test]
    fn server_rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("eighty".to_string()));
    }

    #[test]
    fn client_config_fills_missing_keys() {
        let cfg = Config::from_toml("allow_insecure_certs = true\n").unwrap();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert!(cfg.allow_insecure_certs);
    }
}
