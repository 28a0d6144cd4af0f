//! Runtime configuration, read from the environment.

use axum::http::HeaderValue;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const DATA_DIR_VAR: &str = "FARM_LEDGER_DATA_DIR";
const DATABASE_URL_VAR: &str = "FARM_LEDGER_DATABASE_URL";
const ADDR_VAR: &str = "FARM_LEDGER_ADDR";
const ALLOWED_ORIGIN_VAR: &str = "FARM_LEDGER_ALLOWED_ORIGIN";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
const DATA_DIR_NAME: &str = "Farm Ledger";
const DATABASE_FILE: &str = "farm-ledger.sqlite3";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} is not a valid origin: {value}")]
    InvalidOrigin { var: &'static str, value: String },

    #[error("could not create data directory {path}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    /// Explicit database URL; when unset the database lives in `data_dir`.
    pub database_url: Option<String>,
    pub addr: SocketAddr,
    pub allowed_origin: HeaderValue,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&std::env::vars().collect())
    }

    fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let data_dir = match vars.get(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(),
        };

        let addr_value = vars.get(ADDR_VAR).map_or(DEFAULT_ADDR, String::as_str);
        let addr = addr_value.parse().map_err(|_| ConfigError::InvalidAddr {
            var: ADDR_VAR,
            value: addr_value.to_string(),
        })?;

        let origin_value = vars
            .get(ALLOWED_ORIGIN_VAR)
            .map_or(DEFAULT_ALLOWED_ORIGIN, String::as_str);
        let allowed_origin =
            HeaderValue::from_str(origin_value).map_err(|_| ConfigError::InvalidOrigin {
                var: ALLOWED_ORIGIN_VAR,
                value: origin_value.to_string(),
            })?;

        Ok(Self {
            data_dir,
            database_url: vars.get(DATABASE_URL_VAR).cloned(),
            addr,
            allowed_origin,
        })
    }

    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}", self.data_dir.join(DATABASE_FILE).display()),
        }
    }

    /// Create the data directory unless an explicit database URL makes it moot.
    pub fn ensure_data_dir(&self) -> Result<(), ConfigError> {
        if self.database_url.is_some() {
            return Ok(());
        }
        create_dir(&self.data_dir)
    }
}

fn default_data_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

fn create_dir(path: &Path) -> Result<(), ConfigError> {
    if !path.exists() {
        info!("Creating data directory: {}", path.display());
    }
    std::fs::create_dir_all(path).map_err(|source| ConfigError::DataDir {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config.addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.allowed_origin, "http://localhost:8080");
        assert!(config.data_dir.ends_with("Farm Ledger"));
        assert!(config.database_url().ends_with("farm-ledger.sqlite3"));
    }

    #[test]
    fn test_database_url_override() {
        let config = AppConfig::from_vars(&vars(&[
            ("FARM_LEDGER_DATA_DIR", "/srv/ledger"),
            ("FARM_LEDGER_DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/ledger"));
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert!(config.ensure_data_dir().is_ok());
    }

    #[test]
    fn test_data_dir_drives_database_path() {
        let config = AppConfig::from_vars(&vars(&[("FARM_LEDGER_DATA_DIR", "/srv/ledger")])).unwrap();
        assert_eq!(config.database_url(), "sqlite:///srv/ledger/farm-ledger.sqlite3");
    }

    #[test]
    fn test_invalid_addr_is_rejected() {
        let result = AppConfig::from_vars(&vars(&[("FARM_LEDGER_ADDR", "not-an-address")]));
        assert!(matches!(result, Err(ConfigError::InvalidAddr { .. })));
    }

    #[test]
    fn test_ensure_data_dir_creates_directory() {
        let dir = std::env::temp_dir().join(format!("farm-ledger-config-{}", uuid::Uuid::now_v7()));
        let config = AppConfig::from_vars(&vars(&[(
            "FARM_LEDGER_DATA_DIR",
            dir.to_str().unwrap(),
        )]))
        .unwrap();
        config.ensure_data_dir().unwrap();
        assert!(dir.is_dir());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
