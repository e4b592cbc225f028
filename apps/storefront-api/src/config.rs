//! Storefront API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file in the working directory is read first, if present.
//!
//! | Variable                        | Default            |
//! |---------------------------------|--------------------|
//! | `STOREFRONT_HOST`               | `0.0.0.0`          |
//! | `STOREFRONT_PORT`               | `8010`             |
//! | `STOREFRONT_DB_PATH`            | `./storefront.db`  |
//! | `STOREFRONT_DB_MAX_CONNECTIONS` | `5`                |

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use storefront_db::DbConfig;

/// Storefront API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: IpAddr,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub db_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from `.env` (optional) and environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine; only the variables matter
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            host: lookup("STOREFRONT_HOST")
                .unwrap_or_else(|| "0.0.0.0".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_HOST".to_string()))?,

            port: lookup("STOREFRONT_PORT")
                .unwrap_or_else(|| "8010".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("STOREFRONT_PORT".to_string()))?,

            db_path: lookup("STOREFRONT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./storefront.db")),

            db_max_connections: lookup("STOREFRONT_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("STOREFRONT_DB_MAX_CONNECTIONS".to_string())
                })?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "STOREFRONT_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load_from(&[]).unwrap();

        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8010");
        assert_eq!(config.db_path, PathBuf::from("./storefront.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_config().max_connections, 5);
    }

    #[test]
    fn test_overrides() {
        let config = load_from(&[
            ("STOREFRONT_HOST", "127.0.0.1"),
            ("STOREFRONT_PORT", "9000"),
            ("STOREFRONT_DB_PATH", "/tmp/shop.db"),
            ("STOREFRONT_DB_MAX_CONNECTIONS", "8"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.db_config().database_path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.db_config().max_connections, 8);
    }

    #[test]
    fn test_invalid_values() {
        let err = load_from(&[("STOREFRONT_PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for STOREFRONT_PORT");

        assert!(load_from(&[("STOREFRONT_HOST", "not-an-ip")]).is_err());
        assert!(load_from(&[("STOREFRONT_DB_MAX_CONNECTIONS", "0")]).is_err());
    }
}
