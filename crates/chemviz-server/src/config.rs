//! Configuration management

use chemviz_core::store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

// ============================================================================
// Server Configuration Constants
// ============================================================================

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

/// Default shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Default upload request body limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default directory holding the database and uploaded source files.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default CORS allowed origin. Any origin may call the API.
pub const DEFAULT_CORS_ALLOWED_ORIGIN: &str = "*";

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
}

/// Server-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

/// Where datasets are kept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    /// Overrides the database location under `data_dir`
    pub database_url: Option<String>,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let config = Config {
            server: ServerConfig {
                host: lookup("CHEMVIZ_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
                port: parse_var(&lookup, "CHEMVIZ_PORT").unwrap_or(DEFAULT_SERVER_PORT),
                shutdown_timeout_secs: parse_var(&lookup, "CHEMVIZ_SHUTDOWN_TIMEOUT")
                    .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
                max_upload_bytes: parse_var(&lookup, "CHEMVIZ_MAX_UPLOAD_BYTES")
                    .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            },
            storage: StorageConfig {
                data_dir: lookup("CHEMVIZ_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
                database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGIN.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
                allow_credentials: parse_var(&lookup, "CORS_ALLOW_CREDENTIALS").unwrap_or(false),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.server.max_upload_bytes == 0 {
            anyhow::bail!("Upload limit must be greater than 0");
        }

        if self.storage.data_dir.as_os_str().is_empty() {
            anyhow::bail!("Data directory cannot be empty");
        }

        if self.cors.allowed_origins.is_empty() {
            tracing::warn!("No CORS origins configured - all origins will be allowed");
        }

        Ok(())
    }

    /// Dataset store settings derived from the storage section
    pub fn store_config(&self) -> StoreConfig {
        let mut store = StoreConfig::for_data_dir(&self.storage.data_dir);
        if let Some(url) = &self.storage.database_url {
            store.database_url = url.clone();
        }
        store
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_SERVER_HOST.to_string(),
                port: DEFAULT_SERVER_PORT,
                shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
                max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            },
            storage: StorageConfig {
                data_dir: PathBuf::from(DEFAULT_DATA_DIR),
                database_url: None,
            },
            cors: CorsConfig {
                allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGIN.to_string()],
                allow_credentials: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.server.host, DEFAULT_SERVER_HOST);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.cors.allowed_origins, vec!["*".to_string()]);
        assert!(!config.cors.allow_credentials);

        let store = config.store_config();
        assert_eq!(store.database_url, "sqlite://./data/chemviz.db");
        assert_eq!(store.blob_root, PathBuf::from("./data/media/uploads"));
        assert_eq!(store.retention, 5);
    }

    #[test]
    fn test_environment_overrides() {
        let config = from_pairs(&[
            ("CHEMVIZ_HOST", "0.0.0.0"),
            ("CHEMVIZ_PORT", "9100"),
            ("CHEMVIZ_DATA_DIR", "/var/lib/chemviz"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, https://plant.example"),
            ("CORS_ALLOW_CREDENTIALS", "true"),
        ])
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9100);
        assert_eq!(
            config.cors.allowed_origins,
            vec!["http://localhost:3000".to_string(), "https://plant.example".to_string()]
        );
        assert!(config.cors.allow_credentials);

        let store = config.store_config();
        assert_eq!(store.database_url, "sqlite::memory:");
        assert_eq!(store.blob_root, PathBuf::from("/var/lib/chemviz/media/uploads"));
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = from_pairs(&[("CHEMVIZ_PORT", "eighty")]).unwrap();
        assert_eq!(config.server.port, DEFAULT_SERVER_PORT);
    }

    #[test]
    fn test_validation_rejects_zero_port() {
        assert!(from_pairs(&[("CHEMVIZ_PORT", "0")]).is_err());
        assert!(from_pairs(&[("CHEMVIZ_MAX_UPLOAD_BYTES", "0")]).is_err());
    }
}
