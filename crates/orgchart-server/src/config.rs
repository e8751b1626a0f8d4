//! Configuration loading from TOML and environment variables.
//!
//! The server reads its configuration from:
//! 1. A TOML config file (default: config/orgchart.toml)
//! 2. Environment variables (override TOML values)
//!
//! Environment variable prefix: ORGCHART_

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// RPC server configuration.
    #[serde(default)]
    pub rpc: RpcConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Designations seeded into the catalog at startup.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// File the configuration was read from; `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// JSON-RPC server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Address to bind the RPC server to.
    #[serde(default = "default_rpc_addr")]
    pub bind_addr: String,
    /// Maximum concurrent RPC connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "orgchart_hierarchy=debug").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to output JSON-formatted logs.
    #[serde(default)]
    pub json_format: bool,
}

/// Initial designation catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_designations")]
    pub designations: Vec<DesignationSeed>,
}

/// One designation to seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignationSeed {
    pub title: String,
    pub level: f64,
}

// -- Defaults --

fn default_rpc_addr() -> String {
    orgchart_protocol::DEFAULT_RPC_ADDR.to_string()
}
fn default_max_connections() -> usize {
    orgchart_protocol::DEFAULT_MAX_CONNECTIONS
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_designations() -> Vec<DesignationSeed> {
    [
        ("Director", 1.0),
        ("Manager", 2.0),
        ("Lead", 3.0),
        ("Developer", 4.0),
        ("DevOps", 4.0),
        ("QA Engineer", 4.0),
        ("Intern", 5.0),
    ]
    .into_iter()
    .map(|(title, level)| DesignationSeed {
        title: title.to_string(),
        level,
    })
    .collect()
}

// -- Trait impls --

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_rpc_addr(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            designations: default_designations(),
        }
    }
}

impl DirectoryConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, anyhow::Error> {
        let config: DirectoryConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, with environment variable overrides.
    ///
    /// A missing file is not an error: defaults are used and `source` stays
    /// `None`, so the caller can report the fallback once logging is up.
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let mut config = Self::from_file(path)?;
                config.source = Some(path.to_path_buf());
                config
            }
            _ => Self::default(),
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ORGCHART_RPC_BIND_ADDR") {
            self.rpc.bind_addr = val;
        }
        if let Ok(val) = std::env::var("ORGCHART_MAX_CONNECTIONS") {
            if let Ok(n) = val.parse() {
                self.rpc.max_connections = n;
            }
        }
        if let Ok(val) = std::env::var("ORGCHART_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("ORGCHART_LOG_JSON") {
            self.logging.json_format = val == "true" || val == "1";
        }
    }

    /// Parse the RPC bind address into a SocketAddr.
    pub fn rpc_socket_addr(&self) -> Result<SocketAddr, anyhow::Error> {
        Ok(self.rpc.bind_addr.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = DirectoryConfig::from_toml("").unwrap();
        assert_eq!(config.rpc.bind_addr, "127.0.0.1:9480");
        assert_eq!(config.rpc.max_connections, 10);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.catalog.designations.len(), 7);
        assert_eq!(config.catalog.designations[0].title, "Director");
    }

    #[test]
    fn test_partial_sections() {
        let config = DirectoryConfig::from_toml(
            r#"
            [rpc]
            bind_addr = "0.0.0.0:7000"

            [logging]
            json_format = true

            [[catalog.designations]]
            title = "Chief"
            level = 1.0

            [[catalog.designations]]
            title = "Worker"
            level = 2.0
            "#,
        )
        .unwrap();
        assert_eq!(config.rpc.bind_addr, "0.0.0.0:7000");
        assert_eq!(config.rpc.max_connections, 10);
        assert!(config.logging.json_format);
        assert_eq!(config.logging.level, "info");
        assert_eq!(
            config.catalog.designations,
            vec![
                DesignationSeed {
                    title: "Chief".into(),
                    level: 1.0
                },
                DesignationSeed {
                    title: "Worker".into(),
                    level: 2.0
                },
            ]
        );
        assert_eq!(config.rpc_socket_addr().unwrap().port(), 7000);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config =
            DirectoryConfig::load(Some(Path::new("/nonexistent/orgchart.toml"))).unwrap();
        assert_eq!(config.catalog.designations.len(), 7);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_loaded_file_is_recorded_as_source() {
        let path = std::env::temp_dir().join(format!(
            "orgchart-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = DirectoryConfig::load(Some(path.as_path())).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert_eq!(config.catalog.designations.len(), 7);
    }
}
