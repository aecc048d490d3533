//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file and is then overlaid with
//! `SALES_*` environment variables. Every field has a default (port 3000,
//! table `sales` in `sa-east-1`), so the service starts with no configuration
//! at all.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 3000
//! store:
//!   backend: dynamodb
//!   table_name: sales
//!   region: sa-east-1
//!   endpoint: http://dynamodb-sales:8000
//!   timeout_ms: 5000
//! log:
//!   level: info
//! ```

use crate::core::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable naming the YAML config file
pub const CONFIG_PATH_ENV: &str = "SALES_CONFIG";

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which repository implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreBackend {
    InMemory,
    #[serde(rename = "dynamodb")]
    DynamoDB,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::InMemory => write!(f, "in-memory"),
            StoreBackend::DynamoDB => write!(f, "dynamodb"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in-memory" | "memory" => Ok(StoreBackend::InMemory),
            "dynamodb" => Ok(StoreBackend::DynamoDB),
            other => Err(ConfigError::invalid(
                "store.backend",
                format!("unknown backend '{}'", other),
            )),
        }
    }
}

/// Data store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,

    /// Table holding one item per sale
    pub table_name: String,

    pub region: String,

    /// Endpoint override, e.g. a local DynamoDB container
    pub endpoint: Option<String>,

    /// Per-call timeout for store requests; unbounded when absent
    pub timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::InMemory,
            table_name: "sales".to_string(),
            region: "sa-east-1".to_string(),
            endpoint: None,
            timeout_ms: None,
        }
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is not set
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete configuration for the sales service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub log: LogConfig,
}

impl ServiceConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from `SALES_CONFIG` (if set), apply environment overrides and validate
    pub fn load() -> Result<Self, ConfigError> {
        let config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };

        let config = config.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from a variable lookup
    ///
    /// `lookup` is called with each `SALES_*` variable name. Taking a closure
    /// keeps this testable without touching the process environment.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SALES_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SALES_PORT") {
            self.server.port = parse_number("SALES_PORT", &port)?;
        }
        if let Some(backend) = lookup("SALES_STORE_BACKEND") {
            self.store.backend = backend.parse()?;
        }
        if let Some(table) = lookup("SALES_TABLE_NAME") {
            self.store.table_name = table;
        }
        if let Some(region) = lookup("SALES_AWS_REGION") {
            self.store.region = region;
        }
        if let Some(endpoint) = lookup("SALES_DYNAMODB_ENDPOINT") {
            self.store.endpoint = Some(endpoint).filter(|e| !e.is_empty());
        }
        if let Some(timeout) = lookup("SALES_STORE_TIMEOUT_MS") {
            self.store.timeout_ms = Some(parse_number("SALES_STORE_TIMEOUT_MS", &timeout)?);
        }
        if let Some(level) = lookup("SALES_LOG_LEVEL") {
            self.log.level = level;
        }
        Ok(self)
    }

    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "must be non-zero"));
        }
        if self.store.table_name.trim().is_empty() {
            return Err(ConfigError::invalid("store.table_name", "must not be empty"));
        }
        if self.store.timeout_ms == Some(0) {
            return Err(ConfigError::invalid("store.timeout_ms", "must be non-zero"));
        }
        if self.store.backend == StoreBackend::DynamoDB {
            if !cfg!(feature = "dynamodb") {
                return Err(ConfigError::invalid(
                    "store.backend",
                    "dynamodb backend requires the `dynamodb` feature",
                ));
            }
            if self.store.region.trim().is_empty() {
                return Err(ConfigError::invalid("store.region", "must not be empty"));
            }
        }
        if self.store.backend == StoreBackend::InMemory && !cfg!(feature = "in-memory") {
            return Err(ConfigError::invalid(
                "store.backend",
                "in-memory backend requires the `in-memory` feature",
            ));
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, format!("'{}' is not a valid number", value)))
}
