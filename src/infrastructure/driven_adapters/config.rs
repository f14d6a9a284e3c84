//! Application Configuration
//!
//! Loads configuration from files and environment variables.

use std::fmt;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Bearer token for the blockchain database, wiped from memory on drop
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct ApiToken(String);

impl ApiToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

/// Blockchain database client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BlockchainDbConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_token: Option<ApiToken>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

/// Discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    pub mainnet: bool,
    pub address_chunk_size: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub json: bool,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub blockchain_db: BlockchainDbConfig,
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be read, a value has the wrong
    /// type, or `discovery.address_chunk_size` is zero.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        Config::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Override with environment variables (e.g., APP__BLOCKCHAIN_DB__BASE_URL)
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    /// Check values the type system cannot express
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` describing the first invalid value.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.discovery.address_chunk_size == 0 {
            return Err(ConfigError::Message(
                "discovery.address_chunk_size must be at least 1".to_string(),
            ));
        }
        if !self.blockchain_db.base_url.starts_with("http://") && !self.blockchain_db.base_url.starts_with("https://") {
            return Err(ConfigError::Message(
                "blockchain_db.base_url must start with http:// or https://".to_string(),
            ));
        }
        Ok(self)
    }
}
