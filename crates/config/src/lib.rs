//! Master configuration for MarketPulse
//!
//! One YAML file configures the whole service: the instrument under
//! analysis, upstream feed endpoints and retry policy, the HTTP server
//! binding, and logging. Values support `${VAR}` / `${VAR:-default}`
//! environment substitution at load time.

use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::{generate_default_config, load_config, save_config};
pub use substitution::substitute_env_vars;
pub use validator::{validate_config, ValidationError, ValidationReport, ValidationWarning};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MasterConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    pub instrument: InstrumentConfig,
    #[serde(default)]
    pub feeds: FeedsConfig,
    #[serde(default)]
    pub server: ServerSection,
}

/// Service-level settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    /// One of: pretty, json, compact
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_format: default_log_format(),
        }
    }
}

/// The single instrument this deployment analyzes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstrumentConfig {
    /// Exchange pair symbol, e.g. "BTCUSDT"
    pub symbol: String,
    /// CoinGecko identifier of the base asset, e.g. "bitcoin"
    pub coin_id: String,
}

/// Upstream endpoints and fetch policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedsConfig {
    #[serde(default = "default_spot_base")]
    pub spot_base: String,
    #[serde(default = "default_futures_base")]
    pub futures_base: String,
    #[serde(default = "default_coingecko_base")]
    pub coingecko_base: String,
    #[serde(default = "default_feargreed_base")]
    pub feargreed_base: String,
    /// HTTP attempts per logical retrieval
    #[serde(default = "default_fetch_attempts")]
    pub attempts: u32,
    /// Fixed delay between attempts, milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Per-request timeout, seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            spot_base: default_spot_base(),
            futures_base: default_futures_base(),
            coingecko_base: default_coingecko_base(),
            feargreed_base: default_feargreed_base(),
            attempts: default_fetch_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// HTTP server binding
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_http_port(),
        }
    }
}
