use crate::MasterConfig;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    #[error("Instrument symbol is required")]
    MissingSymbol,

    #[error("CoinGecko coin_id is required")]
    MissingCoinId,

    #[error("Invalid {field} URL: {url}")]
    InvalidBaseUrl { field: String, url: String },

    #[error("feeds.attempts must be at least 1")]
    InvalidAttempts,

    #[error("feeds.timeout_secs must be at least 1")]
    InvalidTimeout,

    #[error("server.port must be non-zero")]
    InvalidPort,

    #[error("Invalid log format: {0}. Must be one of: pretty, json, compact")]
    InvalidLogFormat(String),

    #[error("Unresolved environment variable in {field}: {value}")]
    UnresolvedEnvVar { field: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            field: field.into(),
            message: message.into(),
        });
    }
}

pub fn validate_config(config: &MasterConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_instrument(config, &mut report);
    validate_feeds(config, &mut report);
    validate_server(config, &mut report);
    validate_service(config, &mut report);

    report
}

fn validate_instrument(config: &MasterConfig, report: &mut ValidationReport) {
    let instrument = &config.instrument;

    if instrument.symbol.is_empty() {
        report.add_error(ValidationError::MissingSymbol);
    } else if instrument.symbol.chars().any(|c| c.is_lowercase()) {
        report.add_warning(
            "instrument.symbol",
            "Exchange symbols are usually uppercase (e.g. BTCUSDT)",
        );
    }

    if instrument.coin_id.is_empty() {
        report.add_error(ValidationError::MissingCoinId);
    }
}

fn validate_feeds(config: &MasterConfig, report: &mut ValidationReport) {
    let feeds = &config.feeds;

    let bases = [
        ("feeds.spot_base", &feeds.spot_base),
        ("feeds.futures_base", &feeds.futures_base),
        ("feeds.coingecko_base", &feeds.coingecko_base),
        ("feeds.feargreed_base", &feeds.feargreed_base),
    ];
    for (field, base) in bases {
        if crate::substitution::has_unresolved_env_vars(base) {
            report.add_error(ValidationError::UnresolvedEnvVar {
                field: field.to_string(),
                value: base.clone(),
            });
            continue;
        }
        let valid = Url::parse(base)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            report.add_error(ValidationError::InvalidBaseUrl {
                field: field.to_string(),
                url: base.clone(),
            });
        } else if base.ends_with('/') {
            report.add_warning(field, "Trailing slash will produce double slashes in URLs");
        }
    }

    if feeds.attempts == 0 {
        report.add_error(ValidationError::InvalidAttempts);
    } else if feeds.attempts > 10 {
        report.add_warning(
            "feeds.attempts",
            "More than 10 attempts per retrieval will stall slow snapshots further",
        );
    }

    if feeds.timeout_secs == 0 {
        report.add_error(ValidationError::InvalidTimeout);
    }

    if feeds.retry_delay_ms > 5_000 {
        report.add_warning(
            "feeds.retry_delay_ms",
            "Retry delays above 5s dominate snapshot latency",
        );
    }
}

fn validate_server(config: &MasterConfig, report: &mut ValidationReport) {
    if config.server.port == 0 {
        report.add_error(ValidationError::InvalidPort);
    }
}

fn validate_service(config: &MasterConfig, report: &mut ValidationReport) {
    let format = config.service.log_format.to_lowercase();
    if !matches!(format.as_str(), "pretty" | "json" | "compact") {
        report.add_error(ValidationError::InvalidLogFormat(
            config.service.log_format.clone(),
        ));
    }
}
