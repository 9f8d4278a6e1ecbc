use crate::{substitution, InstrumentConfig, MasterConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MasterConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let substituted = substitution::substitute_env_vars(&content)?;
    debug!("Environment variable substitution completed");

    let config: MasterConfig = serde_yaml::from_str(&substituted)
        .with_context(|| "Failed to parse YAML configuration")?;

    info!("Configuration loaded successfully");
    Ok(config)
}

pub fn generate_default_config() -> MasterConfig {
    MasterConfig {
        service: Default::default(),
        instrument: InstrumentConfig {
            symbol: "BTCUSDT".to_string(),
            coin_id: "bitcoin".to_string(),
        },
        feeds: Default::default(),
        server: Default::default(),
    }
}

pub fn save_config<P: AsRef<Path> + std::fmt::Debug>(config: &MasterConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Saving configuration to: {:?}", path);

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize configuration to YAML")?;

    fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    info!("Configuration saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pulse.yaml");

        let config = generate_default_config();
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded.instrument.symbol, "BTCUSDT");
        assert_eq!(loaded.instrument.coin_id, "bitcoin");
        assert_eq!(loaded.feeds.attempts, 3);
        assert_eq!(loaded.feeds.retry_delay_ms, 400);
        assert_eq!(loaded.server.port, 8080);
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("minimal.yaml");
        fs::write(
            &path,
            "instrument:\n  symbol: ETHUSDT\n  coin_id: ethereum\n",
        )
        .unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.instrument.symbol, "ETHUSDT");
        assert_eq!(loaded.feeds.spot_base, "https://api.binance.com");
        assert_eq!(loaded.service.log_format, "pretty");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_config("/definitely/not/here.yaml").is_err());
    }
}
