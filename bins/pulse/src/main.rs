//! MarketPulse CLI and server binary
//!
//! Entry point for the snapshot service. Provides commands for serving
//! snapshots over HTTP, producing a one-shot snapshot on stdout, and
//! initializing/validating the configuration.

use anyhow::Result;
use cli::{Cli, Commands};
use config::{generate_default_config, load_config, save_config, validate_config, MasterConfig};
use feeds::{FeedEndpoints, Feeds, FetchPolicy};
use observability::{init_logging, LogFormat};
use server::{routes, HealthState, HttpServer, ServerConfig, ServerExt, SnapshotState};
use snapshot::Aggregator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Start {
            config,
            port,
            metrics_port,
        } => start(config, port, metrics_port).await,
        Commands::Snapshot { config, pretty } => snapshot_once(config, pretty).await,
        Commands::Validate { config } => validate_command(config),
        Commands::Init { output } => init_command(output),
    }
}

async fn start(
    config_path: PathBuf,
    port_override: Option<u16>,
    metrics_port: Option<u16>,
) -> Result<()> {
    // Load before logging init so the configured format applies; a load
    // failure still reaches the user through the anyhow exit path.
    let config = load_config(&config_path)?;

    let format = LogFormat::parse(&config.service.log_format).unwrap_or_default();
    init_logging(&config.service.name, format)?;

    info!("MarketPulse starting...");

    check_report(&config)?;

    if let Some(port) = metrics_port {
        observability::init_metrics(port)?;
    }

    let aggregator = build_aggregator(&config)?;
    let port = port_override.unwrap_or(config.server.port);
    let server_config = ServerConfig::new(config.server.host.clone(), port);

    let router = routes::router(
        Arc::new(SnapshotState::new(aggregator)),
        Arc::new(HealthState::new(config.service.name.clone())),
    );
    let server = HttpServer::new(server_config, router);

    info!(
        host = %config.server.host,
        port,
        symbol = %config.instrument.symbol,
        "Serving market snapshots"
    );

    server.run_with_ctrl_c().await?;

    Ok(())
}

async fn snapshot_once(config_path: PathBuf, pretty: bool) -> Result<()> {
    // No logging init here: stdout carries nothing but the document
    let config = load_config(&config_path)?;

    let report = validate_config(&config);
    if !report.is_valid() {
        for err in &report.errors {
            eprintln!("[error] {}", err);
        }
        anyhow::bail!("Configuration validation failed");
    }

    let aggregator = build_aggregator(&config)?;
    let doc = aggregator.snapshot().await;

    let json = if pretty {
        serde_json::to_string_pretty(&doc)?
    } else {
        serde_json::to_string(&doc)?
    };
    println!("{json}");

    Ok(())
}

fn validate_command(config_path: PathBuf) -> Result<()> {
    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[error] Failed to load configuration: {e:#}");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] [{}] {}", warning.field, warning.message);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("Instrument: {}", config.instrument.symbol);
    println!("CoinGecko id: {}", config.instrument.coin_id);
    println!(
        "Fetch policy: {} attempts, {}ms delay, {}s timeout",
        config.feeds.attempts, config.feeds.retry_delay_ms, config.feeds.timeout_secs
    );
    println!("Server: {}:{}", config.server.host, config.server.port);

    Ok(())
}

fn init_command(output_path: PathBuf) -> Result<()> {
    let config = generate_default_config();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create directory {parent:?}: {e}"))?;
        }
    }

    save_config(&config, &output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {output_path:?}");
    println!();
    println!("This configuration includes:");
    println!("  - Instrument {} ({})", config.instrument.symbol, config.instrument.coin_id);
    println!("  - Default upstream endpoints and retry policy");
    println!();
    println!("Next steps:");
    println!("  1. Edit the configuration file to customize settings");
    println!("  2. Run 'pulse validate --config {output_path:?}' to check it");
    println!("  3. Run 'pulse start --config {output_path:?}' to serve snapshots");

    Ok(())
}

fn check_report(config: &MasterConfig) -> Result<()> {
    let report = validate_config(config);

    if !report.warnings.is_empty() {
        warn!("Configuration warnings:");
        for warning in &report.warnings {
            warn!(field = %warning.field, message = %warning.message);
        }
    }

    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot start due to configuration errors");
    }

    Ok(())
}

fn build_aggregator(config: &MasterConfig) -> Result<Aggregator> {
    let policy = FetchPolicy {
        attempts: config.feeds.attempts,
        retry_delay: Duration::from_millis(config.feeds.retry_delay_ms),
        timeout: Duration::from_secs(config.feeds.timeout_secs),
    };
    let endpoints = FeedEndpoints {
        spot: trim_base(&config.feeds.spot_base),
        futures: trim_base(&config.feeds.futures_base),
        coingecko: trim_base(&config.feeds.coingecko_base),
        feargreed: trim_base(&config.feeds.feargreed_base),
    };
    let feeds = Feeds::new(policy, endpoints)?;

    Ok(Aggregator::new(
        feeds,
        config.instrument.symbol.as_str(),
        config.instrument.coin_id.as_str(),
    ))
}

fn trim_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
