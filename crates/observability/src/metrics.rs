//! Prometheus metrics infrastructure
//!
//! Metric points are recorded where they happen via the `metrics` macros;
//! this module only owns the exporter. The service emits:
//!
//! * `pulse_snapshots_total` - snapshots assembled
//! * `pulse_block_failures_total{block}` - failed analytical blocks
//! * `pulse_fetch_retries_total` - transient upstream responses retried

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize the Prometheus metrics exporter
///
/// Starts an HTTP listener on the given port exposing metrics at
/// `/metrics`.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    tracing::info!(%addr, "Metrics server listening");
    Ok(())
}
