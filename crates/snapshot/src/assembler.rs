//! Aggregate assembler
//!
//! Runs all six blocks concurrently and merges each outcome into one
//! immutable document. Failures are recorded per block; siblings are never
//! affected, and the assembler itself never fails.

use crate::blocks;
use crate::error::SnapshotError;
use crate::types::{MarketSnapshot, VolumeFlow};
use chrono::Utc;
use feeds::Feeds;
use metrics::counter;
use tracing::{debug, warn};

/// Builds consolidated market snapshots for one configured instrument
#[derive(Debug, Clone)]
pub struct Aggregator {
    feeds: Feeds,
    symbol: String,
    coin_id: String,
}

impl Aggregator {
    /// `symbol` is the exchange pair (e.g. "BTCUSDT"), `coin_id` the
    /// CoinGecko identifier of its base asset (e.g. "bitcoin").
    pub fn new(feeds: Feeds, symbol: impl Into<String>, coin_id: impl Into<String>) -> Self {
        Self {
            feeds,
            symbol: symbol.into(),
            coin_id: coin_id.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Build one snapshot.
    ///
    /// Always returns a well-formed document: total failure of every feed
    /// still produces an empty payload with one labeled error per block.
    pub async fn snapshot(&self) -> MarketSnapshot {
        let now_ms = Utc::now().timestamp_millis();
        debug!(symbol = %self.symbol, "building market snapshot");

        let (trend, price_action, volume_flow, derivatives, sentiment, macro_context) = tokio::join!(
            blocks::trend::run(&self.feeds, &self.symbol),
            blocks::price_action::run(&self.feeds, &self.symbol),
            blocks::volume_flow::run(&self.feeds, &self.symbol, now_ms),
            blocks::derivatives::run(&self.feeds, &self.symbol),
            blocks::sentiment::run(&self.feeds, &self.coin_id),
            blocks::macro_context::run(&self.feeds),
        );

        let mut errors = Vec::new();

        let (data_a, trend_errors) = trend;
        for (tf, err) in &trend_errors {
            record(&mut errors, "A", Some(tf.as_str()), err);
        }

        let (data_b, price_action_errors) = price_action;
        for (tf, err) in &price_action_errors {
            record(&mut errors, "B", Some(tf.as_str()), err);
        }

        let data_c = match volume_flow {
            Ok(flow) => flow,
            Err(err) => {
                record(&mut errors, "C", None, &err);
                VolumeFlow::default()
            }
        };
        let data_d = accept(derivatives, "D", &mut errors);
        let data_e = accept(sentiment, "E", &mut errors);
        let data_f = accept(macro_context, "F", &mut errors);

        counter!("pulse_snapshots_total").increment(1);

        MarketSnapshot {
            trend: data_a,
            price_action: data_b,
            volume_flow: data_c,
            derivatives: data_d,
            sentiment: data_e,
            macro_context: data_f,
            errors,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

fn accept<T>(
    outcome: Result<T, SnapshotError>,
    block: &str,
    errors: &mut Vec<String>,
) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(err) => {
            record(errors, block, None, &err);
            None
        }
    }
}

fn record(errors: &mut Vec<String>, block: &str, sub: Option<&str>, err: &SnapshotError) {
    let label = match sub {
        Some(sub) => format!("{block}[{sub}]"),
        None => block.to_string(),
    };
    warn!(block = %label, error = %err, "block failed");
    counter!("pulse_block_failures_total", "block" => block.to_string()).increment(1);
    errors.push(format!("{label}: {err}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use feeds::{FeedEndpoints, FetchPolicy, Feeds};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_feeds(base: &str) -> Feeds {
        let policy = FetchPolicy {
            attempts: 1,
            retry_delay: Duration::from_millis(1),
            timeout: Duration::from_secs(2),
        };
        Feeds::new(
            policy,
            FeedEndpoints {
                spot: base.to_string(),
                futures: base.to_string(),
                coingecko: base.to_string(),
                feargreed: base.to_string(),
            },
        )
        .unwrap()
    }

    fn klines_body(n: usize) -> serde_json::Value {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let rows: Vec<_> = (0..n)
            .map(|i| {
                json!([
                    now_ms - ((n - i) as i64) * 60_000,
                    "100.0",
                    "101.0",
                    "99.0",
                    "100.5",
                    "2.0"
                ])
            })
            .collect();
        json!(rows)
    }

    async fn mount_healthy_spot_and_macro(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v3/klines"))
            .respond_with(ResponseTemplate::new(200).set_body_json(klines_body(250)))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/api/v3/coins/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sentiment_votes_up_percentage": 75.0
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v3/global"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "total_market_cap": {"usd": 2_000_000_000_000.0f64},
                    "market_cap_change_percentage_24h_usd": 1.0,
                    "market_cap_percentage": {"btc": 50.0, "eth": 17.0}
                }
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/fng/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"value": "60", "value_classification": "Greed"}]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_derivatives_failure_is_isolated() {
        let server = MockServer::start().await;
        mount_healthy_spot_and_macro(&server).await;
        Mock::given(method("GET"))
            .and(path("/fapi/v1/fundingRate"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let aggregator = Aggregator::new(test_feeds(&server.uri()), "BTCUSDT", "bitcoin");
        let doc = aggregator.snapshot().await;

        assert!(doc.derivatives.is_none());
        let d_errors: Vec<_> = doc.errors.iter().filter(|e| e.starts_with("D:")).collect();
        assert_eq!(d_errors.len(), 1);
        assert_eq!(doc.errors.len(), 1);

        // Siblings unaffected
        assert_eq!(doc.trend.len(), 4);
        assert_eq!(doc.price_action.len(), 4);
        assert!(!doc.volume_flow.windows.is_empty());
        assert!(doc.sentiment.is_some());
        assert!(doc.macro_context.is_some());
    }

    #[tokio::test]
    async fn test_total_failure_still_yields_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let aggregator = Aggregator::new(test_feeds(&server.uri()), "BTCUSDT", "bitcoin");
        let doc = aggregator.snapshot().await;

        assert!(doc.trend.is_empty());
        assert!(doc.price_action.is_empty());
        assert!(doc.volume_flow.windows.is_empty());
        assert!(doc.derivatives.is_none());
        assert!(doc.sentiment.is_none());
        assert!(doc.macro_context.is_none());
        // A and B fail once per timeframe, C-F once each
        assert_eq!(doc.errors.len(), 12);
        assert!(doc.timestamp > 0);
    }

    #[tokio::test]
    async fn test_error_labels_carry_sub_keys() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let aggregator = Aggregator::new(test_feeds(&server.uri()), "BTCUSDT", "bitcoin");
        let doc = aggregator.snapshot().await;

        for tf in ["15m", "1h", "4h", "1d"] {
            assert!(
                doc.errors.iter().any(|e| e.starts_with(&format!("A[{tf}]:"))),
                "missing A[{tf}] error"
            );
            assert!(
                doc.errors.iter().any(|e| e.starts_with(&format!("B[{tf}]:"))),
                "missing B[{tf}] error"
            );
        }
        for block in ["C:", "D:", "E:", "F:"] {
            assert!(doc.errors.iter().any(|e| e.starts_with(block)));
        }
    }
}
