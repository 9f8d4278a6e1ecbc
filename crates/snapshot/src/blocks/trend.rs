//! Block A: trend & volatility indicators per timeframe

use crate::error::Result;
use crate::types::IndicatorSnapshot;
use crate::SnapshotError;
use common::{round1, round2, Timeframe};
use feeds::Feeds;
use indicators::{atr, ema, rsi, std_dev};
use std::collections::BTreeMap;

/// Candles fetched per timeframe; enough history to seed EMA-200
pub const CANDLE_LIMIT: usize = 250;

/// Run the block over every timeframe.
///
/// Each timeframe is evaluated independently: one failing fetch removes
/// only that timeframe from the output and surfaces as a labeled error.
pub async fn run(
    feeds: &Feeds,
    symbol: &str,
) -> (
    BTreeMap<String, IndicatorSnapshot>,
    Vec<(Timeframe, SnapshotError)>,
) {
    let mut out = BTreeMap::new();
    let mut errors = Vec::new();
    for tf in Timeframe::ALL {
        match analyze(feeds, symbol, tf).await {
            Ok(snapshot) => {
                out.insert(tf.as_str().to_string(), snapshot);
            }
            Err(err) => errors.push((tf, err)),
        }
    }
    (out, errors)
}

async fn analyze(feeds: &Feeds, symbol: &str, tf: Timeframe) -> Result<IndicatorSnapshot> {
    let candles = feeds.spot.klines(symbol, tf.as_str(), CANDLE_LIMIT).await?;

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    // Guard against an empty or zero last close so the percent scalings
    // below never divide by zero.
    let last = closes.last().copied().filter(|c| *c > 0.0).unwrap_or(1.0);

    let bb_pct = std_dev(&closes, 20)
        .map(|sd| 4.0 * sd / last * 100.0)
        .unwrap_or(0.0);

    Ok(IndicatorSnapshot {
        ema50: round2(ema(&closes, 50)),
        ema200: round2(ema(&closes, 200)),
        rsi14: round1(rsi(&closes, 14)),
        bb_pct: round2(bb_pct),
        atr_pct: round2(atr(&highs, &lows, &closes, 14) / last * 100.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use feeds::{FeedEndpoints, FetchPolicy, Feeds};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn constant_klines(n: usize, price: f64) -> serde_json::Value {
        let rows: Vec<_> = (0..n)
            .map(|i| {
                json!([
                    1_700_000_000_000i64 + i as i64 * 60_000,
                    price.to_string(),
                    price.to_string(),
                    price.to_string(),
                    price.to_string(),
                    "1.0"
                ])
            })
            .collect();
        json!(rows)
    }

    fn test_feeds(base: &str) -> Feeds {
        let endpoints = FeedEndpoints {
            spot: base.to_string(),
            futures: base.to_string(),
            coingecko: base.to_string(),
            feargreed: base.to_string(),
        };
        let policy = FetchPolicy {
            attempts: 1,
            retry_delay: Duration::from_millis(1),
            timeout: Duration::from_secs(2),
        };
        Feeds::new(policy, endpoints).unwrap()
    }

    #[tokio::test]
    async fn test_constant_series_snapshot_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/klines"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(constant_klines(CANDLE_LIMIT, 50.0)),
            )
            .mount(&server)
            .await;

        let feeds = test_feeds(&server.uri());
        let (out, errors) = run(&feeds, "BTCUSDT").await;

        assert!(errors.is_empty());
        assert_eq!(out.len(), 4);
        let snap = &out["1h"];
        // Constant series: EMAs equal the constant, no dispersion, no range
        assert_eq!(snap.ema50, 50.0);
        assert_eq!(snap.ema200, 50.0);
        assert_eq!(snap.bb_pct, 0.0);
        assert_eq!(snap.atr_pct, 0.0);
        // No losses at all: RSI defined as 100
        assert_eq!(snap.rsi14, 100.0);
    }

    #[tokio::test]
    async fn test_one_timeframe_failure_does_not_block_others() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/klines"))
            .and(query_param("interval", "4h"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v3/klines"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(constant_klines(CANDLE_LIMIT, 50.0)),
            )
            .mount(&server)
            .await;

        let feeds = test_feeds(&server.uri());
        let (out, errors) = run(&feeds, "BTCUSDT").await;

        assert_eq!(out.len(), 3);
        assert!(!out.contains_key("4h"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, Timeframe::FourHours);
    }
}
