//! Block F: global market aggregates

use crate::error::Result;
use crate::types::MacroContext;
use crate::SnapshotError;
use common::round2;
use feeds::Feeds;

pub async fn run(feeds: &Feeds) -> Result<MacroContext> {
    let global = feeds.coingecko.global().await?;
    let data = global.data;

    let usd = data
        .total_market_cap
        .get("usd")
        .copied()
        .ok_or_else(|| SnapshotError::data("total market cap (usd) missing"))?;
    let btc = data
        .market_cap_percentage
        .get("btc")
        .copied()
        .ok_or_else(|| SnapshotError::data("btc dominance missing"))?;
    let eth = data
        .market_cap_percentage
        .get("eth")
        .copied()
        .ok_or_else(|| SnapshotError::data("eth dominance missing"))?;

    Ok(MacroContext {
        total_mcap_t: round2(usd / 1e12),
        mcap_24h_pct: round2(data.market_cap_change_percentage_24h_usd),
        btc_dominance: round2(btc),
        eth_dominance: round2(eth),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use feeds::{FeedEndpoints, FetchPolicy, Feeds};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
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

    #[tokio::test]
    async fn test_macro_context_derivation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/global"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "total_market_cap": {"usd": 2_450_000_000_000.0f64},
                    "market_cap_change_percentage_24h_usd": -1.234,
                    "market_cap_percentage": {"btc": 52.345, "eth": 16.789}
                }
            })))
            .mount(&server)
            .await;

        let feeds = test_feeds(&server.uri());
        let result = run(&feeds).await.unwrap();

        assert_eq!(result.total_mcap_t, 2.45);
        assert_eq!(result.mcap_24h_pct, -1.23);
        assert_eq!(result.btc_dominance, 52.35);
        assert_eq!(result.eth_dominance, 16.79);
    }

    #[tokio::test]
    async fn test_missing_usd_cap_fails_block() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/global"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "total_market_cap": {},
                    "market_cap_change_percentage_24h_usd": 0.5,
                    "market_cap_percentage": {"btc": 52.0, "eth": 16.0}
                }
            })))
            .mount(&server)
            .await;

        let feeds = test_feeds(&server.uri());
        let err = run(&feeds).await.unwrap_err();
        assert!(matches!(err, SnapshotError::Data(_)));
    }
}
