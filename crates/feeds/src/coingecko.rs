//! CoinGecko feed client (coin detail, global market aggregates)

use crate::client::FeedClient;
use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;

/// Coin detail response, reduced to the sentiment fields.
///
/// The sentiment-up percentage has been observed in two places depending on
/// API version: at the top level and nested under `community_data`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinDetail {
    #[serde(default)]
    sentiment_votes_up_percentage: Option<f64>,
    #[serde(default)]
    community_data: Option<CommunityData>,
}

#[derive(Debug, Clone, Deserialize)]
struct CommunityData {
    #[serde(default)]
    sentiment_votes_up_percentage: Option<f64>,
}

impl CoinDetail {
    /// First non-null sentiment-up percentage, top-level location preferred
    pub fn sentiment_up_pct(&self) -> Option<f64> {
        self.sentiment_votes_up_percentage.or_else(|| {
            self.community_data
                .as_ref()
                .and_then(|c| c.sentiment_votes_up_percentage)
        })
    }
}

/// Global market aggregates response
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalMarket {
    pub data: GlobalData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlobalData {
    pub total_market_cap: HashMap<String, f64>,
    pub market_cap_change_percentage_24h_usd: f64,
    pub market_cap_percentage: HashMap<String, f64>,
}

#[derive(Debug, Clone)]
pub struct CoinGeckoFeed {
    client: FeedClient,
    base: String,
}

impl CoinGeckoFeed {
    pub fn new(client: FeedClient, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    pub async fn coin_detail(&self, coin_id: &str) -> Result<CoinDetail> {
        let url = format!("{}/api/v3/coins/{}", self.base, coin_id);
        self.client.fetch(&url).await
    }

    pub async fn global(&self) -> Result<GlobalMarket> {
        let url = format!("{}/api/v3/global", self.base);
        self.client.fetch(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_prefers_top_level_field() {
        let detail: CoinDetail = serde_json::from_value(serde_json::json!({
            "sentiment_votes_up_percentage": 81.2,
            "community_data": {"sentiment_votes_up_percentage": 12.0}
        }))
        .unwrap();
        assert_eq!(detail.sentiment_up_pct(), Some(81.2));
    }

    #[test]
    fn test_sentiment_falls_back_to_community_data() {
        let detail: CoinDetail = serde_json::from_value(serde_json::json!({
            "community_data": {"sentiment_votes_up_percentage": 64.5}
        }))
        .unwrap();
        assert_eq!(detail.sentiment_up_pct(), Some(64.5));
    }

    #[test]
    fn test_sentiment_missing_everywhere() {
        let detail: CoinDetail = serde_json::from_value(serde_json::json!({
            "name": "bitcoin"
        }))
        .unwrap();
        assert_eq!(detail.sentiment_up_pct(), None);
    }
}
