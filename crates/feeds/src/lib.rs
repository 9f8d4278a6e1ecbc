//! Upstream data-feed clients for MarketPulse
//!
//! Each upstream is treated as a black-box JSON provider with a documented
//! response shape. This crate owns:
//!
//! - [`client`] - the resilient fetch client (bounded retries, fixed delay,
//!   transient-shape detection)
//! - [`binance`] - spot klines, funding rates, open interest
//! - [`coingecko`] - coin sentiment and global market aggregates
//! - [`feargreed`] - the Fear & Greed index
//!
//! Shape mismatches are converted into [`FeedError::Shape`] at this
//! boundary; analyzer code downstream only ever sees typed values.

pub mod binance;
pub mod client;
pub mod coingecko;
pub mod error;
pub mod feargreed;

pub use binance::{FuturesFeed, SpotFeed};
pub use client::{FeedClient, FetchPolicy};
pub use coingecko::{CoinDetail, CoinGeckoFeed, GlobalMarket};
pub use error::{FeedError, Result};
pub use feargreed::{FearGreedEntry, FearGreedFeed};

/// Base URLs of every consumed upstream
#[derive(Debug, Clone)]
pub struct FeedEndpoints {
    pub spot: String,
    pub futures: String,
    pub coingecko: String,
    pub feargreed: String,
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            spot: "https://api.binance.com".to_string(),
            futures: "https://fapi.binance.com".to_string(),
            coingecko: "https://api.coingecko.com".to_string(),
            feargreed: "https://api.alternative.me".to_string(),
        }
    }
}

/// All feed clients bundled for the analyzers
#[derive(Debug, Clone)]
pub struct Feeds {
    pub spot: SpotFeed,
    pub futures: FuturesFeed,
    pub coingecko: CoinGeckoFeed,
    pub feargreed: FearGreedFeed,
}

impl Feeds {
    pub fn new(policy: FetchPolicy, endpoints: FeedEndpoints) -> Result<Self> {
        let client = FeedClient::new(policy)?;
        Ok(Self {
            spot: SpotFeed::new(client.clone(), endpoints.spot),
            futures: FuturesFeed::new(client.clone(), endpoints.futures),
            coingecko: CoinGeckoFeed::new(client.clone(), endpoints.coingecko),
            feargreed: FearGreedFeed::new(client, endpoints.feargreed),
        })
    }
}
