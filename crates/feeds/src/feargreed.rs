//! Fear & Greed index feed client

use crate::client::FeedClient;
use crate::error::{FeedError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct FearGreedResponse {
    data: Vec<FearGreedEntry>,
}

/// One published fear/greed sample
#[derive(Debug, Clone, Deserialize)]
pub struct FearGreedEntry {
    /// Index value as published (a stringified integer, e.g. "74")
    pub value: String,
    /// Human label, e.g. "Greed"
    pub value_classification: String,
}

#[derive(Debug, Clone)]
pub struct FearGreedFeed {
    client: FeedClient,
    base: String,
}

impl FearGreedFeed {
    pub fn new(client: FeedClient, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    /// Fetch the most recent fear/greed sample
    pub async fn latest(&self) -> Result<FearGreedEntry> {
        let url = format!("{}/fng/?limit=1", self.base);
        let response: FearGreedResponse = self.client.fetch(&url).await?;
        response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| FeedError::shape("fear/greed: empty data list"))
    }
}
