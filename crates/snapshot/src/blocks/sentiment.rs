//! Block E: community sentiment and the Fear & Greed index

use crate::error::Result;
use crate::types::Sentiment;
use crate::SnapshotError;
use common::round1;
use feeds::Feeds;

pub async fn run(feeds: &Feeds, coin_id: &str) -> Result<Sentiment> {
    let detail = feeds.coingecko.coin_detail(coin_id).await?;
    let up = detail
        .sentiment_up_pct()
        .ok_or_else(|| SnapshotError::data("sentiment percentage missing"))?;

    let fng = feeds.feargreed.latest().await?;

    Ok(Sentiment {
        sentiment_up_pct: round1(up),
        fear_greed: format!("{} · {}", fng.value, fng.value_classification),
    })
}
