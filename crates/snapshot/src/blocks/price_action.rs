//! Block B: short-window price action per timeframe

use crate::error::Result;
use crate::types::PriceAction;
use crate::SnapshotError;
use common::{round2, Timeframe};
use feeds::Feeds;
use std::collections::BTreeMap;

/// Window length in candles
pub const WINDOW: usize = 5;

/// Run the block over every timeframe, isolating per-timeframe failures
pub async fn run(
    feeds: &Feeds,
    symbol: &str,
) -> (BTreeMap<String, PriceAction>, Vec<(Timeframe, SnapshotError)>) {
    let mut out = BTreeMap::new();
    let mut errors = Vec::new();
    for tf in Timeframe::ALL {
        match analyze(feeds, symbol, tf).await {
            Ok(result) => {
                out.insert(tf.as_str().to_string(), result);
            }
            Err(err) => errors.push((tf, err)),
        }
    }
    (out, errors)
}

async fn analyze(feeds: &Feeds, symbol: &str, tf: Timeframe) -> Result<PriceAction> {
    let candles = feeds.spot.klines(symbol, tf.as_str(), WINDOW).await?;
    if candles.len() < WINDOW {
        return Err(SnapshotError::data(format!(
            "expected {WINDOW} candles, got {}",
            candles.len()
        )));
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let first = closes[0];
    if first == 0.0 {
        return Err(SnapshotError::data("first close is zero"));
    }
    let last = closes[closes.len() - 1];
    let prev = closes[closes.len() - 2];
    let pct = (last - first) / first * 100.0;

    Ok(PriceAction {
        pct: round2(pct),
        note: classify(pct, last, prev).to_string(),
    })
}

/// Map the percent change onto one of six mutually exclusive bands,
/// checked in priority order. Inside the quiet band the direction of the
/// last step decides between range-base and range-top.
fn classify(pct: f64, last: f64, prev: f64) -> &'static str {
    if pct >= 1.5 {
        "strong up-move – breakout long / exit shorts"
    } else if pct >= 0.5 {
        "bullish drift – long bias"
    } else if pct <= -1.5 {
        "strong down-move – breakout short / exit longs"
    } else if pct <= -0.5 {
        "bearish drift – short bias"
    } else if last > prev {
        "range base – possible long reversal"
    } else {
        "range top – possible short reversal"
    }
}
