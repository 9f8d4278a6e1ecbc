//! Block D: futures positioning (funding z-score, open-interest delta)

use crate::error::Result;
use crate::types::Derivatives;
use crate::SnapshotError;
use common::{round1, round2};
use feeds::Feeds;

/// Funding samples considered for the z-score (42 eight-hour periods,
/// two weeks of history)
pub const FUNDING_WINDOW: usize = 42;

/// Hourly open-interest points fetched; the oldest is the 24h baseline
pub const OI_HISTORY_POINTS: usize = 24;

pub async fn run(feeds: &Feeds, symbol: &str) -> Result<Derivatives> {
    let rates = feeds.futures.funding_rates(symbol, 1000).await?;
    if rates.is_empty() {
        return Err(SnapshotError::data("funding history is empty"));
    }
    let window = &rates[rates.len().saturating_sub(FUNDING_WINDOW)..];
    let funding_z = round2(z_score(window));

    let oi_now = feeds.futures.open_interest(symbol).await?;
    let history = feeds
        .futures
        .open_interest_history(symbol, "1h", OI_HISTORY_POINTS)
        .await?;
    let baseline = history
        .first()
        .copied()
        .ok_or_else(|| SnapshotError::data("open-interest history is empty"))?;
    if baseline <= 0.0 {
        return Err(SnapshotError::data(
            "open-interest baseline is not positive",
        ));
    }

    Ok(Derivatives {
        funding_z,
        oi_delta_24h: round1((oi_now - baseline) / baseline * 100.0),
    })
}

/// Z-score of the last sample against the window's population mean/stddev.
/// Defined as 0.0 when the deviation is zero (all samples equal).
fn z_score(window: &[f64]) -> f64 {
    let last = match window.last() {
        Some(&v) => v,
        None => return 0.0,
    };
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let sd = variance.sqrt();
    if sd == 0.0 {
        return 0.0;
    }
    (last - mean) / sd
}
