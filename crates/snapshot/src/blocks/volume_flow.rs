//! Block C: bull/bear volume split over rolling windows

use crate::error::Result;
use crate::types::{RelativeVolume, VolumeFlow, VolumeWindow};
use common::{round2, Candle};
use feeds::Feeds;

/// One-minute candles fetched per snapshot; covers 25 hours
pub const MINUTE_CANDLE_LIMIT: usize = 1500;

/// Lookback windows in hours, keyed by output label
const WINDOWS: [(&str, f64); 4] = [("15m", 0.25), ("1h", 1.0), ("4h", 4.0), ("24h", 24.0)];

/// Expected share of 24h volume per window: 24h/96 = 15m, 24h/24 = 1h,
/// 24h/6 = 4h.
const BASELINE_DIVISORS: [(&str, f64); 3] = [("15m", 96.0), ("1h", 24.0), ("4h", 6.0)];

/// Run the block: one fetch of minute candles, then pure windowing
pub async fn run(feeds: &Feeds, symbol: &str, now_ms: i64) -> Result<VolumeFlow> {
    let candles = feeds.spot.klines(symbol, "1m", MINUTE_CANDLE_LIMIT).await?;
    Ok(aggregate(&candles, now_ms))
}

/// Split volume into bull/bear per window and classify relative activity.
///
/// `now_ms` anchors the window cutoffs so results are reproducible.
pub fn aggregate(candles: &[Candle], now_ms: i64) -> VolumeFlow {
    let mut flow = VolumeFlow::default();

    for (label, hours) in WINDOWS {
        let cutoff = now_ms - (hours * 3_600_000.0) as i64;
        let mut bull = 0.0;
        let mut bear = 0.0;
        for candle in candles {
            if candle.open_time < cutoff {
                continue;
            }
            if candle.is_bullish() {
                bull += candle.volume;
            } else {
                bear += candle.volume;
            }
        }
        flow.windows.insert(
            label.to_string(),
            VolumeWindow {
                bull_vol: round2(bull),
                bear_vol: round2(bear),
                total_vol: round2(bull + bear),
            },
        );
    }

    let total_24h = flow
        .windows
        .get("24h")
        .map(|w| w.total_vol)
        .unwrap_or(0.0);
    for (label, divisor) in BASELINE_DIVISORS {
        let total = flow.windows.get(label).map(|w| w.total_vol).unwrap_or(0.0);
        // Floor of 1 keeps the ratio defined on dead markets
        let baseline = (total_24h / divisor).max(1.0);
        flow.relative
            .insert(label.to_string(), classify_ratio(total / baseline));
    }

    flow
}

fn classify_ratio(ratio: f64) -> RelativeVolume {
    if ratio > 2.0 {
        RelativeVolume::VeryHigh
    } else if ratio > 1.2 {
        RelativeVolume::High
    } else if ratio < 0.5 {
        RelativeVolume::Low
    } else {
        RelativeVolume::Normal
    }
}
