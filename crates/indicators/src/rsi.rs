//! Relative strength index (Wilder smoothing)

/// Wilder's smoothed RSI over the whole series.
///
/// The first `period` deltas seed the average gain/loss as simple means
/// (losses stored as positive magnitudes); every later delta applies the
/// Wilder update `avg = (avg * (period - 1) + contribution) / period`.
///
/// When the average loss is exactly zero the RSI is defined as `100.0`.
/// Returns `0.0` when fewer than `period + 1` points are available.
pub fn rsi(series: &[f64], period: usize) -> f64 {
    if period == 0 || series.len() < period + 1 {
        return 0.0;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..=period {
        let delta = series[i] - series[i - 1];
        if delta >= 0.0 {
            gains += delta;
        } else {
            losses -= delta;
        }
    }

    let w = period as f64;
    let mut avg_gain = gains / w;
    let mut avg_loss = losses / w;

    for i in period + 1..series.len() {
        let delta = series[i] - series[i - 1];
        avg_gain = (avg_gain * (w - 1.0) + delta.max(0.0)) / w;
        avg_loss = (avg_loss * (w - 1.0) + (-delta).max(0.0)) / w;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}
