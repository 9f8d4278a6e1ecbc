//! Average true range

/// ATR as the simple moving average of the last `period` true ranges.
///
/// True range per step is the greatest of `high - low`,
/// `|high - prev_close|` and `|low - prev_close|`.
///
/// Returns `0.0` when fewer than `period + 1` rows of history are
/// available. Slices of unequal length are truncated to the shortest.
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> f64 {
    let len = highs.len().min(lows.len()).min(closes.len());
    if period == 0 || len < period + 1 {
        return 0.0;
    }

    let mut true_ranges = Vec::with_capacity(len - 1);
    for i in 1..len {
        let tr = (highs[i] - lows[i])
            .max((highs[i] - closes[i - 1]).abs())
            .max((lows[i] - closes[i - 1]).abs());
        true_ranges.push(tr);
    }

    let window = &true_ranges[true_ranges.len() - period..];
    window.iter().sum::<f64>() / period as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atr_flat_market_is_zero() {
        // Zero high-low range and constant close: every true range is 0
        let flat = [50.0; 20];
        assert_eq!(atr(&flat, &flat, &flat, 14), 0.0);
    }

    #[test]
    fn test_atr_constant_range() {
        // Each candle spans exactly 2.0 and closes mid-range, so the
        // intra-candle range dominates every true range.
        let highs = [101.0; 20];
        let lows = [99.0; 20];
        let closes = [100.0; 20];
        assert!((atr(&highs, &lows, &closes, 14) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_atr_gap_uses_previous_close() {
        // Second candle gaps up: TR = |high - prev_close| = 10
        let highs = [101.0, 110.0];
        let lows = [99.0, 109.0];
        let closes = [100.0, 109.5];
        assert!((atr(&highs, &lows, &closes, 1) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_atr_insufficient_data_returns_zero() {
        let series = [100.0; 14];
        assert_eq!(atr(&series, &series, &series, 14), 0.0);
    }
}
