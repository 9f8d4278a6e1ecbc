//! Simple moving average and population standard deviation

/// Mean of the last `period` elements.
///
/// Returns `None` when the series holds fewer than `period` points or the
/// period is zero.
pub fn sma(series: &[f64], period: usize) -> Option<f64> {
    if period == 0 || series.len() < period {
        return None;
    }
    let window = &series[series.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Population standard deviation of the last `period` elements.
///
/// The mean is taken over the same trailing window, and the variance is
/// divided by `period` (population form, not the `period - 1` sample form).
pub fn std_dev(series: &[f64], period: usize) -> Option<f64> {
    if period == 0 || series.len() < period {
        return None;
    }
    let window = &series[series.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / period as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_trailing_window() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(sma(&series, 2), Some(4.5));
        assert_eq!(sma(&series, 5), Some(3.0));
    }

    #[test]
    fn test_sma_insufficient_data() {
        let series = [1.0, 2.0];
        assert_eq!(sma(&series, 3), None);
        assert_eq!(sma(&series, 0), None);
        assert_eq!(sma(&[], 1), None);
    }

    #[test]
    fn test_std_dev_constant_series_is_zero() {
        let series = [7.0; 30];
        assert_eq!(std_dev(&series, 20), Some(0.0));
    }

    #[test]
    fn test_std_dev_population_divisor() {
        // Population stddev of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2
        let series = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = std_dev(&series, 8).unwrap();
        assert!((sd - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_insufficient_data() {
        assert_eq!(std_dev(&[1.0, 2.0], 3), None);
    }
}
