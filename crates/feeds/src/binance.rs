//! Binance spot and futures feed clients
//!
//! Spot klines arrive as positional arrays with numeric strings for the
//! price fields; futures endpoints wrap their numbers in strings as well.
//! Everything is converted to typed values here so the analyzers never see
//! raw JSON.

use crate::client::FeedClient;
use crate::error::{FeedError, Result};
use common::Candle;
use serde::Deserialize;
use serde_json::Value;

/// Spot market data (candlesticks)
#[derive(Debug, Clone)]
pub struct SpotFeed {
    client: FeedClient,
    base: String,
}

impl SpotFeed {
    pub fn new(client: FeedClient, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    /// Fetch the most recent `limit` candles for `symbol` at `interval`
    /// (e.g. "15m", "1h"), oldest first.
    pub async fn klines(&self, symbol: &str, interval: &str, limit: usize) -> Result<Vec<Candle>> {
        let url = format!(
            "{}/api/v3/klines?symbol={}&interval={}&limit={}",
            self.base, symbol, interval, limit
        );
        let value = self.client.fetch_json(&url).await?;
        parse_klines(&value)
    }
}

/// Futures market data (funding, open interest)
#[derive(Debug, Clone)]
pub struct FuturesFeed {
    client: FeedClient,
    base: String,
}

#[derive(Debug, Deserialize)]
struct FundingRateRow {
    #[serde(rename = "fundingRate")]
    funding_rate: String,
}

#[derive(Debug, Deserialize)]
struct OpenInterestSnapshot {
    #[serde(rename = "openInterest")]
    open_interest: String,
}

#[derive(Debug, Deserialize)]
struct OpenInterestPoint {
    #[serde(rename = "sumOpenInterest")]
    sum_open_interest: String,
}

impl FuturesFeed {
    pub fn new(client: FeedClient, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    /// Fetch up to `limit` historical funding-rate samples, oldest first
    pub async fn funding_rates(&self, symbol: &str, limit: usize) -> Result<Vec<f64>> {
        let url = format!(
            "{}/fapi/v1/fundingRate?symbol={}&limit={}",
            self.base, symbol, limit
        );
        let rows: Vec<FundingRateRow> = self.client.fetch(&url).await?;
        rows.iter()
            .map(|row| parse_decimal(&row.funding_rate, "fundingRate"))
            .collect()
    }

    /// Fetch the current open interest for `symbol`
    pub async fn open_interest(&self, symbol: &str) -> Result<f64> {
        let url = format!("{}/fapi/v1/openInterest?symbol={}", self.base, symbol);
        let snapshot: OpenInterestSnapshot = self.client.fetch(&url).await?;
        parse_decimal(&snapshot.open_interest, "openInterest")
    }

    /// Fetch up to `limit` historical open-interest points at `period`
    /// (e.g. "1h"), oldest first.
    pub async fn open_interest_history(
        &self,
        symbol: &str,
        period: &str,
        limit: usize,
    ) -> Result<Vec<f64>> {
        let url = format!(
            "{}/futures/data/openInterestHist?symbol={}&period={}&limit={}",
            self.base, symbol, period, limit
        );
        let rows: Vec<OpenInterestPoint> = self.client.fetch(&url).await?;
        rows.iter()
            .map(|row| parse_decimal(&row.sum_open_interest, "sumOpenInterest"))
            .collect()
    }
}

/// Convert a kline response (array of positional arrays) into candles
pub fn parse_klines(value: &Value) -> Result<Vec<Candle>> {
    let rows = value
        .as_array()
        .ok_or_else(|| FeedError::shape("klines: expected a JSON array"))?;
    rows.iter().map(parse_kline_row).collect()
}

fn parse_kline_row(row: &Value) -> Result<Candle> {
    let fields = row
        .as_array()
        .filter(|fields| fields.len() >= 6)
        .ok_or_else(|| FeedError::shape("kline row: expected at least 6 fields"))?;

    Ok(Candle {
        open_time: fields[0]
            .as_i64()
            .ok_or_else(|| FeedError::shape("kline openTime: expected an integer"))?,
        open: numeric_field(&fields[1], "open")?,
        high: numeric_field(&fields[2], "high")?,
        low: numeric_field(&fields[3], "low")?,
        close: numeric_field(&fields[4], "close")?,
        volume: numeric_field(&fields[5], "volume")?,
    })
}

/// Accept either a JSON number or a numeric string (Binance uses both)
fn numeric_field(value: &Value, field: &str) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| FeedError::shape(format!("kline {field}: not representable as f64"))),
        Value::String(s) => parse_decimal(s, field),
        other => Err(FeedError::shape(format!(
            "kline {field}: expected number or string, got {other}"
        ))),
    }
}

fn parse_decimal(text: &str, field: &str) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| FeedError::shape(format!("{field}: {text:?} is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_klines_valid_rows() {
        let value = json!([
            [1700000000000i64, "100.1", "101.2", "99.3", "100.9", "12.5", 0, "0", 0, "0", "0", "0"],
            [1700000060000i64, "100.9", "102.0", "100.5", "101.7", "8.25", 0, "0", 0, "0", "0", "0"]
        ]);
        let candles = parse_klines(&value).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].open_time, 1700000000000);
        assert_eq!(candles[0].close, 100.9);
        assert_eq!(candles[1].volume, 8.25);
    }

    #[test]
    fn test_parse_klines_accepts_plain_numbers() {
        let value = json!([[1, 100.0, 101.0, 99.0, 100.5, 3.0]]);
        let candles = parse_klines(&value).unwrap();
        assert_eq!(candles[0].high, 101.0);
    }

    #[test]
    fn test_parse_klines_rejects_non_array() {
        let value = json!({"msg": "maintenance"});
        assert!(matches!(
            parse_klines(&value),
            Err(FeedError::Shape(_))
        ));
    }

    #[test]
    fn test_parse_klines_rejects_short_row() {
        let value = json!([[1700000000000i64, "100.1", "101.2"]]);
        assert!(matches!(parse_klines(&value), Err(FeedError::Shape(_))));
    }

    #[test]
    fn test_parse_klines_rejects_bad_numeric() {
        let value = json!([[1700000000000i64, "100.1", "x", "99.3", "100.9", "12.5"]]);
        let err = parse_klines(&value).unwrap_err();
        assert!(err.to_string().contains("high"));
    }
}
