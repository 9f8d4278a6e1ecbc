//! Output document types
//!
//! Field names follow the published JSON contract (`dataA`..`dataF`,
//! camelCase members). All numbers are rounded to output precision by the
//! block that produced them, never here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Block A output for one timeframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub ema50: f64,
    pub ema200: f64,
    pub rsi14: f64,
    #[serde(rename = "bbPct")]
    pub bb_pct: f64,
    #[serde(rename = "atrPct")]
    pub atr_pct: f64,
}

/// Block B output for one timeframe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAction {
    pub pct: f64,
    pub note: String,
}

/// Volume totals for one lookback window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeWindow {
    #[serde(rename = "bullVol")]
    pub bull_vol: f64,
    #[serde(rename = "bearVol")]
    pub bear_vol: f64,
    #[serde(rename = "totalVol")]
    pub total_vol: f64,
}

/// Relative-volume classification against the 24h-derived baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelativeVolume {
    #[serde(rename = "very high")]
    VeryHigh,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "low")]
    Low,
}

/// Block C output: per-window totals plus relative classifications.
///
/// Serializes window labels at the top level (matching the published
/// contract) with the classification map under `relative`. The default
/// value serializes as an empty object, which is the block's failure shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolumeFlow {
    #[serde(flatten)]
    pub windows: BTreeMap<String, VolumeWindow>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relative: BTreeMap<String, RelativeVolume>,
}

/// Block D output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivatives {
    /// Z-score of the latest funding rate against its recent history
    #[serde(rename = "fundingZ")]
    pub funding_z: f64,
    /// Open-interest change vs 24 hours ago, percent
    #[serde(rename = "oiDelta24h")]
    pub oi_delta_24h: f64,
}

/// Block E output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    #[serde(rename = "sentimentUpPct")]
    pub sentiment_up_pct: f64,
    /// Combined index value and label, e.g. "74 · Greed"
    #[serde(rename = "fearGreed")]
    pub fear_greed: String,
}

/// Block F output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroContext {
    /// Total market cap in trillions of USD
    #[serde(rename = "totalMcapT")]
    pub total_mcap_t: f64,
    #[serde(rename = "mcap24hPct")]
    pub mcap_24h_pct: f64,
    #[serde(rename = "btcDominance")]
    pub btc_dominance: f64,
    #[serde(rename = "ethDominance")]
    pub eth_dominance: f64,
}

/// The consolidated market-snapshot document.
///
/// Constructed fresh per invocation and immutable once returned. Blocks
/// that failed leave their slot empty (A-C) or null (D-F) and contribute a
/// labeled entry to `errors` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    #[serde(rename = "dataA")]
    pub trend: BTreeMap<String, IndicatorSnapshot>,
    #[serde(rename = "dataB")]
    pub price_action: BTreeMap<String, PriceAction>,
    #[serde(rename = "dataC")]
    pub volume_flow: VolumeFlow,
    #[serde(rename = "dataD")]
    pub derivatives: Option<Derivatives>,
    #[serde(rename = "dataE")]
    pub sentiment: Option<Sentiment>,
    #[serde(rename = "dataF")]
    pub macro_context: Option<MacroContext>,
    pub errors: Vec<String>,
    /// Generation time, epoch milliseconds
    pub timestamp: i64,
}
