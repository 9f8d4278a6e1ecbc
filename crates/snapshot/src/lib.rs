//! Market snapshot assembly for MarketPulse
//!
//! This crate turns raw feed data into the consolidated snapshot document.
//!
//! # Core Components
//!
//! - [`blocks`] - the six independent analyzers:
//!   A trend & volatility, B price action, C volume flow,
//!   D derivatives positioning, E sentiment, F macro context
//! - [`assembler`] - runs every block and merges the outcomes
//! - [`types`] - the published document shapes
//!
//! # Key Invariants
//!
//! - A block failure never aborts sibling blocks or the invocation
//! - Each block returns an immutable value; the assembler performs the
//!   single merge step, so concurrent evaluation is race-free
//! - The document is rebuilt from scratch on every call; nothing is cached
//!   across invocations

pub mod assembler;
pub mod blocks;
pub mod error;
pub mod types;

pub use assembler::Aggregator;
pub use error::SnapshotError;
pub use types::{
    Derivatives, IndicatorSnapshot, MacroContext, MarketSnapshot, PriceAction, RelativeVolume,
    Sentiment, VolumeFlow, VolumeWindow,
};

pub type Result<T> = std::result::Result<T, SnapshotError>;
