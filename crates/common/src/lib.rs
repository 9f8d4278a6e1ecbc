//! Common types and utilities for MarketPulse
//!
//! This crate provides shared domain types used across all MarketPulse
//! crates: the analyzed timeframes, the candle sample, and the output
//! rounding helpers.

pub mod types;

pub use types::*;
