//! Pure time-series indicators for MarketPulse
//!
//! Every function here is deterministic, allocation-light, and free of I/O.
//! Values are returned at full precision; rounding to output precision is
//! the caller's concern.
//!
//! Insufficient-data policy:
//!
//! - [`sma`] and [`std_dev`] return `None` when the series is shorter than
//!   the requested period, so callers can tell "no data" apart from a
//!   genuine zero.
//! - [`ema`], [`rsi`] and [`atr`] degrade to `0.0` instead. Their callers
//!   treat the sentinel as "indicator not available".

pub mod atr;
pub mod ema;
pub mod moving;
pub mod rsi;

pub use atr::atr;
pub use ema::ema;
pub use moving::{sma, std_dev};
pub use rsi::rsi;
