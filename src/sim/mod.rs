//! Market simulation module
//!
//! Generates quotes and depth-of-market snapshots on a periodic cadence

mod book;
mod engine;
mod quote;

pub use book::{generate_order_book, BookLevel, OrderBookSnapshot, Side};
pub use engine::{CancelHandle, MarketSimulator, MarketSnapshot, Subscription};
pub use quote::{generate_quote, Quote};

use rust_decimal::Decimal;
use thiserror::Error;

/// Simulation errors
#[derive(Debug, Error)]
pub enum SimError {
    /// Symbol not present in the catalog
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),
    /// Reference price missing or non-positive
    #[error("Invalid reference price for {symbol}: {price}")]
    InvalidReferencePrice { symbol: String, price: Decimal },
    /// Tick size must be strictly positive
    #[error("Invalid tick size: {0}")]
    InvalidTickSize(Decimal),
    /// Order books need at least one level per side
    #[error("Order book level count must be at least 1")]
    InvalidLevelCount,
    /// Malformed simulation parameters
    #[error("Invalid simulation parameters: {0}")]
    InvalidParams(&'static str),
}

/// Tunable bands for the random draws
#[derive(Debug, Clone)]
pub struct SimParams {
    /// Maximum bid/ask offset from the reference mid, in ticks (each side
    /// draws independently from `1..=quote_band_ticks`)
    pub quote_band_ticks: i64,
    /// Day-change band in ticks, drawn from the signed range
    pub change_band_ticks: i64,
    /// Smallest level size
    pub size_min: u64,
    /// Largest level size
    pub size_max: u64,
}

impl SimParams {
    /// Check the draw ranges are well-formed
    pub fn validate(&self) -> Result<(), SimError> {
        if self.quote_band_ticks < 1 {
            return Err(SimError::InvalidParams("quote_band_ticks must be >= 1"));
        }
        if self.change_band_ticks < 0 {
            return Err(SimError::InvalidParams("change_band_ticks must be >= 0"));
        }
        if self.size_min == 0 {
            return Err(SimError::InvalidParams("size_min must be >= 1"));
        }
        if self.size_min > self.size_max {
            return Err(SimError::InvalidParams("size_min must be <= size_max"));
        }
        Ok(())
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            quote_band_ticks: 50,
            change_band_ticks: 500,
            size_min: 100_000,
            size_max: 1_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        assert!(SimParams::default().validate().is_ok());
    }

    #[test]
    fn test_params_reject_zero_band() {
        let params = SimParams {
            quote_band_ticks: 0,
            ..SimParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_params_reject_inverted_size_range() {
        let params = SimParams {
            size_min: 500,
            size_max: 100,
            ..SimParams::default()
        };
        assert!(params.validate().is_err());
    }
}
