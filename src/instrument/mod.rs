//! Instrument catalog
//!
//! Tradable symbols with the reference prices that anchor the random walk

use crate::sim::SimError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A tradable instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    /// Exchange-qualified symbol, e.g. "FX:EURUSD"
    pub symbol: String,
    /// Display name
    pub name: String,
    /// Baseline price anchoring generated quotes
    pub reference_mid: Decimal,
    /// Quoting precision (minimum price increment)
    pub tick_size: Decimal,
}

impl Instrument {
    /// Create a new instrument
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        reference_mid: Decimal,
        tick_size: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            reference_mid,
            tick_size,
        }
    }

    /// Check the pricing invariants: positive reference mid, positive tick
    pub fn validate(&self) -> Result<(), SimError> {
        if self.reference_mid <= Decimal::ZERO {
            return Err(SimError::InvalidReferencePrice {
                symbol: self.symbol.clone(),
                price: self.reference_mid,
            });
        }
        if self.tick_size <= Decimal::ZERO {
            return Err(SimError::InvalidTickSize(self.tick_size));
        }
        Ok(())
    }
}

/// The terminal's default watchlist: the FX majors shown in the quick-trade
/// and positions panels plus the full "Stocks US" panel catalog.
pub fn default_watchlist() -> Vec<Instrument> {
    vec![
        Instrument::new("FX:EURUSD", "Euro/US Dollar", dec!(1.16831), dec!(0.00001)),
        Instrument::new("FX:GBPUSD", "Pound/US Dollar", dec!(1.34366), dec!(0.00001)),
        Instrument::new("AAPL", "Apple Inc.", dec!(227.88), dec!(0.01)),
        Instrument::new("CVX", "Chevron Corp.", dec!(156.38), dec!(0.01)),
        Instrument::new("CSCO", "Cisco Systems Inc.", dec!(67.86), dec!(0.01)),
        Instrument::new("KO", "Coca-Cola Co.", dec!(67.35), dec!(0.01)),
        Instrument::new("GS", "Goldman Sachs", dec!(765.73), dec!(0.01)),
        Instrument::new("INTC", "Intel Corp.", dec!(24.40), dec!(0.01)),
        Instrument::new("IBM", "International Business Mac.", dec!(259.26), dec!(0.01)),
        Instrument::new("XOM", "Exxon Mobil Corporation", dec!(111.27), dec!(0.01)),
        Instrument::new("JPM", "JPMorgan Chase & Co.", dec!(298.73), dec!(0.01)),
        Instrument::new("JNJ", "Johnson & Johnson", dec!(174.64), dec!(0.01)),
        Instrument::new("MCD", "McDonald's Corp.", dec!(306.18), dec!(0.01)),
        Instrument::new("MRK", "Merck & Co. Inc.", dec!(83.64), dec!(0.01)),
        Instrument::new("MSFT", "Microsoft Corp.", dec!(499.55), dec!(0.01)),
        Instrument::new("PFE", "Pfizer Inc.", dec!(24.52), dec!(0.01)),
        Instrument::new("PG", "Procter & Gamble Co.", dec!(156.19), dec!(0.01)),
        Instrument::new("VZ", "Verizon Comms", dec!(43.06), dec!(0.01)),
        Instrument::new("WMT", "Walmart Inc.", dec!(100.91), dec!(0.01)),
        Instrument::new("V", "Visa Inc.", dec!(336.70), dec!(0.01)),
        Instrument::new("TRV", "The Travelers Companies I.", dec!(269.91), dec!(0.01)),
        Instrument::new("UNH", "UnitedHealth Group Inc.", dec!(342.81), dec!(0.01)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_new() {
        let inst = Instrument::new("FX:EURUSD", "Euro/US Dollar", dec!(1.16831), dec!(0.00001));
        assert_eq!(inst.symbol, "FX:EURUSD");
        assert_eq!(inst.reference_mid, dec!(1.16831));
        assert!(inst.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_mid() {
        let inst = Instrument::new("BAD", "Bad", dec!(0), dec!(0.01));
        assert!(matches!(
            inst.validate(),
            Err(SimError::InvalidReferencePrice { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_mid() {
        let inst = Instrument::new("BAD", "Bad", dec!(-1.5), dec!(0.01));
        assert!(inst.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_tick() {
        let inst = Instrument::new("BAD", "Bad", dec!(100), dec!(0));
        assert!(matches!(inst.validate(), Err(SimError::InvalidTickSize(_))));
    }

    #[test]
    fn test_default_watchlist_is_valid() {
        let watchlist = default_watchlist();
        assert!(!watchlist.is_empty());
        for inst in &watchlist {
            inst.validate().unwrap();
        }
    }

    #[test]
    fn test_default_watchlist_covers_full_stocks_panel() {
        let watchlist = default_watchlist();
        // Two FX majors plus all twenty "Stocks US" rows
        assert_eq!(watchlist.len(), 22);

        for symbol in [
            "FX:EURUSD",
            "FX:GBPUSD",
            "AAPL",
            "CVX",
            "CSCO",
            "KO",
            "GS",
            "INTC",
            "IBM",
            "XOM",
            "JPM",
            "JNJ",
            "MCD",
            "MRK",
            "MSFT",
            "PFE",
            "PG",
            "VZ",
            "WMT",
            "V",
            "TRV",
            "UNH",
        ] {
            assert!(
                watchlist.iter().any(|i| i.symbol == symbol),
                "missing {symbol}"
            );
        }
    }

    #[test]
    fn test_default_watchlist_unique_symbols() {
        let watchlist = default_watchlist();
        let mut symbols: Vec<_> = watchlist.iter().map(|i| i.symbol.clone()).collect();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), watchlist.len());
    }
}
