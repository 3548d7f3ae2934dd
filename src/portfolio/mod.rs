//! Position marking
//!
//! Backs the terminal's positions table: open positions marked to the latest
//! quote mid, with signed unrealized P&L per side.

use crate::sim::Quote;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Direction of an open position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

/// An open position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Instrument symbol
    pub symbol: String,
    /// Long or short
    pub side: PositionSide,
    /// Position quantity
    pub qty: Decimal,
    /// Average entry price
    pub avg_entry: Decimal,
    /// Latest mark price
    pub mark_price: Decimal,
    /// Current unrealized P&L at the mark
    pub unrealized_pnl: Decimal,
}

impl Position {
    /// Open a position; marked at entry until the first quote arrives
    pub fn new(
        symbol: impl Into<String>,
        side: PositionSide,
        qty: Decimal,
        avg_entry: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            qty,
            avg_entry,
            mark_price: avg_entry,
            unrealized_pnl: dec!(0),
        }
    }

    /// Re-mark against a new price
    pub fn mark(&mut self, mark_price: Decimal) {
        self.mark_price = mark_price;
        self.unrealized_pnl = match self.side {
            PositionSide::Long => (mark_price - self.avg_entry) * self.qty,
            PositionSide::Short => (self.avg_entry - mark_price) * self.qty,
        };
    }
}

/// All open positions for an account
#[derive(Debug, Clone, Default)]
pub struct PositionBook {
    positions: Vec<Position>,
}

impl PositionBook {
    /// Create a book over the given positions
    pub fn new(positions: Vec<Position>) -> Self {
        Self { positions }
    }

    /// Open positions, in insertion order
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Re-mark every position matching a quote's symbol at the quote mid
    pub fn mark_all(&mut self, quotes: &[Quote]) {
        for quote in quotes {
            let mid = quote.mid();
            for position in self.positions.iter_mut() {
                if position.symbol == quote.symbol {
                    position.mark(mid);
                }
            }
        }
    }

    /// Sum of unrealized P&L across the book
    pub fn total_unrealized(&self) -> Decimal {
        self.positions.iter().map(|p| p.unrealized_pnl).sum()
    }
}

/// The terminal's sample positions
pub fn sample_positions() -> Vec<Position> {
    vec![
        Position::new("FX:EURUSD", PositionSide::Long, dec!(10000), dec!(1.105)),
        Position::new("FX:GBPUSD", PositionSide::Short, dec!(5000), dec!(1.25)),
    ]
}
