//! Synthetic depth-of-market order book
//!
//! Levels ladder away from the reference mid by whole tick increments with
//! uniformly drawn sizes. Both sides derive from the same positive anchor, so
//! the book is never crossed.

use super::{SimError, SimParams};
use crate::instrument::Instrument;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Book side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// One price/size rung on one side of the book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookLevel {
    /// Which side this level sits on
    pub side: Side,
    /// Price at this level
    pub price: Decimal,
    /// Size at this level
    pub size: Decimal,
    /// Running total across all levels at-or-better on this side
    pub cumulative_size: Decimal,
}

/// The full simulated book for one instrument at one tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// Instrument symbol
    pub symbol: String,
    /// Bid levels, best (highest) first
    pub bids: Vec<BookLevel>,
    /// Ask levels, best (lowest) first
    pub asks: Vec<BookLevel>,
    /// `(best_ask + best_bid) / 2`
    pub mid_price: Decimal,
    /// `best_ask - best_bid`, always positive
    pub spread: Decimal,
    /// Wall-clock time of generation
    pub generated_at: DateTime<Utc>,
}

impl OrderBookSnapshot {
    /// Best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|l| l.price)
    }

    /// Best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|l| l.price)
    }

    /// Total size resting on the bid side
    pub fn bid_depth(&self) -> Decimal {
        self.bids.last().map(|l| l.cumulative_size).unwrap_or_default()
    }

    /// Total size resting on the ask side
    pub fn ask_depth(&self) -> Decimal {
        self.asks.last().map(|l| l.cumulative_size).unwrap_or_default()
    }
}

/// Build one ladder side. `direction` is -1 for bids, +1 for asks.
fn build_side(
    side: Side,
    direction: Decimal,
    reference_mid: Decimal,
    level_count: usize,
    tick_size: Decimal,
    params: &SimParams,
    rng: &mut impl Rng,
) -> Vec<BookLevel> {
    let mut levels = Vec::with_capacity(level_count);
    let mut cumulative = Decimal::ZERO;

    for i in 0..level_count {
        let offset = Decimal::from(i as u64 + 1) * tick_size;
        let size = Decimal::from(rng.gen_range(params.size_min..=params.size_max));
        cumulative += size;
        levels.push(BookLevel {
            side,
            price: reference_mid + direction * offset,
            size,
            cumulative_size: cumulative,
        });
    }

    levels
}

/// Generate a fresh order book snapshot for `instrument`.
///
/// Level `i` (0-based) sits `(i+1) * tick_size` away from the reference mid
/// on each side; requesting zero levels is an error because mid and spread
/// are defined from level 0.
pub fn generate_order_book(
    instrument: &Instrument,
    level_count: usize,
    tick_size: Decimal,
    params: &SimParams,
    rng: &mut impl Rng,
) -> Result<OrderBookSnapshot, SimError> {
    instrument.validate()?;
    params.validate()?;
    if level_count == 0 {
        return Err(SimError::InvalidLevelCount);
    }
    if tick_size <= Decimal::ZERO {
        return Err(SimError::InvalidTickSize(tick_size));
    }

    let mid = instrument.reference_mid;
    let bids = build_side(
        Side::Buy,
        Decimal::NEGATIVE_ONE,
        mid,
        level_count,
        tick_size,
        params,
        rng,
    );
    let asks = build_side(
        Side::Sell,
        Decimal::ONE,
        mid,
        level_count,
        tick_size,
        params,
        rng,
    );

    let best_bid = bids[0].price;
    let best_ask = asks[0].price;

    Ok(OrderBookSnapshot {
        symbol: instrument.symbol.clone(),
        bids,
        asks,
        mid_price: (best_ask + best_bid) / Decimal::TWO,
        spread: best_ask - best_bid,
        generated_at: Utc::now(),
    })
}
