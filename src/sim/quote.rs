//! Quote generation
//!
//! A two-sided top-of-book quote perturbed around the instrument's reference
//! mid. Offsets are drawn as whole tick counts so the arithmetic stays exact
//! in `Decimal`.

use super::{SimError, SimParams};
use crate::instrument::Instrument;
use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One generated price snapshot, superseded (never mutated) on the next tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Instrument symbol
    pub symbol: String,
    /// Bid price, always strictly below ask
    pub bid: Decimal,
    /// Ask price
    pub ask: Decimal,
    /// `(ask - bid)` expressed in the instrument's ticks
    pub spread_ticks: Decimal,
    /// Signed deviation from the reference mid
    pub change_abs: Decimal,
    /// `change_abs / reference_mid * 100`
    pub change_pct: Decimal,
    /// Wall-clock time of generation
    pub generated_at: DateTime<Utc>,
}

impl Quote {
    /// Midpoint of the generated quote
    pub fn mid(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }
}

/// Generate a fresh quote for `instrument`.
///
/// Bid and ask each draw an independent offset of `1..=quote_band_ticks`
/// ticks from the reference mid (bid below, ask above), so `bid < ask` holds
/// by construction. The day change draws one signed offset within
/// `change_band_ticks`.
pub fn generate_quote(
    instrument: &Instrument,
    params: &SimParams,
    rng: &mut impl Rng,
) -> Result<Quote, SimError> {
    instrument.validate()?;
    params.validate()?;

    let tick = instrument.tick_size;
    let mid = instrument.reference_mid;

    let bid_offset = Decimal::from(rng.gen_range(1..=params.quote_band_ticks)) * tick;
    let ask_offset = Decimal::from(rng.gen_range(1..=params.quote_band_ticks)) * tick;
    let bid = mid - bid_offset;
    let ask = mid + ask_offset;

    let change_ticks = rng.gen_range(-params.change_band_ticks..=params.change_band_ticks);
    let change_abs = Decimal::from(change_ticks) * tick;
    let change_pct = change_abs / mid * dec!(100);

    Ok(Quote {
        symbol: instrument.symbol.clone(),
        bid,
        ask,
        spread_ticks: (ask - bid) / tick,
        change_abs,
        change_pct,
        generated_at: Utc::now(),
    })
}
