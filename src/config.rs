//! Configuration types for quotesim

use crate::instrument::{default_watchlist, Instrument};
use crate::sim::SimParams;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub book: BookConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Instrument catalog; the built-in watchlist when omitted
    #[serde(default)]
    pub instruments: Vec<InstrumentConfig>,
}

/// Simulation cadence and random-draw bands
#[derive(Debug, Clone, Deserialize)]
pub struct SimConfig {
    /// Refresh interval for all subscriptions
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    /// Maximum bid/ask offset from the reference mid, in ticks
    #[serde(default = "default_quote_band_ticks")]
    pub quote_band_ticks: i64,
    /// Day-change band, in ticks
    #[serde(default = "default_change_band_ticks")]
    pub change_band_ticks: i64,
    /// Smallest book level size
    #[serde(default = "default_size_min")]
    pub size_min: u64,
    /// Largest book level size
    #[serde(default = "default_size_max")]
    pub size_max: u64,
    /// Optional seed for deterministic output
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Depth-of-market panel defaults
#[derive(Debug, Clone, Deserialize)]
pub struct BookConfig {
    /// Levels per side
    #[serde(default = "default_level_count")]
    pub level_count: usize,
    /// Price increment between adjacent levels
    #[serde(default = "default_book_tick_size")]
    pub tick_size: Decimal,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// One `[[instruments]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentConfig {
    pub symbol: String,
    pub name: String,
    pub reference_mid: Decimal,
    pub tick_size: Decimal,
}

fn default_refresh_interval_ms() -> u64 {
    3000
}
fn default_quote_band_ticks() -> i64 {
    50
}
fn default_change_band_ticks() -> i64 {
    500
}
fn default_size_min() -> u64 {
    100_000
}
fn default_size_max() -> u64 {
    1_000_000
}
fn default_level_count() -> usize {
    10
}
fn default_book_tick_size() -> Decimal {
    Decimal::new(1, 5) // 0.00001
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval_ms(),
            quote_band_ticks: default_quote_band_ticks(),
            change_band_ticks: default_change_band_ticks(),
            size_min: default_size_min(),
            size_max: default_size_max(),
            seed: None,
        }
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            level_count: default_level_count(),
            tick_size: default_book_tick_size(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Simulation parameters from the `[sim]` section
    pub fn sim_params(&self) -> SimParams {
        SimParams {
            quote_band_ticks: self.sim.quote_band_ticks,
            change_band_ticks: self.sim.change_band_ticks,
            size_min: self.sim.size_min,
            size_max: self.sim.size_max,
        }
    }

    /// Configured instruments, or the built-in watchlist when none are given
    pub fn instruments(&self) -> Vec<Instrument> {
        if self.instruments.is_empty() {
            return default_watchlist();
        }
        self.instruments
            .iter()
            .map(|i| {
                Instrument::new(
                    i.symbol.clone(),
                    i.name.clone(),
                    i.reference_mid,
                    i.tick_size,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.sim.refresh_interval_ms, 3000);
        assert_eq!(config.book.level_count, 10);
        assert_eq!(config.book.tick_size, dec!(0.00001));
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.sim.seed.is_none());
        // Falls back to the full built-in watchlist
        assert_eq!(config.instruments().len(), 22);
    }

    #[test]
    fn test_default_impls_match_serde_defaults() {
        // Empty TOML exercises the per-field serde defaults; the Default
        // impls must agree with them field for field
        let parsed: Config = toml::from_str("").unwrap();

        let sim = SimConfig::default();
        assert_eq!(parsed.sim.refresh_interval_ms, sim.refresh_interval_ms);
        assert_eq!(parsed.sim.quote_band_ticks, sim.quote_band_ticks);
        assert_eq!(parsed.sim.change_band_ticks, sim.change_band_ticks);
        assert_eq!(parsed.sim.size_min, sim.size_min);
        assert_eq!(parsed.sim.size_max, sim.size_max);
        assert_eq!(parsed.sim.seed, sim.seed);

        let book = BookConfig::default();
        assert_eq!(parsed.book.level_count, book.level_count);
        assert_eq!(parsed.book.tick_size, book.tick_size);

        let telemetry = TelemetryConfig::default();
        assert_eq!(parsed.telemetry.log_level, telemetry.log_level);
    }

    #[test]
    fn test_full_config_parses() {
        let toml = r#"
            [sim]
            refresh_interval_ms = 500
            quote_band_ticks = 25
            change_band_ticks = 100
            size_min = 1000
            size_max = 5000
            seed = 42

            [book]
            level_count = 5
            tick_size = "0.01"

            [telemetry]
            log_level = "debug"

            [[instruments]]
            symbol = "AAPL"
            name = "Apple Inc."
            reference_mid = "227.88"
            tick_size = "0.01"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.sim.refresh_interval_ms, 500);
        assert_eq!(config.sim.seed, Some(42));
        assert_eq!(config.book.level_count, 5);
        assert_eq!(config.telemetry.log_level, "debug");

        let instruments = config.instruments();
        assert_eq!(instruments.len(), 1);
        assert_eq!(instruments[0].symbol, "AAPL");
        assert_eq!(instruments[0].reference_mid, dec!(227.88));
    }

    #[test]
    fn test_sim_params_mapping() {
        let config: Config = toml::from_str("[sim]\nquote_band_ticks = 7").unwrap();
        let params = config.sim_params();
        assert_eq!(params.quote_band_ticks, 7);
        assert_eq!(params.change_band_ticks, 500);
        assert!(params.validate().is_ok());
    }
}
