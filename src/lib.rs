//! quotesim: synthetic market data behind a multi-panel trading terminal
//!
//! This library provides the core components for:
//! - Instrument catalog with the terminal's default watchlist
//! - Random-walk quote generation (bid/ask/spread/day change)
//! - Synthetic depth-of-market order book snapshots
//! - Timer-driven subscriptions with cancellable handles
//! - Position marking for the positions table
//! - Structured logging and metrics

pub mod cli;
pub mod config;
pub mod instrument;
pub mod portfolio;
pub mod sim;
pub mod telemetry;
