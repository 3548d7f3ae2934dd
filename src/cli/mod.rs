//! CLI interface for quotesim
//!
//! Provides subcommands for:
//! - `run`: stream watchlist quotes and mark the sample positions
//! - `book`: stream depth-of-market snapshots for one symbol
//! - `config`: show current configuration

mod book;
mod run;

pub use book::BookArgs;
pub use run::RunArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quotesim")]
#[command(about = "Synthetic market-data and order-book simulator")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Stream watchlist quotes
    Run(RunArgs),
    /// Stream depth-of-market snapshots for one symbol
    Book(BookArgs),
    /// Show current configuration
    Config,
}
