//! Book command implementation

use crate::config::Config;
use crate::sim::MarketSimulator;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct BookArgs {
    /// Instrument symbol
    #[arg(default_value = "FX:EURUSD")]
    pub symbol: String,

    /// Levels per side (defaults to the configured level count)
    #[arg(long)]
    pub levels: Option<usize>,

    /// Emit each snapshot as one JSON line
    #[arg(long)]
    pub json: bool,

    /// Stop after this many ticks (runs until ctrl-c when omitted)
    #[arg(long)]
    pub ticks: Option<u64>,
}

impl BookArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut sim = MarketSimulator::new(config.instruments(), config.sim_params())?;
        if let Some(seed) = config.sim.seed {
            sim = sim.with_seed(seed);
        }

        let interval = Duration::from_millis(config.sim.refresh_interval_ms);
        let level_count = self.levels.unwrap_or(config.book.level_count);
        let mut sub =
            sim.subscribe_book(&self.symbol, interval, level_count, config.book.tick_size)?;
        let mut delivered = 0u64;

        tracing::info!(symbol = %self.symbol, level_count, "Streaming order book snapshots");

        loop {
            tokio::select! {
                snapshot = sub.recv() => {
                    let Some(book) = snapshot else { break };

                    if self.json {
                        println!("{}", serde_json::to_string(&book)?);
                    } else {
                        // Ladder view: asks top-down, then mid, then bids
                        for level in book.asks.iter().rev() {
                            println!("{:>14}  {:>10}  {:>12}", level.price, level.size, level.cumulative_size);
                        }
                        println!("---- mid {} / spread {} ----", book.mid_price, book.spread);
                        for level in &book.bids {
                            println!("{:>14}  {:>10}  {:>12}", level.price, level.size, level.cumulative_size);
                        }
                        println!();
                    }

                    delivered += 1;
                    if let Some(limit) = self.ticks {
                        if delivered >= limit {
                            break;
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutting down");
                    break;
                }
            }
        }

        sub.cancel();
        Ok(())
    }
}
