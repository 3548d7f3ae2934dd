//! Run command implementation

use crate::config::Config;
use crate::portfolio::{sample_positions, PositionBook};
use crate::sim::MarketSimulator;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Emit each market snapshot as one JSON line
    #[arg(long)]
    pub json: bool,

    /// Stop after this many ticks (runs until ctrl-c when omitted)
    #[arg(long)]
    pub ticks: Option<u64>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut sim = MarketSimulator::new(config.instruments(), config.sim_params())?;
        if let Some(seed) = config.sim.seed {
            sim = sim.with_seed(seed);
        }

        let interval = Duration::from_millis(config.sim.refresh_interval_ms);
        let mut sub = sim.subscribe_market(interval)?;
        let mut positions = PositionBook::new(sample_positions());
        let mut delivered = 0u64;

        tracing::info!(interval_ms = config.sim.refresh_interval_ms, "Streaming market snapshots");

        loop {
            tokio::select! {
                snapshot = sub.recv() => {
                    let Some(snapshot) = snapshot else { break };
                    positions.mark_all(&snapshot.quotes);

                    if self.json {
                        println!("{}", serde_json::to_string(&snapshot)?);
                    } else {
                        for quote in &snapshot.quotes {
                            println!(
                                "{:<12} bid {:>12} ask {:>12} chg {:>10} ({:>6}%)",
                                quote.symbol,
                                quote.bid,
                                quote.ask,
                                quote.change_abs,
                                quote.change_pct.round_dp(2),
                            );
                        }
                        println!(
                            "unrealized P&L: {}",
                            positions.total_unrealized().round_dp(2)
                        );
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
