use clap::Parser;
use quotesim::cli::{Cli, Commands};
use quotesim::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    let _guard = quotesim::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting quote stream");
            args.execute(&config).await?;
        }
        Commands::Book(args) => {
            tracing::info!("Starting order book stream");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Refresh: {}ms", config.sim.refresh_interval_ms);
            println!(
                "  Quote band: {} ticks, change band: {} ticks",
                config.sim.quote_band_ticks, config.sim.change_band_ticks
            );
            println!(
                "  Book: {} levels @ {} tick",
                config.book.level_count, config.book.tick_size
            );
            println!("  Instruments: {}", config.instruments().len());
            for instrument in config.instruments() {
                println!(
                    "    {:<12} {} (mid {})",
                    instrument.symbol, instrument.name, instrument.reference_mid
                );
            }
        }
    }

    Ok(())
}
