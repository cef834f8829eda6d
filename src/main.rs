//! Main entry point for the trade-journal-exporter CLI

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use trade_journal_exporter::cli::{Cli, Commands};

/// Initialize tracing subscriber with optional JSON formatting
fn init_tracing() {
    let json_format = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trade_journal_exporter=info"));

    if json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() {
    // A missing .env file is fine; flags and the real environment still apply
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export(ref args) => args.execute(&cli.data_dir).map_err(|e| anyhow::anyhow!(e)),
        Commands::Summary(ref args) => args.execute(&cli.data_dir).map_err(|e| anyhow::anyhow!(e)),
        Commands::Version => {
            println!("trade-journal-exporter v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        std::process::exit(1);
    }
}
