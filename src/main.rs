use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use portfolio_pulse::{Aggregator, Config, api};

#[derive(Parser)]
#[command(name = "portfolio-pulse")]
#[command(about = "Serve now-playing, chess rating and view count to the portfolio front-end")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on (or set BIND_ADDRESS env var)
        #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind: SocketAddr,
    },

    /// Show which integrations are configured
    CheckConfig,
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { bind } => serve(bind, &config).await?,
        Commands::CheckConfig => check_config(&config),
    }

    Ok(())
}

async fn serve(bind: SocketAddr, config: &Config) -> Result<()> {
    let missing = config.get_missing_config();
    if !missing.is_empty() {
        warn!("Running with missing configuration: {}", missing.join(", "));
    }

    let aggregator = Aggregator::from_config(config).context("Failed to initialize upstream clients")?;

    info!("Chess rating profile: {}", config.chess_username);

    api::serve(bind, Arc::new(aggregator))
        .await
        .context("Server error")?;

    Ok(())
}

fn check_config(config: &Config) {
    let status = |ok: bool| if ok { "configured" } else { "not configured" };

    println!("now-playing: {}", status(config.spotify_credentials().is_some()));
    println!("analytics:   {}", status(config.redis_url.is_some()));
    println!("chess:       configured ({})", config.chess_username);

    let missing = config.get_missing_config();
    if !missing.is_empty() {
        println!("\nMissing configuration:");
        for item in &missing {
            println!("   - {}", item);
        }
    }
}
