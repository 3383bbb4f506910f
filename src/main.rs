//! Bass advisor: lure recommendations from live weather.
//!
//! `serve` runs the HTTP gateway in front of OpenWeatherMap and a local
//! Ollama model. `advise` runs the client flow against a running server and
//! falls back to the rule engine when the model is unavailable.

mod advisor;
mod config;
mod server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use common::{Clarity, Species};
use tracing::{error, info};

use advisor::{render, AdviseRequest, AdvisorClient};

/// Bass fishing lure advisor
#[derive(Parser)]
#[command(name = "bass-advisor", about = "Bass fishing lure advisor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Fetch weather and print lure picks for a location.
    Advise {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// smallmouth, largemouth or spotted.
        #[arg(long)]
        species: Species,
        /// Measured water temperature in °F.
        #[arg(long)]
        water_temp: Option<f64>,
        /// clear, stained or muddy.
        #[arg(long)]
        clarity: Option<Clarity>,
        /// Base URL of a running server; defaults to the configured bind address.
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bass_advisor=info,openweather_client=info,ollama_client=info,lure_engine=info,tower_http=info".into()
            }),
        )
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let outcome = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Bass advisor starting up...");
            server::run(cfg).await
        }
        Command::Advise {
            lat,
            lon,
            species,
            water_temp,
            clarity,
            server,
        } => {
            let base_url = server.unwrap_or_else(|| {
                format!("http://{}:{}", cfg.server.bind_addr, cfg.server.port)
            });
            let request = AdviseRequest {
                lat,
                lon,
                species,
                water_temp_f: water_temp,
                clarity,
            };
            advise(&base_url, &request).await
        }
    };

    if let Err(e) = outcome {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn advise(base_url: &str, request: &AdviseRequest) -> Result<()> {
    let client = AdvisorClient::new(base_url)?;
    let advice = client.advise(request).await?;
    info!("{} picks from {:?}", advice.picks.len(), advice.source);
    print!("{}", render(&advice));
    Ok(())
}
