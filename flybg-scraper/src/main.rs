use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use flybg_scraper::config;
use flybg_scraper::logging;
use flybg_scraper::module::flybg::{FlyBgClient, RouteQuery};

/// Search flybulgarien.dk for flights on a route and date
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Departure airport IATA code
    departure: String,

    /// Arrival airport IATA code
    arrival: String,

    /// Departure date, DD-MM-YYYY
    departure_date: String,

    /// Adults and children
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    passengers: u32,

    /// TOML config file (defaults to ./flybg.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = config::read_config(args.config.as_deref())?;
    let _logging_guard = logging::init_logging(
        config.log_dir.as_deref().map(Path::new),
        "flybg",
        &config.log_level,
    )?;

    tracing::info!(
        "Searching {} -> {} on {} for {} passenger(s) at {}",
        args.departure,
        args.arrival,
        args.departure_date,
        args.passengers,
        config.base_url
    );

    let client = FlyBgClient::new(config).context("Failed to build HTTP client")?;
    let route = RouteQuery::new(
        client,
        &args.departure,
        &args.arrival,
        &args.departure_date,
        Some(args.passengers),
    )?;

    route.run().await.context("Flight search failed")?;

    Ok(())
}
