use chrono::Datelike;
use clap::Parser;
use region_directory::data_transfer::RegionName;
use shared_kernel::india_date_time::IndiaDateTime;
use slot_finder::configuration::Settings;
use tracing::{error, info};

/// Checks every day of a month, one district at a time, printing matches as
/// they are found.
#[derive(Parser, Debug)]
#[command(name = "daily_slots", version, about)]
struct Args {
    /// State name, exactly as the directory spells it.
    #[arg(default_value = "Delhi")]
    state: RegionName,

    /// Month to scan, defaults to the current month in India.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Year to scan, defaults to the current year in India.
    #[arg(long)]
    year: Option<i32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::parse()?;
    shared_kernel::tracing::config_telemetry(settings.logging.json)?;

    if let Err(err) = start(args, settings).await {
        error!("{err:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn start(args: Args, settings: Settings) -> anyhow::Result<()> {
    let today = IndiaDateTime::now().date();
    let month = args.month.unwrap_or_else(|| today.month());
    let year = args.year.unwrap_or_else(|| today.year());
    info!(state = %args.state, month, year, "Looking for slots");

    let stats =
        slot_finder::run_daily(&settings, &args.state, month, year, &mut std::io::stdout()).await?;
    info!(issued = stats.issued, failed = stats.failed, "Done");
    Ok(())
}
