use clap::Parser;
use region_directory::data_transfer::RegionName;
use shared_kernel::india_date_time::IndiaDateTime;
use slot_finder::configuration::Settings;
use tracing::{error, info};

/// Lists open 18+ vaccination slots across every district of a state, from
/// today to the end of the month.
#[derive(Parser, Debug)]
#[command(name = "slot_finder", version, about)]
struct Args {
    /// State name, exactly as the directory spells it.
    #[arg(default_value = "Delhi")]
    state: RegionName,
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
    info!(state = %args.state, %today, "Looking for slots");

    let stats = slot_finder::run_weekly(&settings, &args.state, today, &mut std::io::stdout()).await?;
    info!(issued = stats.issued, failed = stats.failed, "Done");
    Ok(())
}
