use crate::configuration::Settings;
use anyhow::Context;
use chrono::NaiveDate;
use region_directory::data_transfer::{RegionName, SubRegion};
use region_directory::RegionDirectory;
use shared_kernel::date_time::query_date::QueryDate;
use shared_kernel::http_client::{ClientIdentity, HttpClient};
use slot_availability::{presenter, AvailabilityAggregator, QueryStats, SlotQueryClient};
use std::io::Write;
use tracing::info;

pub mod configuration;

/// Everything a run needs, built once from the settings. The client identity
/// is picked here and shared by every request of the run.
struct SlotFinder {
    directory: RegionDirectory,
    aggregator: AvailabilityAggregator<SlotQueryClient>,
}

impl SlotFinder {
    fn new(settings: &Settings) -> anyhow::Result<Self> {
        let identity =
            ClientIdentity::choose_from(settings.api.language.clone(), &settings.api.user_agents)?;
        info!(user_agent = identity.user_agent(), "Using client identity");

        let http_client = HttpClient::new(&identity).context("Failed to build http client")?;
        let base_url = settings.api.endpoint_root()?;

        let directory = RegionDirectory::new(
            http_client.clone(),
            base_url.clone(),
            settings.cache.directory.clone(),
        );
        let aggregator = AvailabilityAggregator::new(SlotQueryClient::new(http_client, base_url));

        Ok(Self {
            directory,
            aggregator,
        })
    }

    async fn sub_regions(&self, region_name: &RegionName) -> anyhow::Result<Vec<SubRegion>> {
        let region_id = self.directory.resolve_region(region_name).await?;
        let sub_regions = self.directory.list_sub_regions(region_id).await?;
        info!(count = sub_regions.len(), "Resolved sub-regions");
        Ok(sub_regions)
    }
}

/// Week mode: every sub-region of `region_name`, from `today` to the end of
/// its month in 7-day steps. The report is written once everything is in.
pub async fn run_weekly<W: Write + Send>(
    settings: &Settings,
    region_name: &RegionName,
    today: NaiveDate,
    out: &mut W,
) -> anyhow::Result<QueryStats> {
    let finder = SlotFinder::new(settings)?;
    let sub_regions = finder.sub_regions(region_name).await?;
    let dates = QueryDate::weekly_window(today);

    let (result, stats) = finder.aggregator.run_week(&sub_regions, &dates).await?;
    presenter::render(&result, out).context("Failed to write the report")?;
    Ok(stats)
}

/// Day mode: every sub-region of `region_name`, every day of the month.
/// Matches are written as they come in.
pub async fn run_daily<W: Write + Send>(
    settings: &Settings,
    region_name: &RegionName,
    month: u32,
    year: i32,
    out: &mut W,
) -> anyhow::Result<QueryStats> {
    let dates = QueryDate::days_of_month(month, year);
    anyhow::ensure!(!dates.is_empty(), "{month} is not a valid month");

    let finder = SlotFinder::new(settings)?;
    let sub_regions = finder.sub_regions(region_name).await?;

    let stats = finder.aggregator.run_day(&sub_regions, &dates, out).await?;
    Ok(stats)
}
