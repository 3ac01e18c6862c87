use crate::cache::load_or_fetch;
use crate::contracts::RegionDirectory;
use crate::data_transfer::{Region, RegionId, RegionListResponse, RegionName};
use crate::DirectoryError;
use itertools::Itertools;
use tracing::info;

const LIST_REGIONS_PATH: &str = "v2/admin/location/states";
const REGIONS_CACHE_FILE: &str = "states_list.json";

impl RegionDirectory {
    /// Looks `name` up in the region listing. Matching is exact and case
    /// sensitive; when nothing matches, the error carries every region whose
    /// name contains `name`.
    #[tracing::instrument(skip(self, name), fields(region = %name), level = "info")]
    pub async fn resolve_region(&self, name: &RegionName) -> Result<RegionId, DirectoryError> {
        let url = self.endpoint(LIST_REGIONS_PATH)?;
        let path = self.cache_path(REGIONS_CACHE_FILE);
        let listing: RegionListResponse = load_or_fetch(&path, || self.fetch(url)).await?;

        let region_id = find_region(&listing.states, name)?;
        info!(%region_id, "Returning region id");
        Ok(region_id)
    }
}

pub(crate) fn find_region(regions: &[Region], name: &RegionName) -> Result<RegionId, DirectoryError> {
    if let Some(region) = regions
        .iter()
        .find(|region| region.region_name == name.as_str())
    {
        return Ok(region.region_id);
    }

    let suggestions = regions
        .iter()
        .filter(|region| region.region_name.contains(name.as_str()))
        .map(|region| region.region_name.clone())
        .collect_vec();

    Err(DirectoryError::RegionNotFound {
        name: name.to_string(),
        suggestions,
    })
}
