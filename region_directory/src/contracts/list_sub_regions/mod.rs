use crate::cache::load_or_fetch;
use crate::contracts::RegionDirectory;
use crate::data_transfer::{RegionId, SubRegion, SubRegionListResponse};
use crate::DirectoryError;
use tracing::info;

const LIST_SUB_REGIONS_PATH: &str = "v2/admin/location/districts/";

fn cache_file_name(region_id: RegionId) -> String {
    format!("district_list_{region_id}.json")
}

impl RegionDirectory {
    /// Sub-regions of `region_id` in directory order. Each region gets its
    /// own cache file.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn list_sub_regions(
        &self,
        region_id: RegionId,
    ) -> Result<Vec<SubRegion>, DirectoryError> {
        let url = self.endpoint(&format!("{LIST_SUB_REGIONS_PATH}{region_id}"))?;
        let path = self.cache_path(&cache_file_name(region_id));
        let listing: SubRegionListResponse = load_or_fetch(&path, || self.fetch(url)).await?;

        info!(count = listing.districts.len(), "Returning sub-region list");
        Ok(listing.districts)
    }
}
