use serde::{Deserialize, Serialize};
use shared_kernel::{non_empty_string, numeric_key};

numeric_key!(RegionId);
numeric_key!(SubRegionId);

non_empty_string!(RegionName);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Region {
    #[serde(rename = "state_id")]
    pub region_id: RegionId,
    #[serde(rename = "state_name")]
    pub region_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubRegion {
    #[serde(rename = "district_id")]
    pub sub_region_id: SubRegionId,
    #[serde(rename = "district_name")]
    pub sub_region_name: String,
}

/// Only the listing is decoded; the rest of the payload (`ttl`, ...) is kept
/// untouched in the cache file.
#[derive(Debug, Deserialize)]
pub(crate) struct RegionListResponse {
    pub states: Vec<Region>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubRegionListResponse {
    pub districts: Vec<SubRegion>,
}
