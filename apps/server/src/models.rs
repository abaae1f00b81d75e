use serde::{Deserialize, Serialize};
use solarbond_core::bonds::Bond;
use solarbond_core::production::ProductionRecord;

/// Contents of the `SB_SEED_FILE` loaded at startup.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub bonds: Vec<Bond>,
    #[serde(default)]
    pub production: Vec<ProductionRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResponse {
    pub upserted: usize,
}
