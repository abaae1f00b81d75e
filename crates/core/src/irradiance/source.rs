use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use solarbond_irradiance::Coordinates;

use super::client::IrradianceClient;
use super::irradiance_model::IrradianceFetch;

/// Where the audit service gets irradiance from.
///
/// Implementations never fail: an unusable upstream is reported through
/// [`IrradianceFetch::Degraded`].
#[async_trait]
pub trait IrradianceSourceTrait: Send + Sync {
    async fn get_range(
        &self,
        coords: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> IrradianceFetch;
}

/// Uncached source: every call goes to the provider.
pub struct DirectIrradianceSource {
    client: Arc<IrradianceClient>,
}

impl DirectIrradianceSource {
    pub fn new(client: Arc<IrradianceClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IrradianceSourceTrait for DirectIrradianceSource {
    async fn get_range(
        &self,
        coords: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> IrradianceFetch {
        self.client.fetch_range(coords, start, end).await
    }
}
