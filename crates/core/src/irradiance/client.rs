//! Irradiance Client - fallback adapter over an irradiance provider.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use solarbond_irradiance::{Coordinates, IrradianceProvider};

use super::irradiance_model::{IrradianceFetch, FALLBACK_IRRADIANCE};

/// Wraps a provider so that a fetch always yields a usable series.
///
/// Any provider error (bad status, malformed body, missing parameter,
/// timeout) becomes [`IrradianceFetch::Degraded`] holding one
/// [`FALLBACK_IRRADIANCE`] reading at the start date. The error is logged
/// and kept as the degradation cause.
pub struct IrradianceClient {
    provider: Arc<dyn IrradianceProvider>,
}

impl IrradianceClient {
    pub fn new(provider: Arc<dyn IrradianceProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    pub async fn fetch_range(
        &self,
        coords: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> IrradianceFetch {
        match self.provider.fetch_daily(coords, start, end).await {
            Ok(series) => {
                debug!(
                    "{} returned {} irradiance readings for {}..{}",
                    self.provider.id(),
                    series.len(),
                    start,
                    end
                );
                IrradianceFetch::Nominal(series)
            }
            Err(e) => {
                warn!(
                    "[IRRADIANCE FALLBACK] {} failed for ({}, {}) {}..{}: {}. Using {} kWh/m²/day",
                    self.provider.id(),
                    coords.latitude,
                    coords.longitude,
                    start,
                    end,
                    e,
                    FALLBACK_IRRADIANCE
                );
                IrradianceFetch::fallback(start, e.to_string())
            }
        }
    }
}
