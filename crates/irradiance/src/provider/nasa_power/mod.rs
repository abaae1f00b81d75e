//! NASA POWER irradiance provider implementation.
//!
//! Fetches the `ALLSKY_SFC_SW_DWN` parameter (all-sky surface shortwave
//! downward irradiance, kWh/m²/day) from the POWER daily point API using the
//! renewable-energy community.
//!
//! API documentation: https://power.larc.nasa.gov/docs/services/api/temporal/daily/

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::errors::IrradianceError;
use crate::models::{Coordinates, IrradianceSeries};
use crate::provider::IrradianceProvider;

pub const DEFAULT_BASE_URL: &str = "https://power.larc.nasa.gov/api/temporal/daily/point";
pub const GHI_PARAMETER: &str = "ALLSKY_SFC_SW_DWN";

const PROVIDER_ID: &str = "NASA_POWER";
const COMMUNITY: &str = "RE";
const DATE_FORMAT: &str = "%Y%m%d";

// ============================================================================
// Response structures for the POWER API
// ============================================================================

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: Option<PowerProperties>,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    #[serde(default)]
    parameter: BTreeMap<String, BTreeMap<String, f64>>,
}

// ============================================================================
// NasaPowerProvider
// ============================================================================

/// Connection settings for [`NasaPowerProvider`].
#[derive(Debug, Clone)]
pub struct NasaPowerConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for NasaPowerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// NASA POWER daily irradiance provider.
pub struct NasaPowerProvider {
    client: Client,
    base_url: String,
}

impl NasaPowerProvider {
    pub fn new(config: NasaPowerConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url,
        }
    }

    fn query_params(
        coords: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("parameters", GHI_PARAMETER.to_string()),
            ("community", COMMUNITY.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("latitude", coords.latitude.to_string()),
            ("start", start.format(DATE_FORMAT).to_string()),
            ("end", end.format(DATE_FORMAT).to_string()),
            ("format", "JSON".to_string()),
        ]
    }

    async fn fetch(&self, params: &[(&'static str, String)]) -> Result<String, IrradianceError> {
        debug!("NASA POWER request: {} with {:?}", self.base_url, params);

        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IrradianceError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    IrradianceError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IrradianceError::HttpStatus {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                IrradianceError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                IrradianceError::Network(format!("Failed to read response: {}", e))
            }
        })
    }
}

/// Parse a POWER JSON body into a series.
///
/// Values below zero are the API's fill value for days without a reading
/// (`-999`) and are left out of the series.
fn parse_response(body: &str) -> Result<IrradianceSeries, IrradianceError> {
    let response: PowerResponse = serde_json::from_str(body)
        .map_err(|e| IrradianceError::MalformedResponse(e.to_string()))?;

    let mut parameters = response
        .properties
        .ok_or_else(|| IrradianceError::MalformedResponse("missing properties".to_string()))?
        .parameter;

    let readings = parameters
        .remove(GHI_PARAMETER)
        .ok_or_else(|| IrradianceError::MissingParameter(GHI_PARAMETER.to_string()))?;

    let mut points = Vec::with_capacity(readings.len());
    for (key, value) in readings {
        let date = NaiveDate::parse_from_str(&key, DATE_FORMAT)
            .map_err(|_| IrradianceError::InvalidDate(key.clone()))?;
        if value < 0.0 {
            debug!("NASA POWER has no reading for {} (fill value {})", date, value);
            continue;
        }
        points.push((date, value));
    }

    Ok(points.into_iter().collect())
}

#[async_trait]
impl IrradianceProvider for NasaPowerProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_daily(
        &self,
        coords: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<IrradianceSeries, IrradianceError> {
        let params = Self::query_params(coords, start, end);
        let body = self.fetch(&params).await?;
        parse_response(&body)
    }
}
