//! Irradiance provider trait definition.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::IrradianceError;
use crate::models::{Coordinates, IrradianceSeries};

/// Trait for daily irradiance sources.
///
/// Implement this trait to add support for a new irradiance source.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use solarbond_irradiance::{Coordinates, IrradianceError, IrradianceProvider, IrradianceSeries};
///
/// struct ConstantProvider;
///
/// #[async_trait]
/// impl IrradianceProvider for ConstantProvider {
///     fn id(&self) -> &'static str {
///         "CONSTANT"
///     }
///
///     async fn fetch_daily(
///         &self,
///         _coords: Coordinates,
///         start: NaiveDate,
///         _end: NaiveDate,
///     ) -> Result<IrradianceSeries, IrradianceError> {
///         Ok(IrradianceSeries::single(start, 5.0))
///     }
/// }
/// ```
#[async_trait]
pub trait IrradianceProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch daily global horizontal irradiance for a location.
    ///
    /// # Arguments
    ///
    /// * `coords` - Location to sample
    /// * `start` - First day of the range (inclusive)
    /// * `end` - Last day of the range (inclusive)
    ///
    /// # Returns
    ///
    /// The readings the provider has for the range. Days the provider has no
    /// reading for are absent from the series rather than zero-filled.
    async fn fetch_daily(
        &self,
        coords: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<IrradianceSeries, IrradianceError>;
}
