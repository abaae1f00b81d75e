use chrono::NaiveDate;
use solarbond_irradiance::IrradianceSeries;

/// Neutral irradiance (kWh/m²/day) used whenever a real reading is unavailable.
pub const FALLBACK_IRRADIANCE: f64 = 5.0;

/// Outcome of asking for an irradiance range.
///
/// A `Degraded` fetch still carries a usable series; the variant records that
/// the values are synthetic and why.
#[derive(Debug, Clone, PartialEq)]
pub enum IrradianceFetch {
    Nominal(IrradianceSeries),
    Degraded {
        series: IrradianceSeries,
        cause: String,
    },
}

impl IrradianceFetch {
    /// The single-point series substituted for a failed fetch.
    pub fn fallback(start: NaiveDate, cause: impl Into<String>) -> Self {
        IrradianceFetch::Degraded {
            series: IrradianceSeries::single(start, FALLBACK_IRRADIANCE),
            cause: cause.into(),
        }
    }

    pub fn series(&self) -> &IrradianceSeries {
        match self {
            IrradianceFetch::Nominal(series) => series,
            IrradianceFetch::Degraded { series, .. } => series,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, IrradianceFetch::Degraded { .. })
    }

    pub fn degraded_cause(&self) -> Option<&str> {
        match self {
            IrradianceFetch::Nominal(_) => None,
            IrradianceFetch::Degraded { cause, .. } => Some(cause.as_str()),
        }
    }
}
