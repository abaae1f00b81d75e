//! Performance Ratio scoring.

use super::audit_model::{AuditFlag, Verdict};
use crate::utils::round2;

/// Fraction of nameplate output a healthy plant converts from irradiance.
pub const SYSTEM_EFFICIENCY: f64 = 0.8;

/// PR above this (percent) is physically implausible.
pub const MAX_PR_ALLOWED: f64 = 100.0;

/// Days with less irradiance (kWh/m²/day) than this are not scored.
pub const MIN_GHI_THRESHOLD: f64 = 0.5;

/// Upper bound on production: full rated capacity around the clock.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Classification of one day's production.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    /// Percent, rounded to 2 decimals.
    pub performance_ratio: f64,
    /// kWh, rounded to 2 decimals.
    pub theoretical_max_kwh: f64,
    pub verdict: Verdict,
    pub flag: Option<AuditFlag>,
}

/// Score one day of production against the irradiance it received.
///
/// Inputs are expected to be valid (`irradiance >= 0`, `capacity_kw > 0`,
/// `threshold_percent` in `[0, 100]`). The function does no I/O and returns
/// the same result for the same inputs.
///
/// Both validation flags are checked; when both apply `PR_ANOMALY` is the one
/// reported. The verdict compares the rounded PR against the threshold.
pub fn score(
    actual_energy_kwh: f64,
    irradiance: f64,
    capacity_kw: f64,
    threshold_percent: f64,
) -> Score {
    if irradiance < MIN_GHI_THRESHOLD {
        return Score {
            performance_ratio: 0.0,
            theoretical_max_kwh: 0.0,
            verdict: Verdict::IgnoredDay,
            flag: Some(AuditFlag::LowGhi),
        };
    }

    let theoretical_max = irradiance * capacity_kw * SYSTEM_EFFICIENCY;

    let performance_ratio = if theoretical_max == 0.0 {
        0.0
    } else {
        round2((actual_energy_kwh / theoretical_max) * 100.0)
    };

    let mut flag = None;
    if actual_energy_kwh > capacity_kw * HOURS_PER_DAY {
        flag = Some(AuditFlag::InvalidProduction);
    }
    if performance_ratio > MAX_PR_ALLOWED {
        flag = Some(AuditFlag::PrAnomaly);
    }

    let verdict = if performance_ratio >= threshold_percent {
        Verdict::Compliant
    } else {
        Verdict::Penalty
    };

    Score {
        performance_ratio,
        theoretical_max_kwh: round2(theoretical_max),
        verdict,
        flag,
    }
}
