//! Audit report models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::scoring::Score;
use crate::errors::{Error, Result};
use crate::ledger::PublishOutcome;
use crate::utils::round2;

/// Compliance classification for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Compliant,
    Penalty,
    IgnoredDay,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Compliant => "COMPLIANT",
            Verdict::Penalty => "PENALTY",
            Verdict::IgnoredDay => "IGNORED_DAY",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data-quality marker attached to a scored day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditFlag {
    LowGhi,
    InvalidProduction,
    PrAnomaly,
}

impl AuditFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditFlag::LowGhi => "LOW_GHI",
            AuditFlag::InvalidProduction => "INVALID_PRODUCTION",
            AuditFlag::PrAnomaly => "PR_ANOMALY",
        }
    }
}

impl fmt::Display for AuditFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scored day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAuditResult {
    pub date: NaiveDate,
    pub actual_energy_kwh: f64,
    /// Irradiance used for scoring, rounded to 2 decimals.
    pub ghi: f64,
    pub performance_ratio: f64,
    pub theoretical_max_kwh: f64,
    pub verdict: Verdict,
    pub flag: Option<AuditFlag>,
    /// True when `ghi` is the neutral fallback rather than a provider reading.
    pub irradiance_degraded: bool,
}

impl DailyAuditResult {
    pub fn new(
        date: NaiveDate,
        actual_energy_kwh: f64,
        ghi: f64,
        irradiance_degraded: bool,
        score: Score,
    ) -> Self {
        Self {
            date,
            actual_energy_kwh,
            ghi: round2(ghi),
            performance_ratio: score.performance_ratio,
            theoretical_max_kwh: score.theoretical_max_kwh,
            verdict: score.verdict,
            flag: score.flag,
            irradiance_degraded,
        }
    }
}

/// A single-day audit with its bond context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAudit {
    pub bond_id: String,
    pub bond_name: String,
    #[serde(flatten)]
    pub result: DailyAuditResult,
    pub threshold_required: f64,
    pub contract_address: String,
}

/// Every recorded day of a bond, scored in date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAuditReport {
    pub bond_id: String,
    pub bond_name: String,
    /// Calendar span from first to last recorded day, e.g. `"30 Days"`.
    pub period: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: usize,
    pub compliant_days: usize,
    pub penalty_days: usize,
    pub degraded_days: usize,
    pub threshold: f64,
    pub audit_log: Vec<DailyAuditResult>,
}

impl BatchAuditReport {
    pub fn ignored_days(&self) -> usize {
        self.total_days - self.compliant_days - self.penalty_days
    }
}

/// A penalty day as reported to bondholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyEvent {
    pub date: NaiveDate,
    pub pr: f64,
    pub actual_energy: f64,
    pub theoretical_max: f64,
    /// `theoretical_max - actual_energy`, rounded to 2 decimals.
    pub shortfall: f64,
}

impl PenaltyEvent {
    fn from_result(result: &DailyAuditResult) -> Self {
        Self {
            date: result.date,
            pr: result.performance_ratio,
            actual_energy: result.actual_energy_kwh,
            theoretical_max: result.theoretical_max_kwh,
            shortfall: round2(result.theoretical_max_kwh - result.actual_energy_kwh),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub compliant_days: usize,
    pub penalty_days: usize,
}

/// Penalty view of a batch audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltySummary {
    pub bond_id: String,
    pub total_days: usize,
    pub penalty_days: usize,
    /// Penalty days as a percentage of all days, rounded to 2 decimals.
    pub penalty_rate: f64,
    pub penalty_events: Vec<PenaltyEvent>,
    pub compliance_summary: ComplianceSummary,
}

impl PenaltySummary {
    /// Derives the summary from a batch report. Fails on an empty report
    /// since the penalty rate is undefined there.
    pub fn from_batch(report: &BatchAuditReport) -> Result<Self> {
        if report.total_days == 0 {
            return Err(Error::InvalidState(format!(
                "Cannot summarize penalties for bond {} with no audited days",
                report.bond_id
            )));
        }

        let penalty_events: Vec<PenaltyEvent> = report
            .audit_log
            .iter()
            .filter(|day| day.verdict == Verdict::Penalty)
            .map(PenaltyEvent::from_result)
            .collect();

        Ok(Self {
            bond_id: report.bond_id.clone(),
            total_days: report.total_days,
            penalty_days: report.penalty_days,
            penalty_rate: round2(report.penalty_days as f64 / report.total_days as f64 * 100.0),
            penalty_events,
            compliance_summary: ComplianceSummary {
                compliant_days: report.compliant_days,
                penalty_days: report.penalty_days,
            },
        })
    }
}

/// A single-day audit together with what happened when it was sent to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedAudit {
    pub oracle_result: DailyAudit,
    pub blockchain_tx: PublishOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::score;

    fn day(d: u32, actual: f64) -> DailyAuditResult {
        let date = NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        DailyAuditResult::new(date, actual, 5.0, false, score(actual, 5.0, 50.0, 75.0))
    }

    fn report(audit_log: Vec<DailyAuditResult>) -> BatchAuditReport {
        let compliant_days = audit_log
            .iter()
            .filter(|d| d.verdict == Verdict::Compliant)
            .count();
        let penalty_days = audit_log
            .iter()
            .filter(|d| d.verdict == Verdict::Penalty)
            .count();
        BatchAuditReport {
            bond_id: "BOND_1".to_string(),
            bond_name: "Green Solar Farm Alpha".to_string(),
            period: format!("{} Days", audit_log.len()),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 4).unwrap(),
            total_days: audit_log.len(),
            compliant_days,
            penalty_days,
            degraded_days: 0,
            threshold: 75.0,
            audit_log,
        }
    }

    #[test]
    fn test_verdict_and_flag_wire_names() {
        assert_eq!(
            serde_json::to_string(&Verdict::IgnoredDay).unwrap(),
            "\"IGNORED_DAY\""
        );
        assert_eq!(
            serde_json::to_string(&AuditFlag::InvalidProduction).unwrap(),
            "\"INVALID_PRODUCTION\""
        );
        assert_eq!(Verdict::Penalty.to_string(), "PENALTY");
        assert_eq!(AuditFlag::LowGhi.to_string(), "LOW_GHI");
    }

    #[test]
    fn test_daily_audit_serializes_flat_camel_case() {
        let audit = DailyAudit {
            bond_id: "BOND_1".to_string(),
            bond_name: "Green Solar Farm Alpha".to_string(),
            result: day(1, 150.0),
            threshold_required: 75.0,
            contract_address: "0xabc".to_string(),
        };
        let json = serde_json::to_value(&audit).unwrap();

        assert_eq!(json["bondId"], "BOND_1");
        assert_eq!(json["date"], "2024-05-01");
        assert_eq!(json["performanceRatio"], 75.0);
        assert_eq!(json["theoreticalMaxKwh"], 200.0);
        assert_eq!(json["verdict"], "COMPLIANT");
        assert!(json["flag"].is_null());
        assert_eq!(json["irradianceDegraded"], false);
        assert_eq!(json["thresholdRequired"], 75.0);
    }

    #[test]
    fn test_ghi_is_rounded() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let result = DailyAuditResult::new(date, 100.0, 5.4567, false, score(100.0, 5.4567, 50.0, 75.0));
        assert_eq!(result.ghi, 5.46);
    }

    #[test]
    fn test_penalty_summary_from_batch() {
        let summary = PenaltySummary::from_batch(&report(vec![
            day(1, 150.0),
            day(2, 100.0),
            day(3, 160.0),
            day(4, 120.0),
        ]))
        .unwrap();

        assert_eq!(summary.total_days, 4);
        assert_eq!(summary.penalty_days, 2);
        assert_eq!(summary.penalty_rate, 50.0);
        assert_eq!(summary.compliance_summary.compliant_days, 2);
        assert_eq!(summary.penalty_events.len(), 2);
        assert_eq!(summary.penalty_events[0].shortfall, 100.0);
        assert_eq!(summary.penalty_events[1].shortfall, 80.0);
        assert_eq!(summary.penalty_events[1].pr, 60.0);
    }

    #[test]
    fn test_penalty_rate_counts_ignored_days_in_denominator() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let ignored = DailyAuditResult::new(date, 10.0, 0.2, false, score(10.0, 0.2, 50.0, 75.0));
        let summary =
            PenaltySummary::from_batch(&report(vec![day(1, 100.0), day(2, 150.0), ignored]))
                .unwrap();

        assert_eq!(summary.penalty_rate, 33.33);
    }

    #[test]
    fn test_penalty_summary_rejects_empty_report() {
        let err = PenaltySummary::from_batch(&report(vec![])).unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }
}
