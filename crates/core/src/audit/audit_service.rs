use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info, warn};

use super::audit_model::{
    BatchAuditReport, DailyAudit, DailyAuditResult, PenaltySummary, PublishedAudit, Verdict,
};
use super::audit_traits::AuditServiceTrait;
use super::scoring::score;
use crate::bonds::{Bond, BondRepositoryTrait};
use crate::errors::{Error, Result};
use crate::irradiance::{IrradianceFetch, IrradianceSourceTrait, FALLBACK_IRRADIANCE};
use crate::ledger::{LedgerPublisherTrait, PublishOutcome};
use crate::production::ProductionRepositoryTrait;
use crate::utils::inclusive_day_count;

/// Service that audits bond production against irradiance.
pub struct AuditService {
    bond_repository: Arc<dyn BondRepositoryTrait>,
    production_repository: Arc<dyn ProductionRepositoryTrait>,
    irradiance_source: Arc<dyn IrradianceSourceTrait>,
    ledger_publisher: Arc<dyn LedgerPublisherTrait>,
}

impl AuditService {
    pub fn new(
        bond_repository: Arc<dyn BondRepositoryTrait>,
        production_repository: Arc<dyn ProductionRepositoryTrait>,
        irradiance_source: Arc<dyn IrradianceSourceTrait>,
        ledger_publisher: Arc<dyn LedgerPublisherTrait>,
    ) -> Self {
        Self {
            bond_repository,
            production_repository,
            irradiance_source,
            ledger_publisher,
        }
    }

    fn load_bond(&self, bond_id: &str) -> Result<Bond> {
        self.bond_repository
            .get_bond(bond_id)?
            .ok_or_else(|| Error::NotFound(format!("Bond {} not found", bond_id)))
    }

    /// Irradiance for a single-day audit: the requested date's value, else
    /// whatever the series starts with, else the neutral fallback.
    fn irradiance_for_day(fetch: &IrradianceFetch, date: NaiveDate) -> (f64, bool) {
        let series = fetch.series();
        match series.get(date).or_else(|| series.first().map(|(_, value)| value)) {
            Some(value) => (value, fetch.is_degraded()),
            None => {
                warn!(
                    "Irradiance series for {} is empty, using fallback {}",
                    date, FALLBACK_IRRADIANCE
                );
                (FALLBACK_IRRADIANCE, true)
            }
        }
    }
}

#[async_trait]
impl AuditServiceTrait for AuditService {
    async fn audit_single_day(&self, bond_id: &str, date: NaiveDate) -> Result<DailyAudit> {
        let bond = self.load_bond(bond_id)?;
        let record = self
            .production_repository
            .get_for_date(bond_id, date)?
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "No production data for bond {} on {}",
                    bond_id, date
                ))
            })?;

        let fetch = self
            .irradiance_source
            .get_range(bond.location, date, date)
            .await;
        if let Some(cause) = fetch.degraded_cause() {
            warn!(
                "Auditing {} on {} with fallback irradiance: {}",
                bond_id, date, cause
            );
        }
        let (ghi, degraded) = Self::irradiance_for_day(&fetch, date);

        let outcome = score(
            record.actual_energy_kwh,
            ghi,
            bond.capacity_kw,
            bond.threshold,
        );
        debug!(
            "Scored {} on {}: PR {} -> {}",
            bond_id, date, outcome.performance_ratio, outcome.verdict
        );

        Ok(DailyAudit {
            bond_id: bond.id,
            bond_name: bond.name,
            result: DailyAuditResult::new(date, record.actual_energy_kwh, ghi, degraded, outcome),
            threshold_required: bond.threshold,
            contract_address: bond.contract_address,
        })
    }

    async fn audit_batch(&self, bond_id: &str) -> Result<BatchAuditReport> {
        let bond = self.load_bond(bond_id)?;

        let mut history = self.production_repository.list_by_bond(bond_id)?;
        history.sort_by_key(|record| record.date);

        let (start_date, end_date) = match (history.first(), history.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => {
                return Err(Error::NotFound(format!(
                    "No production data found for bond {}",
                    bond_id
                )))
            }
        };

        let fetch = self
            .irradiance_source
            .get_range(bond.location, start_date, end_date)
            .await;
        if let Some(cause) = fetch.degraded_cause() {
            warn!(
                "Batch audit of {} ({} to {}) uses fallback irradiance: {}",
                bond_id, start_date, end_date, cause
            );
        }

        let mut audit_log = Vec::with_capacity(history.len());
        let mut compliant_days = 0;
        let mut penalty_days = 0;
        let mut gap_days = 0;

        for record in &history {
            let (ghi, degraded) = match fetch.series().get(record.date) {
                Some(value) => (value, fetch.is_degraded()),
                None => {
                    gap_days += 1;
                    (FALLBACK_IRRADIANCE, true)
                }
            };

            let outcome = score(
                record.actual_energy_kwh,
                ghi,
                bond.capacity_kw,
                bond.threshold,
            );
            match outcome.verdict {
                Verdict::Compliant => compliant_days += 1,
                Verdict::Penalty => penalty_days += 1,
                Verdict::IgnoredDay => {}
            }

            audit_log.push(DailyAuditResult::new(
                record.date,
                record.actual_energy_kwh,
                ghi,
                degraded,
                outcome,
            ));
        }

        if gap_days > 0 && !fetch.is_degraded() {
            warn!(
                "Irradiance missing for {} of {} days of {}, using fallback {}",
                gap_days,
                history.len(),
                bond_id,
                FALLBACK_IRRADIANCE
            );
        }

        let degraded_days = audit_log
            .iter()
            .filter(|day| day.irradiance_degraded)
            .count();

        let span_days = inclusive_day_count(start_date, end_date);
        info!(
            "Batch audit of {}: {} recorded days over a {} day span, {} compliant, {} penalty",
            bond_id,
            audit_log.len(),
            span_days,
            compliant_days,
            penalty_days
        );

        Ok(BatchAuditReport {
            bond_id: bond.id,
            bond_name: bond.name,
            period: format!("{} Days", span_days),
            start_date,
            end_date,
            total_days: audit_log.len(),
            compliant_days,
            penalty_days,
            degraded_days,
            threshold: bond.threshold,
            audit_log,
        })
    }

    async fn penalty_summary(&self, bond_id: &str) -> Result<PenaltySummary> {
        let report = self.audit_batch(bond_id).await?;
        PenaltySummary::from_batch(&report)
    }

    async fn audit_and_publish(&self, bond_id: &str, date: NaiveDate) -> Result<PublishedAudit> {
        let audit = self.audit_single_day(bond_id, date).await?;

        let blockchain_tx = if audit.result.verdict == Verdict::IgnoredDay {
            debug!("Not publishing ignored day {} for {}", date, bond_id);
            PublishOutcome::Skipped
        } else {
            self.ledger_publisher
                .publish(
                    audit.result.date,
                    audit.result.verdict,
                    audit.result.performance_ratio,
                )
                .await
        };

        info!("Audit of {} on {} sent to ledger: {}", bond_id, date, blockchain_tx);

        Ok(PublishedAudit {
            oracle_result: audit,
            blockchain_tx,
        })
    }
}
