use async_trait::async_trait;
use chrono::NaiveDate;

use super::audit_model::{BatchAuditReport, DailyAudit, PenaltySummary, PublishedAudit};
use crate::errors::Result;

/// Trait for audit service operations
#[async_trait]
pub trait AuditServiceTrait: Send + Sync {
    /// Scores one recorded day of a bond.
    async fn audit_single_day(&self, bond_id: &str, date: NaiveDate) -> Result<DailyAudit>;

    /// Scores every recorded day of a bond with a single irradiance fetch.
    async fn audit_batch(&self, bond_id: &str) -> Result<BatchAuditReport>;

    async fn penalty_summary(&self, bond_id: &str) -> Result<PenaltySummary>;

    /// Scores one day and records the verdict on the ledger. Ledger failures
    /// are reported in the result, never as an error.
    async fn audit_and_publish(&self, bond_id: &str, date: NaiveDate) -> Result<PublishedAudit>;
}
