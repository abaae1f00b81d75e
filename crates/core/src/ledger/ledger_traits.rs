use async_trait::async_trait;
use chrono::NaiveDate;

use super::ledger_model::PublishOutcome;
use crate::audit::Verdict;

/// Trait for recording audit verdicts on an append-only ledger
#[async_trait]
pub trait LedgerPublisherTrait: Send + Sync {
    /// Submits one day's verdict. Implementations bound their own latency
    /// and report every failure through the returned outcome.
    async fn publish(
        &self,
        date: NaiveDate,
        verdict: Verdict,
        performance_ratio: f64,
    ) -> PublishOutcome;
}
