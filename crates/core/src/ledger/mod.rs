//! Ledger module - the seam between audits and the on-chain record.

mod ledger_model;
mod ledger_traits;

pub use ledger_model::{ledger_score, PublishOutcome};
pub use ledger_traits::LedgerPublisherTrait;
