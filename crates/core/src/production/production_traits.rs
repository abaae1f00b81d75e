use chrono::NaiveDate;

use crate::errors::Result;
use crate::production::ProductionRecord;
use async_trait::async_trait;

/// Trait for production store operations
#[async_trait]
pub trait ProductionRepositoryTrait: Send + Sync {
    /// All records for a bond, in no particular order.
    fn list_by_bond(&self, bond_id: &str) -> Result<Vec<ProductionRecord>>;

    fn get_for_date(&self, bond_id: &str, date: NaiveDate) -> Result<Option<ProductionRecord>> {
        Ok(self
            .list_by_bond(bond_id)?
            .into_iter()
            .find(|record| record.date == date))
    }

    async fn upsert_records(&self, records: Vec<ProductionRecord>) -> Result<usize>;
}
