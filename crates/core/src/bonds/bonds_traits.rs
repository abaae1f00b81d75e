use crate::bonds::Bond;
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for bond registry operations
#[async_trait]
pub trait BondRepositoryTrait: Send + Sync {
    fn get_bond(&self, bond_id: &str) -> Result<Option<Bond>>;
    fn list_bonds(&self) -> Result<Vec<Bond>>;
    async fn upsert_bonds(&self, bonds: Vec<Bond>) -> Result<usize>;
}
