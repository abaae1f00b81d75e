//! Production module - metered energy records and their store trait.

mod production_model;
mod production_traits;

pub use production_model::ProductionRecord;
pub use production_traits::ProductionRepositoryTrait;
