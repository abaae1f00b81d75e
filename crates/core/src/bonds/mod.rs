//! Bonds module - registry models and traits.

mod bonds_model;
mod bonds_traits;

pub use bonds_model::Bond;
pub use bonds_traits::BondRepositoryTrait;
