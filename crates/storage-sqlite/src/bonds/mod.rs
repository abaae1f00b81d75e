//! SQLite storage implementation for the bond registry.

mod model;
mod repository;

pub use model::BondDB;
pub use repository::BondRepository;
