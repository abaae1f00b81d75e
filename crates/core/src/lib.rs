//! Solarbond Core - Domain entities, services, and traits.
//!
//! This crate contains the audit logic for solar production bonds: the
//! performance-ratio scoring function, the irradiance cache, and the audit
//! orchestrator that joins production records with irradiance readings.
//! It is database-agnostic and defines the traits that the `storage-sqlite`
//! and `ledger` crates implement.

pub mod audit;
pub mod bonds;
pub mod errors;
pub mod irradiance;
pub mod ledger;
pub mod production;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
