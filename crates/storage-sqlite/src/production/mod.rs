//! SQLite storage implementation for daily production records.

mod model;
mod repository;

pub use model::ProductionRecordDB;
pub use repository::ProductionRepository;
