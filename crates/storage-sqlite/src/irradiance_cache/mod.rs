//! SQLite-backed key/value store for cached irradiance series.

mod model;
mod repository;

pub use model::IrradianceCacheEntryDB;
pub use repository::SqliteCacheStore;
