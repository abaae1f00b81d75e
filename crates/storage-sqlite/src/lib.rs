//! SQLite storage implementation for the Solarbond oracle.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `solarbond-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The bond registry, production store, and persistent irradiance cache
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//!        core (domain traits)
//!                │
//!                ▼
//!        storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```
//!
//! Reads go through the r2d2 pool; every write is serialized through the
//! single writer task behind [`WriteHandle`].

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod bonds;
pub mod irradiance_cache;
pub mod production;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use bonds::BondRepository;
pub use irradiance_cache::SqliteCacheStore;
pub use production::ProductionRepository;

// Re-export from solarbond-core for convenience
pub use solarbond_core::errors::{DatabaseError, Error, Result};
