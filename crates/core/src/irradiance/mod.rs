//! Irradiance module - fallback client, cache, and source selection.
//!
//! ```text
//! AuditService → IrradianceSourceTrait
//!                   ├── IrradianceCache ──→ CacheStore (get/set)
//!                   │        └── (miss) ──→ IrradianceClient ──→ IrradianceProvider
//!                   └── DirectIrradianceSource ──→ IrradianceClient
//! ```
//!
//! The client turns every provider failure into a single-point fallback
//! reading tagged as degraded, so nothing below the audit service can fail
//! an audit for lack of irradiance.

mod cache;
mod cache_store;
mod client;
mod irradiance_model;
mod source;

pub use cache::{cache_key, IrradianceCache};
pub use cache_store::{CacheStore, MemoryCacheStore};
pub use client::IrradianceClient;
pub use irradiance_model::{IrradianceFetch, FALLBACK_IRRADIANCE};
pub use source::{DirectIrradianceSource, IrradianceSourceTrait};

pub use solarbond_irradiance::{Coordinates, IrradianceSeries};
