//! Solarbond Irradiance Crate
//!
//! Provider-agnostic access to daily solar irradiance (GHI) readings.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +---------------------+
//! |   Audit core     | --> | IrradianceProvider  |  (trait)
//! +------------------+     +---------------------+
//!                                    |
//!                                    v
//!                          +---------------------+
//!                          |  NasaPowerProvider  |  (HTTP, NASA POWER daily API)
//!                          +---------------------+
//!                                    |
//!                                    v
//!                          +---------------------+
//!                          |  IrradianceSeries   |  (date -> kWh/m²/day)
//!                          +---------------------+
//! ```
//!
//! Providers report failures as [`IrradianceError`]. Converting a failure into a
//! usable fallback reading is the caller's policy, not the provider's.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::IrradianceError;
pub use models::{Coordinates, IrradianceSeries};
pub use provider::nasa_power::{NasaPowerConfig, NasaPowerProvider};
pub use provider::IrradianceProvider;
