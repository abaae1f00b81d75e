//! Irradiance provider abstractions and implementations.
//!
//! This module contains:
//! - The `IrradianceProvider` trait that all sources implement
//! - The NASA POWER daily point provider
//!
//! Providers return errors as-is. Retrying and falling back are decided by
//! whoever holds the provider.

mod traits;

pub mod nasa_power;

pub use traits::IrradianceProvider;
