//! Bond registry models.

use serde::{Deserialize, Serialize};
use solarbond_irradiance::Coordinates;

use crate::errors::{Result, ValidationError};

/// A solar production bond as held by the registry.
///
/// Reference data: the audit core looks bonds up by id and never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    pub id: String,
    pub name: String,
    /// Rated plant capacity in kW, always positive.
    pub capacity_kw: f64,
    /// Minimum performance ratio (percent, 0-100) for a compliant day.
    pub threshold: f64,
    pub location: Coordinates,
    /// Address of the on-chain contract that records this bond's audits.
    pub contract_address: String,
}

impl Bond {
    /// Checks the registry invariants: non-empty id, positive capacity, and a
    /// threshold within 0-100.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        if !(self.capacity_kw.is_finite() && self.capacity_kw > 0.0) {
            return Err(ValidationError::InvalidInput(format!(
                "Bond {}: capacityKw must be positive, got {}",
                self.id, self.capacity_kw
            ))
            .into());
        }
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(ValidationError::InvalidInput(format!(
                "Bond {}: threshold must be within 0-100, got {}",
                self.id, self.threshold
            ))
            .into());
        }
        Ok(())
    }
}
