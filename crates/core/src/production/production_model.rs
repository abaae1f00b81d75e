//! Production data models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Energy a bond's plant delivered on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    pub bond_id: String,
    pub date: NaiveDate,
    /// Metered output in kWh, never negative.
    pub actual_energy_kwh: f64,
}

impl ProductionRecord {
    pub fn validate(&self) -> Result<()> {
        if self.bond_id.trim().is_empty() {
            return Err(ValidationError::MissingField("bondId".to_string()).into());
        }
        if !(self.actual_energy_kwh.is_finite() && self.actual_energy_kwh >= 0.0) {
            return Err(ValidationError::InvalidInput(format!(
                "Production for {} on {}: actualEnergyKwh must be non-negative, got {}",
                self.bond_id, self.date, self.actual_energy_kwh
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_camel_case() {
        let record: ProductionRecord = serde_json::from_str(
            r#"{"bondId":"BOND_1","date":"2024-05-01","actualEnergyKwh":150.0}"#,
        )
        .unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_energy() {
        let record = ProductionRecord {
            bond_id: "BOND_1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            actual_energy_kwh: -1.0,
        };
        assert!(record.validate().is_err());
    }
}
