//! Database models for bonds.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use solarbond_core::bonds::Bond;
use solarbond_core::irradiance::Coordinates;

/// Database model for bonds
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::bonds)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BondDB {
    pub id: String,
    pub name: String,
    pub capacity_kw: f64,
    pub threshold: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub contract_address: String,
    pub updated_at: NaiveDateTime,
}

impl From<BondDB> for Bond {
    fn from(db: BondDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            capacity_kw: db.capacity_kw,
            threshold: db.threshold,
            location: Coordinates::new(db.latitude, db.longitude),
            contract_address: db.contract_address,
        }
    }
}

impl From<Bond> for BondDB {
    fn from(domain: Bond) -> Self {
        Self {
            id: domain.id,
            name: domain.name,
            capacity_kw: domain.capacity_kw,
            threshold: domain.threshold,
            latitude: domain.location.latitude,
            longitude: domain.location.longitude,
            contract_address: domain.contract_address,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}
