use chrono::NaiveDate;
use diesel::prelude::*;
use solarbond_core::production::ProductionRecord;

#[derive(Queryable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::production_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductionRecordDB {
    pub bond_id: String,
    pub date: NaiveDate,
    pub actual_energy_kwh: f64,
}

impl From<ProductionRecordDB> for ProductionRecord {
    fn from(db: ProductionRecordDB) -> Self {
        Self {
            bond_id: db.bond_id,
            date: db.date,
            actual_energy_kwh: db.actual_energy_kwh,
        }
    }
}

impl From<ProductionRecord> for ProductionRecordDB {
    fn from(domain: ProductionRecord) -> Self {
        Self {
            bond_id: domain.bond_id,
            date: domain.date,
            actual_energy_kwh: domain.actual_energy_kwh,
        }
    }
}
