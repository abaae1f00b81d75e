use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::upsert::excluded;
use diesel::SqliteConnection;
use solarbond_core::production::{ProductionRecord, ProductionRepositoryTrait};
use solarbond_core::Result;

use super::model::ProductionRecordDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::production_records;
use crate::schema::production_records::dsl::*;

pub struct ProductionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ProductionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ProductionRepository { pool, writer }
    }
}

#[async_trait]
impl ProductionRepositoryTrait for ProductionRepository {
    fn list_by_bond(&self, bond: &str) -> Result<Vec<ProductionRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = production_records
            .filter(bond_id.eq(bond))
            .select(ProductionRecordDB::as_select())
            .order(date.asc())
            .load::<ProductionRecordDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ProductionRecord::from).collect())
    }

    fn get_for_date(&self, bond: &str, day: NaiveDate) -> Result<Option<ProductionRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let row = production_records
            .find((bond, day))
            .select(ProductionRecordDB::as_select())
            .first::<ProductionRecordDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(ProductionRecord::from))
    }

    async fn upsert_records(&self, records: Vec<ProductionRecord>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected_rows = 0;
                for record in records {
                    let record_db: ProductionRecordDB = record.into();
                    affected_rows += diesel::insert_into(production_records::table)
                        .values(&record_db)
                        .on_conflict((bond_id, date))
                        .do_update()
                        .set(actual_energy_kwh.eq(excluded(actual_energy_kwh)))
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(affected_rows)
            })
            .await
    }
}
