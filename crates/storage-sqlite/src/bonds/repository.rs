use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use solarbond_core::bonds::{Bond, BondRepositoryTrait};
use solarbond_core::Result;

use super::model::BondDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::bonds;

pub struct BondRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BondRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        BondRepository { pool, writer }
    }
}

#[async_trait]
impl BondRepositoryTrait for BondRepository {
    fn get_bond(&self, bond_id: &str) -> Result<Option<Bond>> {
        let mut conn = get_connection(&self.pool)?;
        let bond = bonds::table
            .find(bond_id)
            .select(BondDB::as_select())
            .first::<BondDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(bond.map(Bond::from))
    }

    fn list_bonds(&self) -> Result<Vec<Bond>> {
        let mut conn = get_connection(&self.pool)?;
        let bonds_db = bonds::table
            .select(BondDB::as_select())
            .order(bonds::id.asc())
            .load::<BondDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(bonds_db.into_iter().map(Bond::from).collect())
    }

    async fn upsert_bonds(&self, new_bonds: Vec<Bond>) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut affected_rows = 0;
                for bond in new_bonds {
                    let bond_db: BondDB = bond.into();
                    affected_rows += diesel::insert_into(bonds::table)
                        .values(&bond_db)
                        .on_conflict(bonds::id)
                        .do_update()
                        .set(&bond_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }
                Ok(affected_rows)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use solarbond_core::irradiance::Coordinates;
    use tempfile::tempdir;

    async fn create_test_repository() -> (BondRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (BondRepository::new(pool, writer), temp_dir)
    }

    fn bond(id: &str, threshold: f64) -> Bond {
        Bond {
            id: id.to_string(),
            name: format!("Solar Farm {}", id),
            capacity_kw: 50.0,
            threshold,
            location: Coordinates::new(12.97, 77.59),
            contract_address: "0x78efd50b1607a9b0a350849202111e6ac7255d50".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let (repo, _temp_dir) = create_test_repository().await;

        let written = repo.upsert_bonds(vec![bond("BOND_1", 75.0)]).await.unwrap();
        assert_eq!(written, 1);

        let loaded = repo.get_bond("BOND_1").unwrap().unwrap();
        assert_eq!(loaded, bond("BOND_1", 75.0));
        assert!(repo.get_bond("BOND_X").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let (repo, _temp_dir) = create_test_repository().await;

        repo.upsert_bonds(vec![bond("BOND_1", 75.0)]).await.unwrap();
        repo.upsert_bonds(vec![bond("BOND_1", 80.0)]).await.unwrap();

        assert_eq!(repo.get_bond("BOND_1").unwrap().unwrap().threshold, 80.0);
        assert_eq!(repo.list_bonds().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let (repo, _temp_dir) = create_test_repository().await;

        repo.upsert_bonds(vec![bond("BOND_2", 75.0), bond("BOND_1", 75.0)])
            .await
            .unwrap();

        let ids: Vec<String> = repo.list_bonds().unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["BOND_1", "BOND_2"]);
    }

    #[tokio::test]
    async fn test_invalid_capacity_rejected_atomically() {
        let (repo, _temp_dir) = create_test_repository().await;
        let mut broken = bond("BOND_2", 75.0);
        broken.capacity_kw = 0.0;

        let result = repo.upsert_bonds(vec![bond("BOND_1", 75.0), broken]).await;

        assert!(result.is_err());
        assert!(repo.list_bonds().unwrap().is_empty());
    }
}
