use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use solarbond_core::irradiance::CacheStore;
use solarbond_core::Result;

use super::model::IrradianceCacheEntryDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::irradiance_cache;

/// Persistent [`CacheStore`]. Entries never expire; historical irradiance
/// does not change once published.
pub struct SqliteCacheStore {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SqliteCacheStore {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        SqliteCacheStore { pool, writer }
    }
}

#[async_trait]
impl CacheStore for SqliteCacheStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let payload = irradiance_cache::table
            .find(key)
            .select(irradiance_cache::payload)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(payload)
    }

    async fn set(&self, key: String, value: String) -> Result<()> {
        let entry = IrradianceCacheEntryDB {
            cache_key: key,
            payload: value,
            updated_at: chrono::Utc::now().naive_utc(),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(irradiance_cache::table)
                    .values(&entry)
                    .on_conflict(irradiance_cache::cache_key)
                    .do_update()
                    .set(&entry)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::NaiveDate;
    use solarbond_core::irradiance::{
        cache_key, Coordinates, IrradianceCache, IrradianceClient, IrradianceSeries,
        IrradianceSourceTrait,
    };
    use solarbond_irradiance::{IrradianceError, IrradianceProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    async fn create_test_store() -> (SqliteCacheStore, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (SqliteCacheStore::new(pool, writer), temp_dir)
    }

    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl IrradianceProvider for CountingProvider {
        fn id(&self) -> &'static str {
            "COUNTING"
        }

        async fn fetch_daily(
            &self,
            _coords: Coordinates,
            start: NaiveDate,
            end: NaiveDate,
        ) -> std::result::Result<IrradianceSeries, IrradianceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(start
                .iter_days()
                .take_while(|d| *d <= end)
                .map(|d| (d, 5.25))
                .collect())
        }
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (store, _temp_dir) = create_test_store().await;
        assert_eq!(store.get("ghi:13.0:77.6:2024-05-01:2024-05-01").unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_and_overwrite() {
        let (store, _temp_dir) = create_test_store().await;

        store.set("k".to_string(), "v1".to_string()).await.unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v1".to_string()));

        store.set("k".to_string(), "v2".to_string()).await.unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));
    }

    #[tokio::test]
    async fn test_cache_survives_new_store_instance() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();
        let coords = Coordinates::new(12.97, 77.59);
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
        });
        let client = Arc::new(IrradianceClient::new(provider.clone()));

        {
            let pool = create_pool(&db_path).unwrap();
            run_migrations(&pool).unwrap();
            let store = SqliteCacheStore::new(pool.clone(), spawn_writer((*pool).clone()));
            let cache = IrradianceCache::new(Arc::new(store), client.clone());
            let fetch = cache.get_range(coords, start, end).await;
            assert_eq!(fetch.series().len(), 3);
        }

        let pool = create_pool(&db_path).unwrap();
        let store = SqliteCacheStore::new(pool.clone(), spawn_writer((*pool).clone()));
        assert!(store
            .get(&cache_key(coords, start, end))
            .unwrap()
            .is_some());

        let cache = IrradianceCache::new(Arc::new(store), client);
        let fetch = cache.get_range(coords, start, end).await;

        assert!(!fetch.is_degraded());
        assert_eq!(fetch.series().get(end), Some(5.25));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }
}
