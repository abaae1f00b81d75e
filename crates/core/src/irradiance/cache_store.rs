//! Key/value store backing the irradiance cache.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::Result;

/// A string key/value store.
///
/// Writes are idempotent for a given key (same key, same value), so
/// implementations need no coordination between concurrent writers.
/// Expiry, if any, is the implementation's own policy.
#[async_trait]
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: String, value: String) -> Result<()>;
}

/// Process-local cache store. Entries live until the process exits.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, String>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: String, value: String) -> Result<()> {
        self.entries.insert(key, value);
        Ok(())
    }
}
