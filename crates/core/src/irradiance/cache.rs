//! Irradiance cache keyed by spatial bucket and exact date range.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use solarbond_irradiance::{Coordinates, IrradianceSeries};

use super::cache_store::CacheStore;
use super::client::IrradianceClient;
use super::irradiance_model::IrradianceFetch;
use super::source::IrradianceSourceTrait;
use crate::errors::{Error, Result, ValidationError};

const KEY_PREFIX: &str = "ghi";

/// Cache key for a location and date range.
///
/// Coordinates are bucketed to one decimal place (about 11 km), so nearby
/// plants share entries. The date range is part of the key verbatim: a hit is
/// only ever for the exact range requested.
pub fn cache_key(coords: Coordinates, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}:{:.1}:{:.1}:{}:{}",
        KEY_PREFIX, coords.latitude, coords.longitude, start, end
    )
}

/// Stored form of a fetch: `{"GHI": {"2024-01-01": 5.42, ...}, "degraded": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    #[serde(rename = "GHI")]
    ghi: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    degraded: Option<String>,
}

fn encode_entry(fetch: &IrradianceFetch) -> Result<String> {
    let entry = CacheEntry {
        ghi: fetch
            .series()
            .iter()
            .map(|(date, value)| (date.to_string(), value))
            .collect(),
        degraded: fetch.degraded_cause().map(str::to_string),
    };
    Ok(serde_json::to_string(&entry)?)
}

/// Date keys may be plain ISO dates or ISO datetimes (`2024-01-01T00:00:00.000`);
/// only the date part is used.
fn decode_entry(payload: &str) -> Result<IrradianceFetch> {
    let entry: CacheEntry = serde_json::from_str(payload)?;

    let mut points = Vec::with_capacity(entry.ghi.len());
    for (key, value) in entry.ghi {
        let date_part = key.get(..10).unwrap_or(&key);
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|e| Error::Validation(ValidationError::DateTimeParse(e)))?;
        points.push((date, value));
    }
    let series: IrradianceSeries = points.into_iter().collect();

    Ok(match entry.degraded {
        Some(cause) => IrradianceFetch::Degraded { series, cause },
        None => IrradianceFetch::Nominal(series),
    })
}

/// Memoizes irradiance fetches in a [`CacheStore`].
///
/// The store is an optimization only: read errors and unreadable entries are
/// treated as misses, and write errors are logged and dropped.
pub struct IrradianceCache {
    store: Arc<dyn CacheStore>,
    client: Arc<IrradianceClient>,
}

impl IrradianceCache {
    pub fn new(store: Arc<dyn CacheStore>, client: Arc<IrradianceClient>) -> Self {
        Self { store, client }
    }

    fn lookup(&self, key: &str) -> Option<IrradianceFetch> {
        match self.store.get(key) {
            Ok(Some(payload)) => match decode_entry(&payload) {
                Ok(fetch) => {
                    debug!("Irradiance cache hit: {}", key);
                    Some(fetch)
                }
                Err(e) => {
                    warn!("Ignoring unreadable irradiance cache entry {}: {}", key, e);
                    None
                }
            },
            Ok(None) => {
                debug!("Irradiance cache miss: {}", key);
                None
            }
            Err(e) => {
                warn!(
                    "Irradiance cache unavailable for {}: {}. Falling through to provider",
                    key, e
                );
                None
            }
        }
    }

    async fn store(&self, key: String, fetch: &IrradianceFetch) {
        let payload = match encode_entry(fetch) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to encode irradiance cache entry {}: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.store.set(key.clone(), payload).await {
            warn!("Failed to write irradiance cache entry {}: {}", key, e);
        }
    }
}

#[async_trait]
impl IrradianceSourceTrait for IrradianceCache {
    async fn get_range(
        &self,
        coords: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> IrradianceFetch {
        let key = cache_key(coords, start, end);
        if let Some(fetch) = self.lookup(&key) {
            return fetch;
        }

        let fetch = self.client.fetch_range(coords, start, end).await;
        self.store(key, &fetch).await;
        fetch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irradiance::{MemoryCacheStore, FALLBACK_IRRADIANCE};
    use chrono::Datelike;
    use solarbond_irradiance::{IrradianceError, IrradianceProvider};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    /// Returns one reading per day of the requested range and counts calls.
    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
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
            if self.fail {
                return Err(IrradianceError::Network("connection reset".to_string()));
            }
            Ok(start
                .iter_days()
                .take_while(|d| *d <= end)
                .map(|d| (d, 4.0 + f64::from(d.day0()) / 10.0))
                .collect())
        }
    }

    /// A store whose every operation fails.
    struct BrokenStore;

    #[async_trait]
    impl CacheStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Unexpected("cache store unreachable".to_string()))
        }

        async fn set(&self, _key: String, _value: String) -> Result<()> {
            Err(Error::Unexpected("cache store unreachable".to_string()))
        }
    }

    /// A store that records writes.
    #[derive(Default)]
    struct RecordingStore {
        writes: Mutex<Vec<(String, String)>>,
        inner: MemoryCacheStore,
    }

    #[async_trait]
    impl CacheStore for RecordingStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        async fn set(&self, key: String, value: String) -> Result<()> {
            self.writes
                .lock()
                .unwrap()
                .push((key.clone(), value.clone()));
            self.inner.set(key, value).await
        }
    }

    fn cache_with(
        store: Arc<dyn CacheStore>,
        provider: Arc<CountingProvider>,
    ) -> IrradianceCache {
        IrradianceCache::new(store, Arc::new(IrradianceClient::new(provider)))
    }

    #[test]
    fn test_cache_key_format() {
        let key = cache_key(Coordinates::new(12.97, 77.59), date(1), date(30));
        assert_eq!(key, "ghi:13.0:77.6:2024-01-01:2024-01-30");
    }

    #[test]
    fn test_cache_key_buckets_nearby_latitudes() {
        let a = cache_key(Coordinates::new(12.96, 77.59), date(1), date(30));
        let b = cache_key(Coordinates::new(12.97, 77.59), date(1), date(30));
        let c = cache_key(Coordinates::new(12.94, 77.59), date(1), date(30));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cache_key_includes_exact_range() {
        let coords = Coordinates::new(12.97, 77.59);
        assert_ne!(
            cache_key(coords, date(1), date(30)),
            cache_key(coords, date(1), date(29))
        );
    }

    #[test]
    fn test_entry_round_trip() {
        let series: IrradianceSeries = vec![(date(1), 5.42), (date(2), 0.3), (date(3), 6.123456789)]
            .into_iter()
            .collect();
        let fetch = IrradianceFetch::Nominal(series);

        let decoded = decode_entry(&encode_entry(&fetch).unwrap()).unwrap();
        assert_eq!(decoded, fetch);
    }

    #[test]
    fn test_entry_round_trip_keeps_degradation() {
        let fetch = IrradianceFetch::fallback(date(5), "Timeout: NASA_POWER");

        let decoded = decode_entry(&encode_entry(&fetch).unwrap()).unwrap();
        assert_eq!(decoded, fetch);
    }

    #[test]
    fn test_decode_accepts_datetime_keys() {
        let payload = r#"{"GHI":{"2024-01-01T00:00:00.000":5.42,"2024-01-02T00:00:00.000":4.87}}"#;

        let fetch = decode_entry(payload).unwrap();
        assert!(!fetch.is_degraded());
        assert_eq!(fetch.series().get(date(1)), Some(5.42));
        assert_eq!(fetch.series().get(date(2)), Some(4.87));
    }

    #[tokio::test]
    async fn test_miss_fetches_and_stores_then_hits() {
        let provider = Arc::new(CountingProvider::default());
        let store = Arc::new(RecordingStore::default());
        let cache = cache_with(store.clone(), provider.clone());
        let coords = Coordinates::new(12.97, 77.59);

        let first = cache.get_range(coords, date(1), date(5)).await;
        let second = cache.get_range(coords, date(1), date(5)).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(first.series().len(), 5);

        let writes = store.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, "ghi:13.0:77.6:2024-01-01:2024-01-05");
    }

    #[tokio::test]
    async fn test_nearby_coordinates_share_entry() {
        let provider = Arc::new(CountingProvider::default());
        let cache = cache_with(Arc::new(MemoryCacheStore::new()), provider.clone());

        cache
            .get_range(Coordinates::new(12.97, 77.59), date(1), date(3))
            .await;
        cache
            .get_range(Coordinates::new(12.96, 77.61), date(1), date(3))
            .await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        cache
            .get_range(Coordinates::new(12.94, 77.59), date(1), date(3))
            .await;
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_partial_range_merging() {
        let provider = Arc::new(CountingProvider::default());
        let cache = cache_with(Arc::new(MemoryCacheStore::new()), provider.clone());
        let coords = Coordinates::new(12.97, 77.59);

        cache.get_range(coords, date(1), date(10)).await;
        let sub_range = cache.get_range(coords, date(2), date(3)).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        assert_eq!(sub_range.series().len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_store_falls_through_to_provider() {
        let provider = Arc::new(CountingProvider::default());
        let cache = cache_with(Arc::new(BrokenStore), provider.clone());
        let coords = Coordinates::new(12.97, 77.59);

        let fetch = cache.get_range(coords, date(1), date(2)).await;

        assert!(!fetch.is_degraded());
        assert_eq!(fetch.series().len(), 2);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unreadable_entry_is_refetched_and_overwritten() {
        let provider = Arc::new(CountingProvider::default());
        let store = Arc::new(MemoryCacheStore::new());
        let coords = Coordinates::new(12.97, 77.59);
        store
            .set(cache_key(coords, date(1), date(2)), "not json".to_string())
            .await
            .unwrap();
        let cache = cache_with(store.clone(), provider.clone());

        let fetch = cache.get_range(coords, date(1), date(2)).await;

        assert_eq!(fetch.series().len(), 2);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        let stored = store.get(&cache_key(coords, date(1), date(2))).unwrap().unwrap();
        assert_eq!(decode_entry(&stored).unwrap(), fetch);
    }

    #[tokio::test]
    async fn test_degraded_fetch_is_cached_with_provenance() {
        let provider = Arc::new(CountingProvider {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let cache = cache_with(Arc::new(MemoryCacheStore::new()), provider.clone());
        let coords = Coordinates::new(12.97, 77.59);

        let first = cache.get_range(coords, date(1), date(7)).await;
        let second = cache.get_range(coords, date(1), date(7)).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
        assert!(second.is_degraded());
        assert_eq!(second, first);
        assert_eq!(second.series().get(date(1)), Some(FALLBACK_IRRADIANCE));
    }

    #[tokio::test]
    async fn test_entry_written_by_another_component_is_readable() {
        let provider = Arc::new(CountingProvider::default());
        let store = Arc::new(MemoryCacheStore::new());
        let coords = Coordinates::new(12.97, 77.59);
        store
            .set(
                cache_key(coords, date(1), date(2)),
                r#"{"GHI":{"2024-01-01T00:00:00.000":5.1,"2024-01-02T00:00:00.000":5.2}}"#
                    .to_string(),
            )
            .await
            .unwrap();
        let cache = cache_with(store, provider.clone());

        let fetch = cache.get_range(coords, date(1), date(2)).await;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fetch.series().get(date(1)), Some(5.1));
        assert_eq!(fetch.series().get(date(2)), Some(5.2));
    }
}
