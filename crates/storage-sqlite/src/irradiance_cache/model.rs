use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::irradiance_cache)]
#[diesel(primary_key(cache_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IrradianceCacheEntryDB {
    pub cache_key: String,
    /// Serialized series as produced by the core irradiance cache.
    pub payload: String,
    pub updated_at: NaiveDateTime,
}
