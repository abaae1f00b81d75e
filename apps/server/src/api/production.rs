use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use solarbond_core::production::ProductionRecord;

use crate::{error::ApiResult, main_lib::AppState, models::UpsertResponse};

/// A bond's production history, oldest first.
async fn list_production(
    Path(bond_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ProductionRecord>>> {
    let mut records = state.production_repository.list_by_bond(&bond_id)?;
    records.sort_by_key(|r| r.date);
    Ok(Json(records))
}

async fn ingest_production(
    State(state): State<Arc<AppState>>,
    Json(records): Json<Vec<ProductionRecord>>,
) -> ApiResult<Json<UpsertResponse>> {
    for record in &records {
        record.validate()?;
    }
    let upserted = state.production_repository.upsert_records(records).await?;
    Ok(Json(UpsertResponse { upserted }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/production", post(ingest_production))
        .route("/production/{bond_id}", get(list_production))
}
