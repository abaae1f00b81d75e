use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use solarbond_core::{bonds::Bond, errors::Error as CoreError};

use crate::{error::ApiResult, main_lib::AppState, models::UpsertResponse};

async fn list_bonds(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Bond>>> {
    let bonds = state.bond_repository.list_bonds()?;
    Ok(Json(bonds))
}

async fn get_bond(
    Path(bond_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Bond>> {
    let bond = state
        .bond_repository
        .get_bond(&bond_id)?
        .ok_or_else(|| CoreError::NotFound(format!("Bond {} not found", bond_id)))?;
    Ok(Json(bond))
}

async fn upsert_bonds(
    State(state): State<Arc<AppState>>,
    Json(bonds): Json<Vec<Bond>>,
) -> ApiResult<Json<UpsertResponse>> {
    for bond in &bonds {
        bond.validate()?;
    }
    let upserted = state.bond_repository.upsert_bonds(bonds).await?;
    Ok(Json(UpsertResponse { upserted }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bonds", get(list_bonds).put(upsert_bonds))
        .route("/bonds/{bond_id}", get(get_bond))
}
