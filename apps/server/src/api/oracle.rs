use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use solarbond_core::{
    audit::{BatchAuditReport, DailyAudit, PenaltySummary, PublishedAudit},
    errors::{Error as CoreError, ValidationError},
};

use crate::{error::ApiResult, main_lib::AppState};

fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| CoreError::from(ValidationError::DateTimeParse(e)).into())
}

async fn get_daily_pr(
    Path((bond_id, date)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DailyAudit>> {
    let date = parse_date(&date)?;
    let audit = state.audit_service.audit_single_day(&bond_id, date).await?;
    Ok(Json(audit))
}

async fn publish_daily_pr(
    Path((bond_id, date)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PublishedAudit>> {
    let date = parse_date(&date)?;
    let published = state.audit_service.audit_and_publish(&bond_id, date).await?;
    tracing::info!(
        "Audit for {} on {} published: {}",
        bond_id,
        date,
        published.blockchain_tx
    );
    Ok(Json(published))
}

async fn get_batch_audit(
    Path(bond_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BatchAuditReport>> {
    let report = state.audit_service.audit_batch(&bond_id).await?;
    Ok(Json(report))
}

async fn get_penalty_summary(
    Path(bond_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PenaltySummary>> {
    let summary = state.audit_service.penalty_summary(&bond_id).await?;
    Ok(Json(summary))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/oracle/pr/{bond_id}/{date}", get(get_daily_pr))
        .route("/oracle/pr/{bond_id}/{date}/publish", post(publish_daily_pr))
        .route("/oracle/audit/{bond_id}", get(get_batch_audit))
        .route(
            "/oracle/penalty-summary/{bond_id}",
            get(get_penalty_summary),
        )
}
