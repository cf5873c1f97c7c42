//! Module request review (admin side)

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::AppError;

use crate::db;
use crate::db::module_requests::ModuleRequest;
use crate::state::AppState;

use super::{ApiResult, internal};

#[derive(Deserialize)]
pub struct ListQuery {
    pub statut: Option<String>,
}

/// GET /api/admin/module-requests?statut=
pub async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<ModuleRequest>> {
    let requests = db::module_requests::list_all(&state.pool, query.statut.as_deref())
        .await
        .map_err(internal)?;
    Ok(Json(requests))
}

/// POST /api/admin/module-requests/{id}/approve
///
/// Merges the granted module into the agency's active list.
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ModuleRequest> {
    let now = shared::util::now_millis();
    let request = db::module_requests::approve(&state.pool, id, now)
        .await
        .map_err(AppError::from)?;

    let _ = db::audit::log(
        &state.pool,
        &request.agence_id,
        "module_approuve",
        Some(&serde_json::json!({ "module": request.module })),
        now,
    )
    .await;

    Ok(Json(request))
}

/// POST /api/admin/module-requests/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ModuleRequest> {
    let now = shared::util::now_millis();
    let request = db::module_requests::reject(&state.pool, id, now)
        .await
        .map_err(AppError::from)?;
    Ok(Json(request))
}
