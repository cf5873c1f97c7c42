//! Caisse endpoints (module-gated)

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::caisse::{OperationCreate, SoldeCaisse};
use shared::types::ModuleId;

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::db::caisse::Operation;
use crate::state::AppState;

use super::{ApiResult, internal, require_module};

#[derive(Deserialize)]
pub struct ListQuery {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

/// GET /api/agence/caisse/operations?from=&to=
pub async fn list_operations(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Operation>> {
    require_module(&state, &identity.agence_id, ModuleId::Caisse).await?;
    let operations = db::caisse::list(&state.pool, &identity.agence_id, query.from, query.to)
        .await
        .map_err(internal)?;
    Ok(Json(operations))
}

/// POST /api/agence/caisse/operations
pub async fn create_operation(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<OperationCreate>,
) -> ApiResult<Operation> {
    require_module(&state, &identity.agence_id, ModuleId::Caisse).await?;
    if payload.montant <= Decimal::ZERO {
        return Err(AppError::new(ErrorCode::MontantInvalide));
    }
    if payload.motif.trim().is_empty() {
        return Err(AppError::validation("motif is required"));
    }

    let now = shared::util::now_millis();
    let date_operation = payload.date_operation.unwrap_or(now);
    let operation =
        db::caisse::create(&state.pool, &identity.agence_id, &payload, date_operation, now)
            .await
            .map_err(internal)?;
    Ok(Json(operation))
}

/// DELETE /api/agence/caisse/operations/{id}
pub async fn delete_operation(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    require_module(&state, &identity.agence_id, ModuleId::Caisse).await?;
    let deleted = db::caisse::delete(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::OperationNotFound));
    }
    Ok(Json(serde_json::json!({ "message": "Operation deleted" })))
}

/// GET /api/agence/caisse/solde
pub async fn solde(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
) -> ApiResult<SoldeCaisse> {
    require_module(&state, &identity.agence_id, ModuleId::Caisse).await?;
    let solde = db::caisse::solde(&state.pool, &identity.agence_id)
        .await
        .map_err(internal)?;
    Ok(Json(solde))
}
