//! Vitrine offres endpoints (module-gated)

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::offre::{OffreCreate, OffreUpdate};
use shared::types::ModuleId;

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::db::offres::Offre;
use crate::state::AppState;

use super::{ApiResult, internal, require_module};

/// GET /api/agence/offres
pub async fn list_offres(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
) -> ApiResult<Vec<Offre>> {
    require_module(&state, &identity.agence_id, ModuleId::Vitrine).await?;
    let offres = db::offres::list(&state.pool, &identity.agence_id)
        .await
        .map_err(internal)?;
    Ok(Json(offres))
}

/// GET /api/agence/offres/{id}
pub async fn get_offre(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Offre> {
    require_module(&state, &identity.agence_id, ModuleId::Vitrine).await?;
    let offre = db::offres::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("offre"))?;
    Ok(Json(offre))
}

/// POST /api/agence/offres
pub async fn create_offre(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<OffreCreate>,
) -> ApiResult<Offre> {
    require_module(&state, &identity.agence_id, ModuleId::Vitrine).await?;
    if payload.titre.trim().is_empty() {
        return Err(AppError::validation("titre is required"));
    }
    if payload.prix < Decimal::ZERO {
        return Err(AppError::new(ErrorCode::MontantInvalide));
    }

    let now = shared::util::now_millis();
    let offre = db::offres::create(&state.pool, &identity.agence_id, &payload, now)
        .await
        .map_err(internal)?;
    Ok(Json(offre))
}

/// PUT /api/agence/offres/{id}
pub async fn update_offre(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<OffreUpdate>,
) -> ApiResult<Offre> {
    require_module(&state, &identity.agence_id, ModuleId::Vitrine).await?;
    if let Some(prix) = payload.prix
        && prix < Decimal::ZERO
    {
        return Err(AppError::new(ErrorCode::MontantInvalide));
    }

    let offre = db::offres::update(&state.pool, &identity.agence_id, id, &payload)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("offre"))?;
    Ok(Json(offre))
}

/// DELETE /api/agence/offres/{id}
pub async fn delete_offre(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    require_module(&state, &identity.agence_id, ModuleId::Vitrine).await?;
    let deleted = db::offres::delete(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::not_found("offre"));
    }
    Ok(Json(serde_json::json!({ "message": "Offre deleted" })))
}
