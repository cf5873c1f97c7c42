//! Billet endpoints (module-gated)

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::billet::{BilletCreate, BilletStatut, BilletUpdate};
use shared::types::ModuleId;

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::db::billets::Billet;
use crate::state::AppState;

use super::{ApiResult, internal, require_module};

#[derive(Deserialize)]
pub struct ListQuery {
    pub statut: Option<String>,
}

/// GET /api/agence/billets?statut=
pub async fn list_billets(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Billet>> {
    require_module(&state, &identity.agence_id, ModuleId::Billets).await?;
    let billets = db::billets::list(&state.pool, &identity.agence_id, query.statut.as_deref())
        .await
        .map_err(internal)?;
    Ok(Json(billets))
}

/// GET /api/agence/billets/{id}
pub async fn get_billet(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Billet> {
    require_module(&state, &identity.agence_id, ModuleId::Billets).await?;
    let billet = db::billets::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::BilletNotFound))?;
    Ok(Json(billet))
}

/// POST /api/agence/billets
pub async fn create_billet(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<BilletCreate>,
) -> ApiResult<Billet> {
    require_module(&state, &identity.agence_id, ModuleId::Billets).await?;
    if payload.numero_billet.trim().is_empty() {
        return Err(AppError::validation("numero_billet is required"));
    }
    if payload.prix < Decimal::ZERO {
        return Err(AppError::new(ErrorCode::MontantInvalide));
    }

    let now = shared::util::now_millis();
    let billet = db::billets::create(&state.pool, &identity.agence_id, &payload, now)
        .await
        .map_err(internal)?;
    Ok(Json(billet))
}

/// PUT /api/agence/billets/{id}
pub async fn update_billet(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<BilletUpdate>,
) -> ApiResult<Billet> {
    require_module(&state, &identity.agence_id, ModuleId::Billets).await?;
    if let Some(prix) = payload.prix
        && prix < Decimal::ZERO
    {
        return Err(AppError::new(ErrorCode::MontantInvalide));
    }

    let billet = db::billets::update(&state.pool, &identity.agence_id, id, &payload)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::BilletNotFound))?;
    Ok(Json(billet))
}

async fn reload(state: &AppState, agence_id: &str, id: i64) -> Result<Billet, AppError> {
    db::billets::get(&state.pool, agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::BilletNotFound))
}

/// POST /api/agence/billets/{id}/emettre
///
/// Only a reserved billet can be issued.
pub async fn emettre(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Billet> {
    require_module(&state, &identity.agence_id, ModuleId::Billets).await?;
    let billet = reload(&state, &identity.agence_id, id).await?;

    match BilletStatut::from_db(&billet.statut) {
        Some(BilletStatut::Reserve) => {}
        Some(BilletStatut::Emis) => return Err(AppError::new(ErrorCode::BilletDejaEmis)),
        _ => return Err(AppError::new(ErrorCode::BilletAnnule)),
    }

    db::billets::set_statut(&state.pool, &identity.agence_id, id, BilletStatut::Emis)
        .await
        .map_err(internal)?;
    Ok(Json(reload(&state, &identity.agence_id, id).await?))
}

/// POST /api/agence/billets/{id}/annuler
pub async fn annuler(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Billet> {
    require_module(&state, &identity.agence_id, ModuleId::Billets).await?;
    let billet = reload(&state, &identity.agence_id, id).await?;

    if BilletStatut::from_db(&billet.statut) == Some(BilletStatut::Annule) {
        return Err(AppError::new(ErrorCode::BilletAnnule));
    }

    db::billets::set_statut(&state.pool, &identity.agence_id, id, BilletStatut::Annule)
        .await
        .map_err(internal)?;
    Ok(Json(reload(&state, &identity.agence_id, id).await?))
}

/// DELETE /api/agence/billets/{id}
pub async fn delete_billet(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    require_module(&state, &identity.agence_id, ModuleId::Billets).await?;
    let deleted = db::billets::delete(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::new(ErrorCode::BilletNotFound));
    }
    Ok(Json(serde_json::json!({ "message": "Billet deleted" })))
}
