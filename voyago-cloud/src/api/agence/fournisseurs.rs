//! Fournisseur endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::fournisseur::{FournisseurCreate, FournisseurUpdate};

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::db::fournisseurs::Fournisseur;
use crate::state::AppState;

use super::{ApiResult, internal};

#[derive(Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

/// GET /api/agence/fournisseurs?q=
pub async fn list_fournisseurs(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Fournisseur>> {
    let fournisseurs = db::fournisseurs::list(&state.pool, &identity.agence_id, query.q.as_deref())
        .await
        .map_err(internal)?;
    Ok(Json(fournisseurs))
}

/// GET /api/agence/fournisseurs/{id}
pub async fn get_fournisseur(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Fournisseur> {
    let fournisseur = db::fournisseurs::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("fournisseur"))?;
    Ok(Json(fournisseur))
}

/// POST /api/agence/fournisseurs
pub async fn create_fournisseur(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<FournisseurCreate>,
) -> ApiResult<Fournisseur> {
    if payload.nom.trim().is_empty() {
        return Err(AppError::validation("nom is required"));
    }

    let now = shared::util::now_millis();
    let fournisseur = db::fournisseurs::create(&state.pool, &identity.agence_id, &payload, now)
        .await
        .map_err(internal)?;
    Ok(Json(fournisseur))
}

/// PUT /api/agence/fournisseurs/{id}
pub async fn update_fournisseur(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<FournisseurUpdate>,
) -> ApiResult<Fournisseur> {
    let fournisseur = db::fournisseurs::update(&state.pool, &identity.agence_id, id, &payload)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("fournisseur"))?;
    Ok(Json(fournisseur))
}

/// DELETE /api/agence/fournisseurs/{id}
pub async fn delete_fournisseur(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::fournisseurs::delete(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::not_found("fournisseur"));
    }
    Ok(Json(serde_json::json!({ "message": "Fournisseur deleted" })))
}
