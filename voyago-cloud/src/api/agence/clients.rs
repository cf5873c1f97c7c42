//! Client endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::client::{ClientCreate, ClientUpdate};

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::db::clients::Client;
use crate::state::AppState;

use super::{ApiResult, internal};

#[derive(Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
}

/// GET /api/agence/clients?q=
pub async fn list_clients(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Client>> {
    let clients = db::clients::list(&state.pool, &identity.agence_id, query.q.as_deref())
        .await
        .map_err(internal)?;
    Ok(Json(clients))
}

/// GET /api/agence/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Client> {
    let client = db::clients::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("client"))?;
    Ok(Json(client))
}

/// POST /api/agence/clients
pub async fn create_client(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<ClientCreate>,
) -> ApiResult<Client> {
    if payload.nom.trim().is_empty() {
        return Err(AppError::validation("nom is required"));
    }

    let now = shared::util::now_millis();
    let client = db::clients::create(&state.pool, &identity.agence_id, &payload, now)
        .await
        .map_err(internal)?;
    Ok(Json(client))
}

/// PUT /api/agence/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<ClientUpdate>,
) -> ApiResult<Client> {
    let client = db::clients::update(&state.pool, &identity.agence_id, id, &payload)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("client"))?;
    Ok(Json(client))
}

/// DELETE /api/agence/clients/{id}
///
/// Refused while the client still has factures.
pub async fn delete_client(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let nb_factures = db::factures::count_by_client(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?;
    if nb_factures > 0 {
        return Err(
            AppError::new(ErrorCode::ClientHasFactures).with_detail("factures", nb_factures)
        );
    }

    let deleted = db::clients::delete(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::not_found("client"));
    }

    Ok(Json(serde_json::json!({ "message": "Client deleted" })))
}
