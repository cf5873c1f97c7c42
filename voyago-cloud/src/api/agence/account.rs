//! Account endpoints: profile, password change, audit log

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::agence::AgenceUpdate;

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::db::agences::Agence;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

use super::{ApiResult, internal};

/// Agency profile as exposed to the agency itself
#[derive(serde::Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub nom: String,
    pub email: String,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub statut: String,
    pub modules_actifs: Vec<String>,
    pub vitrine_active: bool,
    pub slug: Option<String>,
    pub description_publique: Option<String>,
    pub created_at: i64,
    pub approved_at: Option<i64>,
}

impl From<Agence> for ProfileResponse {
    fn from(a: Agence) -> Self {
        Self {
            id: a.id,
            nom: a.nom,
            email: a.email,
            telephone: a.telephone,
            adresse: a.adresse,
            statut: a.statut,
            modules_actifs: a.modules_actifs,
            vitrine_active: a.vitrine_active,
            slug: a.slug,
            description_publique: a.description_publique,
            created_at: a.created_at,
            approved_at: a.approved_at,
        }
    }
}

pub(super) async fn load_profile(
    state: &AppState,
    agence_id: &str,
) -> Result<ProfileResponse, AppError> {
    let agence = db::agences::find_by_id(&state.pool, agence_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::AgenceNotFound))?;
    Ok(agence.into())
}

/// GET /api/agence/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
) -> ApiResult<ProfileResponse> {
    Ok(Json(load_profile(&state, &identity.agence_id).await?))
}

/// PUT /api/agence/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<AgenceUpdate>,
) -> ApiResult<ProfileResponse> {
    if let Some(nom) = &payload.nom
        && nom.trim().is_empty()
    {
        return Err(AppError::validation("nom must not be empty"));
    }

    db::agences::update_profile(&state.pool, &identity.agence_id, &payload)
        .await
        .map_err(internal)?;

    Ok(Json(load_profile(&state, &identity.agence_id).await?))
}

/// POST /api/agence/change-password
#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<serde_json::Value> {
    if req.new_password.len() < 8 {
        return Err(AppError::validation(
            "new password must be at least 8 characters",
        ));
    }

    let agence = db::agences::find_by_id(&state.pool, &identity.agence_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::AgenceNotFound))?;

    if !verify_password(&req.current_password, &agence.hashed_password) {
        return Err(AppError::invalid_credentials());
    }

    let hashed = hash_password(&req.new_password).map_err(internal)?;
    db::agences::update_password(&state.pool, &identity.agence_id, &hashed)
        .await
        .map_err(internal)?;

    let now = shared::util::now_millis();
    let _ = db::audit::log(&state.pool, &identity.agence_id, "password_change", None, now).await;

    Ok(Json(
        serde_json::json!({ "message": "Password has been changed" }),
    ))
}

/// GET /api/agence/audit-log?limit=&offset=
#[derive(Deserialize)]
pub struct AuditLogQuery {
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

pub async fn audit_log(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Query(query): Query<AuditLogQuery>,
) -> ApiResult<Vec<db::audit::AuditEntry>> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let offset = query.offset.unwrap_or(0).max(0);

    let entries = db::audit::query(&state.pool, &identity.agence_id, limit, offset)
        .await
        .map_err(internal)?;

    Ok(Json(entries))
}
