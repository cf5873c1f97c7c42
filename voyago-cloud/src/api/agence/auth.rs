//! Agency login

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::types::AgenceStatus;

use crate::auth::jwt::{ROLE_AGENCE, create_token};
use crate::db;
use crate::state::AppState;
use crate::util::verify_password;

use super::{ApiResult, internal};

/// POST /api/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(serde::Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub agence_id: String,
    pub nom: String,
    pub statut: String,
    pub modules_actifs: Vec<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let email = req.email.trim().to_lowercase();
    let agence = db::agences::find_by_email(&state.pool, &email)
        .await
        .map_err(internal)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &agence.hashed_password) {
        return Err(AppError::invalid_credentials());
    }

    match AgenceStatus::from_db(&agence.statut) {
        Some(s) if s.can_login() => {}
        Some(AgenceStatus::EnAttente) => return Err(AppError::new(ErrorCode::AgenceEnAttente)),
        Some(AgenceStatus::Suspendue) => return Err(AppError::new(ErrorCode::AgenceSuspendue)),
        _ => return Err(AppError::new(ErrorCode::AccountDisabled)),
    }

    let token =
        create_token(&agence.id, &agence.email, ROLE_AGENCE, &state.jwt_secret).map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    let now = shared::util::now_millis();
    let _ = db::audit::log(&state.pool, &agence.id, "login", None, now).await;

    Ok(Json(LoginResponse {
        token,
        agence_id: agence.id,
        nom: agence.nom,
        statut: agence.statut,
        modules_actifs: agence.modules_actifs,
    }))
}
