//! Platform admin login

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};

use crate::auth::jwt::{ROLE_ADMIN, create_token};
use crate::db;
use crate::state::AppState;
use crate::util::verify_password;

use super::{ApiResult, internal};

/// POST /api/admin/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(serde::Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin_id: String,
    pub nom: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let email = req.email.trim().to_lowercase();
    let admin = db::admins::find_by_email(&state.pool, &email)
        .await
        .map_err(internal)?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &admin.hashed_password) {
        return Err(AppError::invalid_credentials());
    }

    let token =
        create_token(&admin.id, &admin.email, ROLE_ADMIN, &state.jwt_secret).map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(LoginResponse {
        token,
        admin_id: admin.id,
        nom: admin.nom,
    }))
}
