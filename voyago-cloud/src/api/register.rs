//! Agency registration endpoint (public, rate limited)

use axum::{Json, extract::State};
use serde::Deserialize;
use shared::error::AppError;
use shared::types::ModuleId;

use crate::db;
use crate::state::AppState;
use crate::util::hash_password;

use super::agence::{ApiResult, internal};

/// POST /api/register
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub nom: String,
    pub email: String,
    pub password: String,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
}

#[derive(serde::Serialize)]
pub struct RegisterResponse {
    pub agence_id: String,
    pub statut: String,
    pub message: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<RegisterResponse> {
    let email = req.email.trim().to_lowercase();

    if req.nom.trim().is_empty() {
        return Err(AppError::validation("nom is required"));
    }
    if !email.contains('@') {
        return Err(AppError::validation("invalid email address"));
    }
    if req.password.len() < 8 {
        return Err(AppError::validation(
            "password must be at least 8 characters",
        ));
    }

    if db::agences::find_by_email(&state.pool, &email)
        .await
        .map_err(internal)?
        .is_some()
    {
        return Err(AppError::already_exists("agence"));
    }

    let hashed = hash_password(&req.password).map_err(internal)?;
    let id = uuid::Uuid::new_v4().to_string();
    let modules: Vec<String> = ModuleId::CORE.iter().map(|m| m.as_db().to_string()).collect();
    let now = shared::util::now_millis();

    db::agences::create(
        &state.pool,
        &id,
        req.nom.trim(),
        &email,
        &hashed,
        req.telephone.as_deref(),
        req.adresse.as_deref(),
        &modules,
        now,
    )
    .await
    .map_err(internal)?;

    let _ = db::audit::log(&state.pool, &id, "register", None, now).await;

    Ok(Json(RegisterResponse {
        agence_id: id,
        statut: "en_attente".to_string(),
        message: "Registration received, awaiting platform approval".to_string(),
    }))
}
