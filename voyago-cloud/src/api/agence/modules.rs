//! Module activation endpoints (agency side)

use axum::{Extension, Json, extract::State};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::types::ModuleId;

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal};

/// GET /api/agence/modules
#[derive(serde::Serialize)]
pub struct ModulesResponse {
    pub modules_actifs: Vec<String>,
    pub core: Vec<&'static str>,
    pub requests: Vec<db::module_requests::ModuleRequest>,
}

pub async fn get_modules(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
) -> ApiResult<ModulesResponse> {
    let agence = db::agences::find_by_id(&state.pool, &identity.agence_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::AgenceNotFound))?;

    let requests = db::module_requests::list_for_agence(&state.pool, &identity.agence_id)
        .await
        .map_err(internal)?;

    Ok(Json(ModulesResponse {
        modules_actifs: agence.modules_actifs,
        core: ModuleId::CORE.iter().map(|m| m.as_db()).collect(),
        requests,
    }))
}

/// POST /api/agence/modules/request
#[derive(Deserialize)]
pub struct ModuleRequestPayload {
    pub module: ModuleId,
}

pub async fn request_module(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<ModuleRequestPayload>,
) -> ApiResult<db::module_requests::ModuleRequest> {
    let module = payload.module;

    let agence = db::agences::find_by_id(&state.pool, &identity.agence_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::AgenceNotFound))?;

    if module.is_core() || agence.modules_actifs.iter().any(|m| m == module.as_db()) {
        return Err(
            AppError::new(ErrorCode::ModuleAlreadyActive).with_detail("module", module.as_db())
        );
    }

    if db::module_requests::has_pending(&state.pool, &identity.agence_id, module)
        .await
        .map_err(internal)?
    {
        return Err(
            AppError::new(ErrorCode::ModuleRequestPending).with_detail("module", module.as_db())
        );
    }

    let now = shared::util::now_millis();
    let request = db::module_requests::create(&state.pool, &identity.agence_id, module, now)
        .await
        .map_err(internal)?;

    Ok(Json(request))
}
