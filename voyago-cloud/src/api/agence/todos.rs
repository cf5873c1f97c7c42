//! Todo endpoints (module-gated)

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::AppError;
use shared::models::todo::{TodoCreate, TodoUpdate};
use shared::types::ModuleId;

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::db::todos::Todo;
use crate::state::AppState;

use super::{ApiResult, internal, require_module};

/// GET /api/agence/todos
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
) -> ApiResult<Vec<Todo>> {
    require_module(&state, &identity.agence_id, ModuleId::Todos).await?;
    let todos = db::todos::list(&state.pool, &identity.agence_id)
        .await
        .map_err(internal)?;
    Ok(Json(todos))
}

/// POST /api/agence/todos
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<TodoCreate>,
) -> ApiResult<Todo> {
    require_module(&state, &identity.agence_id, ModuleId::Todos).await?;
    if payload.titre.trim().is_empty() {
        return Err(AppError::validation("titre is required"));
    }

    let now = shared::util::now_millis();
    let todo = db::todos::create(&state.pool, &identity.agence_id, &payload, now)
        .await
        .map_err(internal)?;
    Ok(Json(todo))
}

/// PUT /api/agence/todos/{id}
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
    Json(payload): Json<TodoUpdate>,
) -> ApiResult<Todo> {
    require_module(&state, &identity.agence_id, ModuleId::Todos).await?;
    let todo = db::todos::update(&state.pool, &identity.agence_id, id, &payload)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("todo"))?;
    Ok(Json(todo))
}

/// PUT /api/agence/todos/{id}/toggle
pub async fn toggle_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Todo> {
    require_module(&state, &identity.agence_id, ModuleId::Todos).await?;
    let todo = db::todos::toggle(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("todo"))?;
    Ok(Json(todo))
}

/// DELETE /api/agence/todos/{id}
pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    require_module(&state, &identity.agence_id, ModuleId::Todos).await?;
    let deleted = db::todos::delete(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?;
    if deleted == 0 {
        return Err(AppError::not_found("todo"));
    }
    Ok(Json(serde_json::json!({ "message": "Todo deleted" })))
}
