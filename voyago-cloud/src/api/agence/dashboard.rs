//! Dashboard endpoint

use axum::{Extension, Json, extract::State};

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::state::AppState;

use super::{ApiResult, internal};

/// GET /api/agence/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
) -> ApiResult<db::dashboard::Dashboard> {
    let now = shared::util::now_millis();
    let dashboard = db::dashboard::load(&state.pool, &identity.agence_id, now)
        .await
        .map_err(internal)?;
    Ok(Json(dashboard))
}
