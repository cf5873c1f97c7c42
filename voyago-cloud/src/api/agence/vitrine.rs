//! Vitrine settings (agency side, module-gated)

use axum::{Extension, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::agence::VitrineUpdate;
use shared::types::ModuleId;
use shared::util::is_valid_slug;

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::state::AppState;

use super::account::ProfileResponse;
use super::{ApiResult, internal, require_module};

/// PUT /api/agence/vitrine
///
/// Slug must be lowercase `[a-z0-9-]` and unique across agencies.
pub async fn update_vitrine(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<VitrineUpdate>,
) -> ApiResult<ProfileResponse> {
    require_module(&state, &identity.agence_id, ModuleId::Vitrine).await?;

    // Validate only when a new slug is set; explicit null clears it.
    if let Some(Some(slug)) = &payload.slug {
        if !is_valid_slug(slug) {
            return Err(AppError::new(ErrorCode::SlugInvalid).with_detail("slug", slug.clone()));
        }
        if db::agences::slug_taken_by_other(&state.pool, slug, &identity.agence_id)
            .await
            .map_err(internal)?
        {
            return Err(AppError::new(ErrorCode::SlugTaken).with_detail("slug", slug.clone()));
        }
    }

    db::agences::update_vitrine(
        &state.pool,
        &identity.agence_id,
        payload.vitrine_active,
        payload.slug.as_ref().map(|s| s.as_deref()),
        payload.description_publique.as_ref().map(|d| d.as_deref()),
    )
    .await
    .map_err(internal)?;

    Ok(Json(
        super::account::load_profile(&state, &identity.agence_id).await?,
    ))
}
