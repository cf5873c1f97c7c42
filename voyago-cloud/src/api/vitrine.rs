//! Public vitrine endpoint
//!
//! No authentication: this is the storefront a travel agency shares with
//! the world. Only approved agencies with an active vitrine resolve; the
//! rest are indistinguishable from unknown slugs.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::types::AgenceStatus;

use crate::db;
use crate::db::offres::Offre;
use crate::state::AppState;

use super::agence::{ApiResult, internal};

#[derive(serde::Serialize)]
pub struct VitrineResponse {
    pub nom: String,
    pub slug: String,
    pub description_publique: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub offres: Vec<Offre>,
}

/// GET /api/vitrine/{slug}
pub async fn vitrine_publique(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<VitrineResponse> {
    let agence = db::agences::find_by_slug(&state.pool, &slug)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::VitrineDisabled))?;

    let approuvee = AgenceStatus::from_db(&agence.statut) == Some(AgenceStatus::Approuvee);
    if !approuvee || !agence.vitrine_active {
        return Err(AppError::new(ErrorCode::VitrineDisabled));
    }

    let offres = db::offres::list_publiees(&state.pool, &agence.id)
        .await
        .map_err(internal)?;

    Ok(Json(VitrineResponse {
        nom: agence.nom,
        slug,
        description_publique: agence.description_publique,
        telephone: agence.telephone,
        adresse: agence.adresse,
        offres,
    }))
}
