//! Agency administration: listing and lifecycle transitions

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::types::AgenceStatus;

use crate::db;
use crate::db::agences::{Agence, AgenceSummary};
use crate::state::AppState;

use super::{ApiResult, internal};

/// Agency row as exposed to the admin console
#[derive(serde::Serialize)]
pub struct AgenceAdminView {
    pub id: String,
    pub nom: String,
    pub email: String,
    pub telephone: Option<String>,
    pub statut: String,
    pub modules_actifs: Vec<String>,
    pub vitrine_active: bool,
    pub slug: Option<String>,
    pub created_at: i64,
    pub approved_at: Option<i64>,
}

impl From<Agence> for AgenceAdminView {
    fn from(a: Agence) -> Self {
        Self {
            id: a.id,
            nom: a.nom,
            email: a.email,
            telephone: a.telephone,
            statut: a.statut,
            modules_actifs: a.modules_actifs,
            vitrine_active: a.vitrine_active,
            slug: a.slug,
            created_at: a.created_at,
            approved_at: a.approved_at,
        }
    }
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub statut: Option<String>,
}

/// GET /api/admin/agences?statut=
pub async fn list_agences(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<AgenceSummary>> {
    let agences = db::agences::list(&state.pool, query.statut.as_deref())
        .await
        .map_err(internal)?;
    Ok(Json(agences))
}

async fn load(state: &AppState, id: &str) -> Result<Agence, AppError> {
    db::agences::find_by_id(&state.pool, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::AgenceNotFound))
}

fn statut_of(agence: &Agence) -> Result<AgenceStatus, AppError> {
    AgenceStatus::from_db(&agence.statut).ok_or_else(|| {
        tracing::error!("Agence {} has unknown statut {:?}", agence.id, agence.statut);
        AppError::new(ErrorCode::InternalError)
    })
}

/// POST /api/admin/agences/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AgenceAdminView> {
    let agence = load(&state, &id).await?;
    if statut_of(&agence)? != AgenceStatus::EnAttente {
        return Err(
            AppError::new(ErrorCode::InvalidRequest).with_detail("statut", agence.statut)
        );
    }

    let now = shared::util::now_millis();
    db::agences::set_approved(&state.pool, &id, now)
        .await
        .map_err(internal)?;
    let _ = db::audit::log(&state.pool, &id, "agence_approuvee", None, now).await;

    Ok(Json(load(&state, &id).await?.into()))
}

/// POST /api/admin/agences/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AgenceAdminView> {
    let agence = load(&state, &id).await?;
    if statut_of(&agence)? != AgenceStatus::EnAttente {
        return Err(
            AppError::new(ErrorCode::InvalidRequest).with_detail("statut", agence.statut)
        );
    }

    db::agences::update_statut(&state.pool, &id, AgenceStatus::Rejetee.as_db())
        .await
        .map_err(internal)?;
    let now = shared::util::now_millis();
    let _ = db::audit::log(&state.pool, &id, "agence_rejetee", None, now).await;

    Ok(Json(load(&state, &id).await?.into()))
}

/// POST /api/admin/agences/{id}/suspend
pub async fn suspend(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AgenceAdminView> {
    let agence = load(&state, &id).await?;
    if statut_of(&agence)? != AgenceStatus::Approuvee {
        return Err(
            AppError::new(ErrorCode::InvalidRequest).with_detail("statut", agence.statut)
        );
    }

    db::agences::update_statut(&state.pool, &id, AgenceStatus::Suspendue.as_db())
        .await
        .map_err(internal)?;
    let now = shared::util::now_millis();
    let _ = db::audit::log(&state.pool, &id, "agence_suspendue", None, now).await;

    Ok(Json(load(&state, &id).await?.into()))
}

/// POST /api/admin/agences/{id}/reactivate
pub async fn reactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AgenceAdminView> {
    let agence = load(&state, &id).await?;
    if statut_of(&agence)? != AgenceStatus::Suspendue {
        return Err(
            AppError::new(ErrorCode::InvalidRequest).with_detail("statut", agence.statut)
        );
    }

    db::agences::update_statut(&state.pool, &id, AgenceStatus::Approuvee.as_db())
        .await
        .map_err(internal)?;
    let now = shared::util::now_millis();
    let _ = db::audit::log(&state.pool, &id, "agence_reactivee", None, now).await;

    Ok(Json(load(&state, &id).await?.into()))
}
