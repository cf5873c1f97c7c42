//! Support ticket endpoints (agency side, module-gated)

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::AppError;
use shared::models::ticket::{TicketCreate, TicketStatut};
use shared::types::ModuleId;

use crate::auth::jwt::AgenceIdentity;
use crate::db;
use crate::db::tickets::Ticket;
use crate::state::AppState;

use super::{ApiResult, internal, require_module};

/// GET /api/agence/tickets
pub async fn list_tickets(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
) -> ApiResult<Vec<Ticket>> {
    require_module(&state, &identity.agence_id, ModuleId::Tickets).await?;
    let tickets = db::tickets::list_for_agence(&state.pool, &identity.agence_id)
        .await
        .map_err(internal)?;
    Ok(Json(tickets))
}

/// POST /api/agence/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Json(payload): Json<TicketCreate>,
) -> ApiResult<Ticket> {
    require_module(&state, &identity.agence_id, ModuleId::Tickets).await?;
    if payload.sujet.trim().is_empty() {
        return Err(AppError::validation("sujet is required"));
    }

    let now = shared::util::now_millis();
    let ticket = db::tickets::create(&state.pool, &identity.agence_id, &payload, now)
        .await
        .map_err(internal)?;
    Ok(Json(ticket))
}

/// POST /api/agence/tickets/{id}/fermer
pub async fn fermer(
    State(state): State<AppState>,
    Extension(identity): Extension<AgenceIdentity>,
    Path(id): Path<i64>,
) -> ApiResult<Ticket> {
    require_module(&state, &identity.agence_id, ModuleId::Tickets).await?;
    let now = shared::util::now_millis();
    let updated = db::tickets::set_statut_for_agence(
        &state.pool,
        &identity.agence_id,
        id,
        TicketStatut::Ferme,
        now,
    )
    .await
    .map_err(internal)?;
    if updated == 0 {
        return Err(AppError::not_found("ticket"));
    }

    let ticket = db::tickets::get(&state.pool, &identity.agence_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::not_found("ticket"))?;
    Ok(Json(ticket))
}
