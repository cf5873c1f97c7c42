//! Support ticket administration

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::AppError;
use shared::models::ticket::TicketStatut;

use crate::db;
use crate::db::tickets::Ticket;
use crate::state::AppState;

use super::{ApiResult, internal};

#[derive(Deserialize)]
pub struct ListQuery {
    pub statut: Option<String>,
}

/// GET /api/admin/tickets?statut=
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Ticket>> {
    let tickets = db::tickets::list_all(&state.pool, query.statut.as_deref())
        .await
        .map_err(internal)?;
    Ok(Json(tickets))
}

/// POST /api/admin/tickets/{id}/statut
#[derive(Deserialize)]
pub struct StatutPayload {
    pub statut: TicketStatut,
}

pub async fn set_statut(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatutPayload>,
) -> ApiResult<serde_json::Value> {
    let now = shared::util::now_millis();
    let updated = db::tickets::set_statut(&state.pool, id, payload.statut, now)
        .await
        .map_err(internal)?;
    if updated == 0 {
        return Err(AppError::not_found("ticket"));
    }
    Ok(Json(serde_json::json!({ "message": "Ticket updated" })))
}
