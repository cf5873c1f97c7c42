//! Platform admin API endpoints

mod agences;
mod auth;
mod module_requests;
mod tickets;

use axum::routing::{get, post};
use axum::{Router, middleware};

use crate::auth::jwt::admin_auth_middleware;
use crate::state::AppState;

pub(crate) use super::agence::{ApiResult, internal};

// Login is public (rate limited); everything else requires the admin JWT
pub use auth::login;

/// Authenticated admin routes under `/api/admin`
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/agences", get(agences::list_agences))
        .route("/api/admin/agences/{id}/approve", post(agences::approve))
        .route("/api/admin/agences/{id}/reject", post(agences::reject))
        .route("/api/admin/agences/{id}/suspend", post(agences::suspend))
        .route(
            "/api/admin/agences/{id}/reactivate",
            post(agences::reactivate),
        )
        .route(
            "/api/admin/module-requests",
            get(module_requests::list_requests),
        )
        .route(
            "/api/admin/module-requests/{id}/approve",
            post(module_requests::approve),
        )
        .route(
            "/api/admin/module-requests/{id}/reject",
            post(module_requests::reject),
        )
        .route("/api/admin/tickets", get(tickets::list_tickets))
        .route("/api/admin/tickets/{id}/statut", post(tickets::set_statut))
        .layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
