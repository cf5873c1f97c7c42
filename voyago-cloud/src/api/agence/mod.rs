//! Agency back-office API endpoints — split into sub-modules by domain
//!
//! Every route in this tree sits behind the agence JWT middleware; handlers
//! receive an [`AgenceIdentity`](crate::auth::jwt::AgenceIdentity) extension
//! and scope every query by `agence_id`.

mod account;
mod auth;
mod billets;
mod bons_commande;
mod caisse;
mod clients;
mod dashboard;
mod factures;
mod fournisseurs;
mod modules;
mod offres;
mod tickets;
mod todos;
mod vitrine;

use axum::routing::{delete, get, post, put};
use axum::{Router, middleware};
use shared::error::{AppError, ErrorCode};
use shared::types::ModuleId;

use crate::auth::jwt::agence_auth_middleware;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Mask an infrastructure error as InternalError, logging the cause.
pub(crate) fn internal(e: impl std::fmt::Display) -> AppError {
    tracing::error!("Internal error: {e}");
    AppError::new(ErrorCode::InternalError)
}

/// Check that a non-core module is active for this agency.
pub(crate) async fn require_module(
    state: &AppState,
    agence_id: &str,
    module: ModuleId,
) -> Result<(), AppError> {
    if module.is_core() {
        return Ok(());
    }
    let agence = crate::db::agences::find_by_id(&state.pool, agence_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::AgenceNotFound))?;

    if agence.modules_actifs.iter().any(|m| m == module.as_db()) {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::ModuleNotActive).with_detail("module", module.as_db()))
    }
}

// Login is public (rate limited); everything else requires the JWT
pub use auth::login;

/// Authenticated agency routes under `/api/agence`
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        // account
        .route(
            "/api/agence/profile",
            get(account::get_profile).put(account::update_profile),
        )
        .route("/api/agence/change-password", post(account::change_password))
        .route("/api/agence/audit-log", get(account::audit_log))
        // modules
        .route("/api/agence/modules", get(modules::get_modules))
        .route("/api/agence/modules/request", post(modules::request_module))
        // clients
        .route(
            "/api/agence/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/api/agence/clients/{id}",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        // fournisseurs
        .route(
            "/api/agence/fournisseurs",
            get(fournisseurs::list_fournisseurs).post(fournisseurs::create_fournisseur),
        )
        .route(
            "/api/agence/fournisseurs/{id}",
            get(fournisseurs::get_fournisseur)
                .put(fournisseurs::update_fournisseur)
                .delete(fournisseurs::delete_fournisseur),
        )
        // factures
        .route(
            "/api/agence/factures",
            get(factures::list_factures).post(factures::create_facture),
        )
        .route("/api/agence/factures/creances", get(factures::list_creances))
        .route(
            "/api/agence/factures/{id}",
            get(factures::get_facture)
                .put(factures::update_facture)
                .delete(factures::delete_facture),
        )
        .route("/api/agence/factures/{id}/payer", post(factures::payer))
        .route("/api/agence/factures/{id}/annuler", post(factures::annuler))
        // bons de commande
        .route(
            "/api/agence/bons-commande",
            get(bons_commande::list_bons).post(bons_commande::create_bon),
        )
        .route(
            "/api/agence/bons-commande/{id}",
            get(bons_commande::get_bon)
                .put(bons_commande::update_bon)
                .delete(bons_commande::delete_bon),
        )
        .route(
            "/api/agence/bons-commande/{id}/accepter",
            post(bons_commande::accepter),
        )
        .route(
            "/api/agence/bons-commande/{id}/refuser",
            post(bons_commande::refuser),
        )
        .route(
            "/api/agence/bons-commande/{id}/convert",
            post(bons_commande::convert),
        )
        // billets
        .route(
            "/api/agence/billets",
            get(billets::list_billets).post(billets::create_billet),
        )
        .route(
            "/api/agence/billets/{id}",
            get(billets::get_billet)
                .put(billets::update_billet)
                .delete(billets::delete_billet),
        )
        .route("/api/agence/billets/{id}/emettre", post(billets::emettre))
        .route("/api/agence/billets/{id}/annuler", post(billets::annuler))
        // caisse
        .route(
            "/api/agence/caisse/operations",
            get(caisse::list_operations).post(caisse::create_operation),
        )
        .route(
            "/api/agence/caisse/operations/{id}",
            delete(caisse::delete_operation),
        )
        .route("/api/agence/caisse/solde", get(caisse::solde))
        // vitrine + offres
        .route("/api/agence/vitrine", put(vitrine::update_vitrine))
        .route(
            "/api/agence/offres",
            get(offres::list_offres).post(offres::create_offre),
        )
        .route(
            "/api/agence/offres/{id}",
            get(offres::get_offre)
                .put(offres::update_offre)
                .delete(offres::delete_offre),
        )
        // tickets
        .route(
            "/api/agence/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route("/api/agence/tickets/{id}/fermer", post(tickets::fermer))
        // todos
        .route(
            "/api/agence/todos",
            get(todos::list_todos).post(todos::create_todo),
        )
        .route(
            "/api/agence/todos/{id}",
            put(todos::update_todo).delete(todos::delete_todo),
        )
        .route("/api/agence/todos/{id}/toggle", put(todos::toggle_todo))
        // dashboard
        .route("/api/agence/dashboard", get(dashboard::get_dashboard))
        .layer(middleware::from_fn_with_state(state, agence_auth_middleware))
}
