//! API routes for voyago-cloud

pub mod admin;
pub mod agence;
pub mod health;
pub mod register;
pub mod vitrine;

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Public registration (no auth, rate limited)
    let registration = Router::new()
        .route("/api/register", post(register::register))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            register_rate_limit,
        ));

    // Public logins (rate limited)
    let logins = Router::new()
        .route("/api/login", post(agence::login))
        .route("/api/admin/login", post(admin::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));

    // Public vitrine (no auth)
    let vitrine = Router::new().route("/api/vitrine/{slug}", get(vitrine::vitrine_publique));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(registration)
        .merge(logins)
        .merge(vitrine)
        .merge(agence::router(state.clone()))
        .merge(admin::router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
