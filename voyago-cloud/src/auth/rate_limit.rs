//! Per-IP throttling of the unauthenticated entry points
//!
//! Login and registration are the only routes reachable without a JWT, so
//! they are the only ones throttled. Quotas come from [`Config`] so
//! deployments can tune them; counters are fixed windows held in memory
//! and swept by a periodic cleanup task.
//!
//! [`Config`]: crate::config::Config

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::state::AppState;

/// Requests allowed per fixed window
#[derive(Debug, Clone, Copy)]
pub struct Quota {
    pub max_requests: u32,
    pub window: Duration,
}

impl Quota {
    pub const fn per_minute(max_requests: u32) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(60),
        }
    }
}

/// The throttled entry points, each with its own quota and counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Throttled {
    Login,
    Register,
}

struct Window {
    hits: u32,
    started: Instant,
}

/// Windows older than this are dropped by [`RateLimiter::cleanup`].
const STALE_AFTER: Duration = Duration::from_secs(300);

#[derive(Clone)]
pub struct RateLimiter {
    login: Quota,
    register: Quota,
    windows: Arc<Mutex<HashMap<(Throttled, String), Window>>>,
}

impl RateLimiter {
    pub fn new(login: Quota, register: Quota) -> Self {
        Self {
            login,
            register,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn quota(&self, route: Throttled) -> Quota {
        match route {
            Throttled::Login => self.login,
            Throttled::Register => self.register,
        }
    }

    /// Returns `true` if the request is allowed, `false` if throttled.
    async fn allow(&self, route: Throttled, ip: &str) -> bool {
        let quota = self.quota(route);
        let mut windows = self.windows.lock().await;
        let now = Instant::now();

        let window = windows
            .entry((route, ip.to_owned()))
            .or_insert_with(|| Window {
                hits: 0,
                started: now,
            });

        if now.duration_since(window.started) >= quota.window {
            window.hits = 0;
            window.started = now;
        }

        window.hits += 1;
        window.hits <= quota.max_requests
    }

    /// Drop windows that have not seen traffic since [`STALE_AFTER`].
    pub async fn cleanup(&self) {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();
        windows.retain(|_, window| now.duration_since(window.started) < STALE_AFTER);
    }
}

/// Client IP: first X-Forwarded-For entry behind a reverse proxy,
/// otherwise the peer address from ConnectInfo.
fn extract_ip(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_owned();
        }
    }

    request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_owned())
}

async fn throttle(
    route: Throttled,
    state: AppState,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let ip = extract_ip(&request);
    if !state.rate_limiter.allow(route, &ip).await {
        tracing::warn!(route = ?route, %ip, "request rate limited");
        return Err(AppError::new(ErrorCode::RateLimited).into_response());
    }
    Ok(next.run(request).await)
}

/// Rate limit middleware for the login routes
pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    throttle(Throttled::Login, state, request, next).await
}

/// Rate limit middleware for registration
pub async fn register_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    throttle(Throttled::Register, state, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> RateLimiter {
        RateLimiter::new(Quota::per_minute(5), Quota::per_minute(3))
    }

    #[tokio::test]
    async fn test_allows_until_quota() {
        let limiter = limiter();
        for _ in 0..5 {
            assert!(limiter.allow(Throttled::Login, "10.0.0.1").await);
        }
        assert!(!limiter.allow(Throttled::Login, "10.0.0.1").await);
    }

    #[tokio::test]
    async fn test_quotas_are_per_ip() {
        let limiter = limiter();
        for _ in 0..5 {
            assert!(limiter.allow(Throttled::Login, "10.0.0.1").await);
        }
        assert!(limiter.allow(Throttled::Login, "10.0.0.2").await);
    }

    #[tokio::test]
    async fn test_routes_have_independent_quotas() {
        let limiter = limiter();
        for _ in 0..3 {
            assert!(limiter.allow(Throttled::Register, "10.0.0.1").await);
        }
        assert!(!limiter.allow(Throttled::Register, "10.0.0.1").await);
        assert!(limiter.allow(Throttled::Login, "10.0.0.1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_resets_after_expiry() {
        let limiter = limiter();
        for _ in 0..5 {
            assert!(limiter.allow(Throttled::Login, "10.0.0.1").await);
        }
        assert!(!limiter.allow(Throttled::Login, "10.0.0.1").await);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(limiter.allow(Throttled::Login, "10.0.0.1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_drops_stale_windows() {
        let limiter = limiter();
        assert!(limiter.allow(Throttled::Login, "10.0.0.1").await);

        tokio::time::advance(STALE_AFTER + Duration::from_secs(1)).await;
        limiter.cleanup().await;

        assert!(limiter.windows.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_configured_quota_applies() {
        let limiter = RateLimiter::new(Quota::per_minute(1), Quota::per_minute(1));
        assert!(limiter.allow(Throttled::Login, "10.0.0.1").await);
        assert!(!limiter.allow(Throttled::Login, "10.0.0.1").await);
    }
}
