//! Application state for voyago-cloud

use sqlx::PgPool;

use crate::auth::rate_limit::{Quota, RateLimiter};
use crate::config::Config;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    /// JWT secret for agence and admin authentication
    pub jwt_secret: String,
    /// Rate limiter for login/registration routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// Create a new AppState: connect the pool and run pending migrations
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            rate_limiter: RateLimiter::new(
                Quota::per_minute(config.login_rate_per_minute),
                Quota::per_minute(config.register_rate_per_minute),
            ),
        })
    }
}
