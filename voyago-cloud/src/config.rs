//! Cloud server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Cloud server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for agence/admin authentication
    pub jwt_secret: String,
    /// Login attempts allowed per IP per minute
    pub login_rate_per_minute: u32,
    /// Registrations allowed per IP per minute
    pub register_rate_per_minute: u32,
}

const DEFAULT_LOGIN_RATE: u32 = 5;
const DEFAULT_REGISTER_RATE: u32 = 3;

fn env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            login_rate_per_minute: env_u32("LOGIN_RATE_PER_MINUTE", DEFAULT_LOGIN_RATE),
            register_rate_per_minute: env_u32("REGISTER_RATE_PER_MINUTE", DEFAULT_REGISTER_RATE),
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_dev_fallback() {
        let val = Config::require_secret("VOYAGO_TEST_SECRET_UNSET", "development").unwrap();
        assert!(val.starts_with("dev-"));
    }

    #[test]
    fn test_require_secret_production_missing() {
        let err = Config::require_secret("VOYAGO_TEST_SECRET_UNSET", "production");
        assert!(err.is_err());
    }

    #[test]
    fn test_env_u32_default_when_unset() {
        assert_eq!(env_u32("VOYAGO_TEST_RATE_UNSET", DEFAULT_LOGIN_RATE), 5);
        assert_eq!(env_u32("VOYAGO_TEST_RATE_UNSET", DEFAULT_REGISTER_RATE), 3);
    }
}
