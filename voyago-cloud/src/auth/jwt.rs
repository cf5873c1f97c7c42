//! JWT authentication for the management API
//!
//! Two principals share the same HS256 secret and claims shape, separated
//! by the `role` claim: `agence` (back-office users) and `admin`
//! (platform operators).

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::state::AppState;

/// JWT claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Agence ID or admin ID
    pub sub: String,
    /// Account email
    pub email: String,
    /// `agence` or `admin`
    pub role: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated agency identity extracted from JWT
#[derive(Debug, Clone)]
pub struct AgenceIdentity {
    pub agence_id: String,
    pub email: String,
}

/// Authenticated platform admin identity extracted from JWT
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub admin_id: String,
    pub email: String,
}

const JWT_EXPIRY_HOURS: i64 = 24;

pub const ROLE_AGENCE: &str = "agence";
pub const ROLE_ADMIN: &str = "admin";

/// Create a JWT token for the given subject and role
pub fn create_token(
    sub: &str,
    email: &str,
    role: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: sub.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

// Auth failures use the same ApiResponse envelope as every other error.
fn auth_error(err: AppError) -> Response {
    err.into_response()
}

fn decode_claims(request: &Request, secret: &str) -> Result<Claims, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| auth_error(AppError::not_authenticated()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| auth_error(AppError::invalid_token("Invalid Authorization format")))?;

    let validation = Validation::default();
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => auth_error(AppError::new(ErrorCode::TokenExpired)),
            _ => auth_error(AppError::new(ErrorCode::TokenInvalid)),
        }
    })?;

    Ok(token_data.claims)
}

/// Middleware that extracts and verifies an agence JWT from the Authorization header
pub async fn agence_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let claims = decode_claims(&request, &state.jwt_secret)?;

    if claims.role != ROLE_AGENCE {
        return Err(auth_error(AppError::permission_denied(
            "Agence token required",
        )));
    }

    let identity = AgenceIdentity {
        agence_id: claims.sub,
        email: claims.email,
    };
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Middleware that extracts and verifies an admin JWT from the Authorization header
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let claims = decode_claims(&request, &state.jwt_secret)?;

    if claims.role != ROLE_ADMIN {
        return Err(auth_error(AppError::new(ErrorCode::AdminRequired)));
    }

    let identity = AdminIdentity {
        admin_id: claims.sub,
        email: claims.email,
    };
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_auth(value: Option<&str>) -> Request {
        let builder = Request::builder().uri("/api/agence/profile");
        let builder = match value {
            Some(v) => builder.header("Authorization", v),
            None => builder,
        };
        builder.body(Body::empty()).expect("request")
    }

    #[test]
    fn test_token_roundtrip() {
        let token = create_token("agence-1", "contact@soleil.fr", ROLE_AGENCE, "test-secret")
            .expect("token creation");

        let data = jsonwebtoken::decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .expect("token decode");

        assert_eq!(data.claims.sub, "agence-1");
        assert_eq!(data.claims.email, "contact@soleil.fr");
        assert_eq!(data.claims.role, ROLE_AGENCE);
        assert!(data.claims.exp > data.claims.iat);
    }

    async fn response_envelope(response: Response) -> (u16, shared::error::ApiResponse<()>) {
        let status = response.status().as_u16();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let envelope = serde_json::from_slice(&bytes).expect("envelope json");
        (status, envelope)
    }

    #[tokio::test]
    async fn test_missing_header_uses_envelope() {
        let request = request_with_auth(None);
        let response = decode_claims(&request, "test-secret").unwrap_err();

        let (status, envelope) = response_envelope(response).await;
        assert_eq!(status, 401);
        assert_eq!(envelope.code, Some(ErrorCode::NotAuthenticated.code()));
    }

    #[tokio::test]
    async fn test_garbage_token_uses_envelope() {
        let request = request_with_auth(Some("Bearer not-a-jwt"));
        let response = decode_claims(&request, "test-secret").unwrap_err();

        let (status, envelope) = response_envelope(response).await;
        assert_eq!(status, 401);
        assert_eq!(envelope.code, Some(ErrorCode::TokenInvalid.code()));
    }

    #[test]
    fn test_valid_token_decodes() {
        let token = create_token("agence-1", "contact@soleil.fr", ROLE_AGENCE, "test-secret")
            .expect("token creation");
        let request = request_with_auth(Some(&format!("Bearer {token}")));

        let claims = decode_claims(&request, "test-secret").expect("claims");
        assert_eq!(claims.sub, "agence-1");
        assert_eq!(claims.role, ROLE_AGENCE);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let token = create_token("admin-1", "ops@voyago.app", ROLE_ADMIN, "secret-a").unwrap();
        let result = jsonwebtoken::decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret-b"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
