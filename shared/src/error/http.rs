//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::AgenceNotFound
            | Self::FactureNotFound
            | Self::BonCommandeNotFound
            | Self::OperationNotFound
            | Self::BilletNotFound
            | Self::VitrineDisabled => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::SlugTaken
            | Self::ModuleAlreadyActive
            | Self::ModuleRequestPending
            | Self::FactureAlreadyPayee
            | Self::BonCommandeDejaConverti
            | Self::BilletDejaEmis
            | Self::ClientHasFactures => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::AdminRequired
            | Self::ModuleNotActive
            | Self::AgenceEnAttente
            | Self::AgenceSuspendue => StatusCode::FORBIDDEN,

            // 429 Too Many Requests
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,

            // 422 Unprocessable Entity (business-rule state transitions)
            Self::FactureAnnulee | Self::BonCommandeNonAccepte | Self::BilletAnnule => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
    }

    #[test]
    fn test_not_found_status() {
        assert_eq!(ErrorCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::FactureNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::BonCommandeNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        // An unpublished vitrine is indistinguishable from a missing one
        assert_eq!(
            ErrorCode::VitrineDisabled.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_status() {
        assert_eq!(ErrorCode::SlugTaken.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::FactureAlreadyPayee.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::BonCommandeDejaConverti.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_unauthorized_status() {
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::TokenExpired.http_status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_rate_limited_status() {
        assert_eq!(
            ErrorCode::RateLimited.http_status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_forbidden_status() {
        assert_eq!(
            ErrorCode::AgenceEnAttente.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::ModuleNotActive.http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_unprocessable_status() {
        assert_eq!(
            ErrorCode::BonCommandeNonAccepte.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_bad_request_status() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::MontantInvalide.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_internal_error_status() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
