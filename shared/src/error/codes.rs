//! Unified error codes for the Voyago platform
//!
//! Error codes are shared between voyago-cloud and the frontend.
//! They are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Agence (tenant) errors
//! - 4xxx: Facturation errors (factures, bons de commande)
//! - 5xxx: Caisse & billets errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Too many requests from this client
    RateLimited = 1006,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2002,
    /// Module is not active for this agency
    ModuleNotActive = 2003,

    // ==================== 3xxx: Agence ====================
    /// Agence not found
    AgenceNotFound = 3001,
    /// Agence registration still awaiting platform approval
    AgenceEnAttente = 3002,
    /// Agence has been suspended
    AgenceSuspendue = 3003,
    /// Vitrine slug already taken by another agency
    SlugTaken = 3004,
    /// Vitrine slug has an invalid format
    SlugInvalid = 3005,
    /// Module already active for this agency
    ModuleAlreadyActive = 3006,
    /// A request for this module is already pending
    ModuleRequestPending = 3007,
    /// Vitrine is not published for this agency
    VitrineDisabled = 3008,

    // ==================== 4xxx: Facturation ====================
    /// Facture not found
    FactureNotFound = 4001,
    /// Facture has already been paid
    FactureAlreadyPayee = 4002,
    /// Facture has been cancelled
    FactureAnnulee = 4003,
    /// Bon de commande not found
    BonCommandeNotFound = 4004,
    /// Bon de commande must be accepted before conversion
    BonCommandeNonAccepte = 4005,
    /// Bon de commande has already been converted to a facture
    BonCommandeDejaConverti = 4006,
    /// Client still has factures attached
    ClientHasFactures = 4007,

    // ==================== 5xxx: Caisse & Billets ====================
    /// Caisse operation not found
    OperationNotFound = 5001,
    /// Montant must be strictly positive
    MontantInvalide = 5002,
    /// Billet not found
    BilletNotFound = 5003,
    /// Billet has already been issued
    BilletDejaEmis = 5004,
    /// Billet has been cancelled
    BilletAnnule = 5005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::AccountDisabled => "Account is disabled",
            Self::RateLimited => "Too many requests, try again later",

            Self::PermissionDenied => "Permission denied",
            Self::AdminRequired => "Admin role required",
            Self::ModuleNotActive => "Module is not active for this agency",

            Self::AgenceNotFound => "Agence not found",
            Self::AgenceEnAttente => "Agence is awaiting approval",
            Self::AgenceSuspendue => "Agence is suspended",
            Self::SlugTaken => "Slug already taken",
            Self::SlugInvalid => "Invalid slug format",
            Self::ModuleAlreadyActive => "Module already active",
            Self::ModuleRequestPending => "Module request already pending",
            Self::VitrineDisabled => "Vitrine is not published",

            Self::FactureNotFound => "Facture not found",
            Self::FactureAlreadyPayee => "Facture already paid",
            Self::FactureAnnulee => "Facture is cancelled",
            Self::BonCommandeNotFound => "Bon de commande not found",
            Self::BonCommandeNonAccepte => "Bon de commande is not accepted",
            Self::BonCommandeDejaConverti => "Bon de commande already converted",
            Self::ClientHasFactures => "Client has factures attached",

            Self::OperationNotFound => "Caisse operation not found",
            Self::MontantInvalide => "Montant must be positive",
            Self::BilletNotFound => "Billet not found",
            Self::BilletDejaEmis => "Billet already issued",
            Self::BilletAnnule => "Billet is cancelled",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::AccountDisabled,
            1006 => Self::RateLimited,

            2001 => Self::PermissionDenied,
            2002 => Self::AdminRequired,
            2003 => Self::ModuleNotActive,

            3001 => Self::AgenceNotFound,
            3002 => Self::AgenceEnAttente,
            3003 => Self::AgenceSuspendue,
            3004 => Self::SlugTaken,
            3005 => Self::SlugInvalid,
            3006 => Self::ModuleAlreadyActive,
            3007 => Self::ModuleRequestPending,
            3008 => Self::VitrineDisabled,

            4001 => Self::FactureNotFound,
            4002 => Self::FactureAlreadyPayee,
            4003 => Self::FactureAnnulee,
            4004 => Self::BonCommandeNotFound,
            4005 => Self::BonCommandeNonAccepte,
            4006 => Self::BonCommandeDejaConverti,
            4007 => Self::ClientHasFactures,

            5001 => Self::OperationNotFound,
            5002 => Self::MontantInvalide,
            5003 => Self::BilletNotFound,
            5004 => Self::BilletDejaEmis,
            5005 => Self::BilletAnnule,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::PermissionDenied.code(), 2001);
        assert_eq!(ErrorCode::AgenceNotFound.code(), 3001);
        assert_eq!(ErrorCode::BonCommandeNonAccepte.code(), 4005);
        assert_eq!(ErrorCode::MontantInvalide.code(), 5002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidCredentials,
            ErrorCode::ModuleNotActive,
            ErrorCode::SlugTaken,
            ErrorCode::FactureAlreadyPayee,
            ErrorCode::BonCommandeDejaConverti,
            ErrorCode::BilletDejaEmis,
            ErrorCode::DatabaseError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(42), Err(InvalidErrorCode(42)));
        assert_eq!(ErrorCode::try_from(65535), Err(InvalidErrorCode(65535)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::AgenceEnAttente).unwrap();
        assert_eq!(json, "3002");
        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::FactureNotFound);
    }
}
