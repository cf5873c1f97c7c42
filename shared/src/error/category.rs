//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the error code range:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Permission errors
/// - 3xxx: Agence errors
/// - 4xxx: Facturation errors
/// - 5xxx: Caisse & billets errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Agence errors (3xxx)
    Agence,
    /// Facturation errors (4xxx)
    Facturation,
    /// Caisse & billets errors (5xxx)
    Caisse,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Agence,
            4000..5000 => Self::Facturation,
            5000..6000 => Self::Caisse,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Agence => "agence",
            Self::Facturation => "facturation",
            Self::Caisse => "caisse",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Agence);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Facturation);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Caisse);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::NotFound.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::TokenExpired.category(), ErrorCategory::Auth);
        assert_eq!(
            ErrorCode::ModuleNotActive.category(),
            ErrorCategory::Permission
        );
        assert_eq!(ErrorCode::SlugTaken.category(), ErrorCategory::Agence);
        assert_eq!(
            ErrorCode::BonCommandeNonAccepte.category(),
            ErrorCategory::Facturation
        );
        assert_eq!(ErrorCode::BilletNotFound.category(), ErrorCategory::Caisse);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Facturation).unwrap();
        assert_eq!(json, "\"facturation\"");
        let category: ErrorCategory = serde_json::from_str("\"agence\"").unwrap();
        assert_eq!(category, ErrorCategory::Agence);
    }
}
