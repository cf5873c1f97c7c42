//! Caisse (cash register) model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger operation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// Cash inflow
    Entree,
    /// Cash outflow
    Sortie,
}

impl OperationType {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "entree" => Some(Self::Entree),
            "sortie" => Some(Self::Sortie),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Entree => "entree",
            Self::Sortie => "sortie",
        }
    }
}

/// Create caisse operation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationCreate {
    #[serde(rename = "type")]
    pub type_operation: OperationType,
    /// Strictly positive amount
    pub montant: Decimal,
    pub motif: String,
    /// Defaults to now
    pub date_operation: Option<i64>,
}

/// Caisse balance summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoldeCaisse {
    pub total_entrees: Decimal,
    pub total_sorties: Decimal,
    pub solde: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_roundtrip() {
        assert_eq!(OperationType::from_db("entree"), Some(OperationType::Entree));
        assert_eq!(OperationType::from_db("sortie"), Some(OperationType::Sortie));
        assert_eq!(OperationType::from_db("transfert"), None);
    }

    #[test]
    fn test_operation_create_uses_type_key() {
        let json = r#"{"type":"entree","montant":150.0,"motif":"acompte"}"#;
        let op: OperationCreate = serde_json::from_str(json).unwrap();
        assert_eq!(op.type_operation, OperationType::Entree);
        assert_eq!(op.motif, "acompte");
        assert!(op.date_operation.is_none());
    }
}
