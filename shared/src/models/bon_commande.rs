//! Bon de commande model
//!
//! A bon de commande is a sales order. Once accepted it can be converted
//! into a facture exactly once; the conversion stamps the bon `facture`
//! and records the resulting facture id.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bon de commande lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonCommandeStatut {
    EnAttente,
    Accepte,
    Refuse,
    /// Converted to a facture
    Facture,
}

impl BonCommandeStatut {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "en_attente" => Some(Self::EnAttente),
            "accepte" => Some(Self::Accepte),
            "refuse" => Some(Self::Refuse),
            "facture" => Some(Self::Facture),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::EnAttente => "en_attente",
            Self::Accepte => "accepte",
            Self::Refuse => "refuse",
            Self::Facture => "facture",
        }
    }

    /// Only accepted bons can be converted to a facture
    pub fn can_convert(&self) -> bool {
        matches!(self, Self::Accepte)
    }
}

/// Create bon de commande payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonCommandeCreate {
    pub client_id: i64,
    pub designation: String,
    pub montant_ht: Decimal,
    /// TVA rate in percent
    pub tva: Decimal,
}

/// Update bon de commande payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonCommandeUpdate {
    pub client_id: Option<i64>,
    pub designation: Option<String>,
    pub montant_ht: Option<Decimal>,
    pub tva: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statut_roundtrip() {
        for s in [
            BonCommandeStatut::EnAttente,
            BonCommandeStatut::Accepte,
            BonCommandeStatut::Refuse,
            BonCommandeStatut::Facture,
        ] {
            assert_eq!(BonCommandeStatut::from_db(s.as_db()), Some(s));
        }
    }

    #[test]
    fn test_can_convert() {
        assert!(BonCommandeStatut::Accepte.can_convert());
        assert!(!BonCommandeStatut::EnAttente.can_convert());
        assert!(!BonCommandeStatut::Refuse.can_convert());
        // An already converted bon is `facture`, never convertible again
        assert!(!BonCommandeStatut::Facture.can_convert());
    }
}
