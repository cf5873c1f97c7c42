//! Facture model
//!
//! Amounts are decimals: `montant_ht` (pre-tax), `tva` (rate in percent),
//! `montant_ttc` (tax-included). The TTC amount is always recomputed
//! server-side from HT and TVA, never trusted from the client.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Facture lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactureStatut {
    Brouillon,
    Envoyee,
    Payee,
    Annulee,
}

impl FactureStatut {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "brouillon" => Some(Self::Brouillon),
            "envoyee" => Some(Self::Envoyee),
            "payee" => Some(Self::Payee),
            "annulee" => Some(Self::Annulee),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Brouillon => "brouillon",
            Self::Envoyee => "envoyee",
            Self::Payee => "payee",
            Self::Annulee => "annulee",
        }
    }

    /// Can this facture still be edited or transitioned?
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Brouillon | Self::Envoyee)
    }
}

/// Default payment term: 30 days
pub const ECHEANCE_JOURS: i64 = 30;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Compute the TTC amount from an HT amount and a TVA rate in percent,
/// rounded to 2 decimal places.
pub fn montant_ttc(montant_ht: Decimal, tva: Decimal) -> Decimal {
    (montant_ht * (Decimal::ONE + tva / Decimal::ONE_HUNDRED)).round_dp(2)
}

/// Default due date: emission date plus [`ECHEANCE_JOURS`] days
pub fn echeance_default(date_emission: i64) -> i64 {
    date_emission + ECHEANCE_JOURS * MILLIS_PER_DAY
}

/// Create facture payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactureCreate {
    pub client_id: i64,
    pub designation: String,
    pub montant_ht: Decimal,
    /// TVA rate in percent (e.g. 20 = 20%)
    pub tva: Decimal,
    /// Defaults to now
    pub date_emission: Option<i64>,
    /// Defaults to emission + 30 days
    pub date_echeance: Option<i64>,
    /// Defaults to `brouillon`; only `brouillon` or `envoyee` are accepted
    pub statut: Option<FactureStatut>,
}

/// Update facture payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactureUpdate {
    pub client_id: Option<i64>,
    pub designation: Option<String>,
    pub montant_ht: Option<Decimal>,
    pub tva: Option<Decimal>,
    pub date_emission: Option<i64>,
    pub date_echeance: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_montant_ttc() {
        assert_eq!(montant_ttc(dec("100"), dec("20")), dec("120.00"));
        assert_eq!(montant_ttc(dec("1500.50"), dec("10")), dec("1650.55"));
        assert_eq!(montant_ttc(dec("99.99"), dec("0")), dec("99.99"));
    }

    #[test]
    fn test_montant_ttc_rounds_to_cents() {
        // 33.33 * 1.196 = 39.86268 -> 39.86
        assert_eq!(montant_ttc(dec("33.33"), dec("19.6")), dec("39.86"));
    }

    #[test]
    fn test_echeance_default() {
        let emission = 1_700_000_000_000;
        assert_eq!(echeance_default(emission), emission + 30 * 86_400_000);
    }

    #[test]
    fn test_statut_roundtrip() {
        for s in [
            FactureStatut::Brouillon,
            FactureStatut::Envoyee,
            FactureStatut::Payee,
            FactureStatut::Annulee,
        ] {
            assert_eq!(FactureStatut::from_db(s.as_db()), Some(s));
        }
        assert_eq!(FactureStatut::from_db("impayee"), None);
    }

    #[test]
    fn test_statut_is_open() {
        assert!(FactureStatut::Brouillon.is_open());
        assert!(FactureStatut::Envoyee.is_open());
        assert!(!FactureStatut::Payee.is_open());
        assert!(!FactureStatut::Annulee.is_open());
    }
}
