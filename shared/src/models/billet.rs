//! Billet (flight ticket) model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Billet lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BilletStatut {
    Reserve,
    Emis,
    Annule,
}

impl BilletStatut {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "reserve" => Some(Self::Reserve),
            "emis" => Some(Self::Emis),
            "annule" => Some(Self::Annule),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Reserve => "reserve",
            Self::Emis => "emis",
            Self::Annule => "annule",
        }
    }
}

/// Create billet payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilletCreate {
    pub numero_billet: String,
    pub client_id: i64,
    pub compagnie: String,
    pub ville_depart: String,
    pub ville_arrivee: String,
    /// Departure time (epoch millis)
    pub date_depart: i64,
    pub prix: Decimal,
}

/// Update billet payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilletUpdate {
    pub numero_billet: Option<String>,
    pub client_id: Option<i64>,
    pub compagnie: Option<String>,
    pub ville_depart: Option<String>,
    pub ville_arrivee: Option<String>,
    pub date_depart: Option<i64>,
    pub prix: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statut_roundtrip() {
        for s in [BilletStatut::Reserve, BilletStatut::Emis, BilletStatut::Annule] {
            assert_eq!(BilletStatut::from_db(s.as_db()), Some(s));
        }
        assert_eq!(BilletStatut::from_db(""), None);
    }
}
