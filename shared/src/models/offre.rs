//! Vitrine offre (travel offer) model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Create offre payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffreCreate {
    pub titre: String,
    pub destination: String,
    pub description: Option<String>,
    pub prix: Decimal,
    pub duree_jours: Option<i32>,
    /// Defaults to false (draft)
    pub publie: Option<bool>,
}

/// Update offre payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffreUpdate {
    pub titre: Option<String>,
    pub destination: Option<String>,
    pub description: Option<String>,
    pub prix: Option<Decimal>,
    pub duree_jours: Option<i32>,
    pub publie: Option<bool>,
}
