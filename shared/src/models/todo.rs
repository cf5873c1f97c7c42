//! Todo model

use serde::{Deserialize, Serialize};

/// Create todo payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoCreate {
    pub titre: String,
    pub date_echeance: Option<i64>,
}

/// Update todo payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoUpdate {
    pub titre: Option<String>,
    pub date_echeance: Option<i64>,
    pub fait: Option<bool>,
}
