//! Client model

use serde::{Deserialize, Serialize};

/// Create client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    pub nom: String,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub numero_passeport: Option<String>,
    pub notes: Option<String>,
}

/// Update client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
    pub numero_passeport: Option<String>,
    pub notes: Option<String>,
}
