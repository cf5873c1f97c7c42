//! Fournisseur model

use serde::{Deserialize, Serialize};

/// Supplier category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FournisseurCategorie {
    CompagnieAerienne,
    Hotelier,
    Transport,
    Assurance,
    Autre,
}

impl FournisseurCategorie {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "compagnie_aerienne" => Some(Self::CompagnieAerienne),
            "hotelier" => Some(Self::Hotelier),
            "transport" => Some(Self::Transport),
            "assurance" => Some(Self::Assurance),
            "autre" => Some(Self::Autre),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::CompagnieAerienne => "compagnie_aerienne",
            Self::Hotelier => "hotelier",
            Self::Transport => "transport",
            Self::Assurance => "assurance",
            Self::Autre => "autre",
        }
    }
}

/// Create fournisseur payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FournisseurCreate {
    pub nom: String,
    pub categorie: FournisseurCategorie,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub notes: Option<String>,
}

/// Update fournisseur payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FournisseurUpdate {
    pub nom: Option<String>,
    pub categorie: Option<FournisseurCategorie>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorie_roundtrip() {
        for c in [
            FournisseurCategorie::CompagnieAerienne,
            FournisseurCategorie::Hotelier,
            FournisseurCategorie::Transport,
            FournisseurCategorie::Assurance,
            FournisseurCategorie::Autre,
        ] {
            assert_eq!(FournisseurCategorie::from_db(c.as_db()), Some(c));
        }
    }
}
