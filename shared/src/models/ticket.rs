//! Support ticket model (agency → platform)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriorite {
    Basse,
    Normale,
    Haute,
}

impl TicketPriorite {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "basse" => Some(Self::Basse),
            "normale" => Some(Self::Normale),
            "haute" => Some(Self::Haute),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Basse => "basse",
            Self::Normale => "normale",
            Self::Haute => "haute",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatut {
    Ouvert,
    EnCours,
    Ferme,
}

impl TicketStatut {
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "ouvert" => Some(Self::Ouvert),
            "en_cours" => Some(Self::EnCours),
            "ferme" => Some(Self::Ferme),
            _ => None,
        }
    }

    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Ouvert => "ouvert",
            Self::EnCours => "en_cours",
            Self::Ferme => "ferme",
        }
    }
}

/// Create ticket payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketCreate {
    pub sujet: String,
    pub description: String,
    /// Defaults to `normale`
    pub priorite: Option<TicketPriorite>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrips() {
        for p in [
            TicketPriorite::Basse,
            TicketPriorite::Normale,
            TicketPriorite::Haute,
        ] {
            assert_eq!(TicketPriorite::from_db(p.as_db()), Some(p));
        }
        for s in [TicketStatut::Ouvert, TicketStatut::EnCours, TicketStatut::Ferme] {
            assert_eq!(TicketStatut::from_db(s.as_db()), Some(s));
        }
    }
}
