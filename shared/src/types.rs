//! Tenant lifecycle and module types

use serde::{Deserialize, Serialize};

/// Agence registration/lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgenceStatus {
    /// Registered, awaiting platform approval
    EnAttente,
    /// Approved, fully active
    Approuvee,
    /// Registration rejected by the platform
    Rejetee,
    /// Suspended by the platform
    Suspendue,
}

impl AgenceStatus {
    /// Parse from database string value (lowercase)
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "en_attente" => Some(Self::EnAttente),
            "approuvee" => Some(Self::Approuvee),
            "rejetee" => Some(Self::Rejetee),
            "suspendue" => Some(Self::Suspendue),
            _ => None,
        }
    }

    /// Database string representation (lowercase)
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::EnAttente => "en_attente",
            Self::Approuvee => "approuvee",
            Self::Rejetee => "rejetee",
            Self::Suspendue => "suspendue",
        }
    }

    /// Can this agency log in to the back-office?
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Approuvee)
    }
}

/// Named feature area an agency can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleId {
    Clients,
    Fournisseurs,
    Factures,
    BonsCommande,
    Dashboard,
    Caisse,
    Billets,
    Vitrine,
    Tickets,
    Todos,
}

impl ModuleId {
    /// Core modules, always active for every agency
    pub const CORE: [ModuleId; 5] = [
        Self::Clients,
        Self::Fournisseurs,
        Self::Factures,
        Self::BonsCommande,
        Self::Dashboard,
    ];

    /// Parse from database string value
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "clients" => Some(Self::Clients),
            "fournisseurs" => Some(Self::Fournisseurs),
            "factures" => Some(Self::Factures),
            "bons_commande" => Some(Self::BonsCommande),
            "dashboard" => Some(Self::Dashboard),
            "caisse" => Some(Self::Caisse),
            "billets" => Some(Self::Billets),
            "vitrine" => Some(Self::Vitrine),
            "tickets" => Some(Self::Tickets),
            "todos" => Some(Self::Todos),
            _ => None,
        }
    }

    /// Database string representation
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Fournisseurs => "fournisseurs",
            Self::Factures => "factures",
            Self::BonsCommande => "bons_commande",
            Self::Dashboard => "dashboard",
            Self::Caisse => "caisse",
            Self::Billets => "billets",
            Self::Vitrine => "vitrine",
            Self::Tickets => "tickets",
            Self::Todos => "todos",
        }
    }

    /// Is this module part of the always-active core set?
    pub fn is_core(&self) -> bool {
        Self::CORE.contains(self)
    }
}

/// Merge a newly granted module into an agency's active module list.
///
/// The result always starts with the core modules, followed by the
/// remaining active modules in first-seen order, with duplicates removed.
/// Unknown entries in the stored list are dropped.
pub fn merge_modules(actifs: &[String], granted: ModuleId) -> Vec<String> {
    let mut result: Vec<ModuleId> = ModuleId::CORE.to_vec();
    for s in actifs {
        if let Some(m) = ModuleId::from_db(s)
            && !result.contains(&m)
        {
            result.push(m);
        }
    }
    if !result.contains(&granted) {
        result.push(granted);
    }
    result.iter().map(|m| m.as_db().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agence_status_roundtrip() {
        for status in [
            AgenceStatus::EnAttente,
            AgenceStatus::Approuvee,
            AgenceStatus::Rejetee,
            AgenceStatus::Suspendue,
        ] {
            assert_eq!(AgenceStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(AgenceStatus::from_db("unknown"), None);
    }

    #[test]
    fn test_agence_status_can_login() {
        assert!(AgenceStatus::Approuvee.can_login());
        assert!(!AgenceStatus::EnAttente.can_login());
        assert!(!AgenceStatus::Rejetee.can_login());
        assert!(!AgenceStatus::Suspendue.can_login());
    }

    #[test]
    fn test_module_roundtrip() {
        for m in [
            ModuleId::Clients,
            ModuleId::Caisse,
            ModuleId::Billets,
            ModuleId::Vitrine,
            ModuleId::Tickets,
            ModuleId::Todos,
        ] {
            assert_eq!(ModuleId::from_db(m.as_db()), Some(m));
        }
    }

    #[test]
    fn test_core_modules() {
        assert!(ModuleId::Clients.is_core());
        assert!(ModuleId::Dashboard.is_core());
        assert!(!ModuleId::Caisse.is_core());
        assert!(!ModuleId::Vitrine.is_core());
    }

    #[test]
    fn test_merge_adds_granted_module() {
        let actifs: Vec<String> = ModuleId::CORE.iter().map(|m| m.as_db().into()).collect();
        let merged = merge_modules(&actifs, ModuleId::Caisse);
        assert_eq!(merged.len(), 6);
        assert_eq!(merged.last().unwrap(), "caisse");
    }

    #[test]
    fn test_merge_deduplicates() {
        let actifs = vec![
            "caisse".to_string(),
            "caisse".to_string(),
            "clients".to_string(),
        ];
        let merged = merge_modules(&actifs, ModuleId::Caisse);
        assert_eq!(merged.iter().filter(|m| *m == "caisse").count(), 1);
        assert_eq!(merged.iter().filter(|m| *m == "clients").count(), 1);
    }

    #[test]
    fn test_merge_core_always_first() {
        // Stored list is missing core modules; merge restores them up front
        let actifs = vec!["billets".to_string()];
        let merged = merge_modules(&actifs, ModuleId::Vitrine);
        assert_eq!(&merged[..5], ModuleId::CORE.map(|m| m.as_db().to_string()));
        assert_eq!(merged[5], "billets");
        assert_eq!(merged[6], "vitrine");
    }

    #[test]
    fn test_merge_drops_unknown_entries() {
        let actifs = vec!["caisse".to_string(), "legacy_module".to_string()];
        let merged = merge_modules(&actifs, ModuleId::Todos);
        assert!(!merged.contains(&"legacy_module".to_string()));
    }
}
