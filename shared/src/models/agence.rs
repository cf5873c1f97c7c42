//! Agence (tenant) model

use serde::{Deserialize, Deserializer, Serialize};

/// Update agency profile payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgenceUpdate {
    pub nom: Option<String>,
    pub telephone: Option<String>,
    pub adresse: Option<String>,
}

/// Distinguish an absent field from an explicit `null`: absent means
/// "leave unchanged", `null` means "clear".
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Update vitrine settings payload
///
/// `slug` and `description_publique` can be cleared by sending `null`;
/// leaving them out keeps the current value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitrineUpdate {
    pub vitrine_active: Option<bool>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub slug: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description_publique: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vitrine_update_absent_field_unchanged() {
        let update: VitrineUpdate = serde_json::from_str(r#"{"vitrine_active": true}"#).unwrap();
        assert_eq!(update.vitrine_active, Some(true));
        assert_eq!(update.slug, None);
        assert_eq!(update.description_publique, None);
    }

    #[test]
    fn test_vitrine_update_null_clears() {
        let update: VitrineUpdate =
            serde_json::from_str(r#"{"slug": null, "description_publique": null}"#).unwrap();
        assert_eq!(update.slug, Some(None));
        assert_eq!(update.description_publique, Some(None));
    }

    #[test]
    fn test_vitrine_update_value_sets() {
        let update: VitrineUpdate = serde_json::from_str(r#"{"slug": "voyages-soleil"}"#).unwrap();
        assert_eq!(update.slug, Some(Some("voyages-soleil".into())));
        assert_eq!(update.description_publique, None);
    }
}
