//! Caller-supplied mapping overrides.
//!
//! JSON shape: `{ "<entity>": { "<header>": "<field>" | "ignore" } }`.

use std::collections::BTreeMap;
use std::path::Path;

use crm_model::EntityType;

use crate::error::{MapError, Result};
use crate::mapper::Destination;

/// Marker value that drops a header.
pub const IGNORE_MARKER: &str = "ignore";

/// Per-entity header overrides merged over the static tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOverrides {
    entries: BTreeMap<EntityType, BTreeMap<String, Destination>>,
}

impl MappingOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse overrides; entity keys accept the same aliases as the CLI.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, String>> = serde_json::from_str(text)?;
        let mut overrides = Self::new();
        for (entity, headers) in raw {
            let entity: EntityType = entity.parse()?;
            for (header, target) in headers {
                overrides.insert(entity, &header, &target)?;
            }
        }
        Ok(overrides)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| MapError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides = Self::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            entries = overrides.len(),
            "loaded mapping overrides"
        );
        Ok(overrides)
    }

    /// Add one override. `target` is a column name or `"ignore"`.
    pub fn insert(&mut self, entity: EntityType, header: &str, target: &str) -> Result<()> {
        let header = header.trim();
        if header.is_empty() {
            return Err(MapError::EmptyHeader {
                entity: entity.to_string(),
            });
        }
        let target = target.trim();
        let destination = if target.eq_ignore_ascii_case(IGNORE_MARKER) {
            Destination::Ignore
        } else {
            Destination::Field(target.to_string())
        };
        self.entries
            .entry(entity)
            .or_default()
            .insert(header.to_string(), destination);
        Ok(())
    }

    pub fn for_entity(&self, entity: EntityType) -> impl Iterator<Item = (&str, &Destination)> {
        self.entries
            .get(&entity)
            .into_iter()
            .flat_map(|headers| headers.iter().map(|(header, dest)| (header.as_str(), dest)))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields_and_ignore_markers() {
        let overrides = MappingOverrides::from_json(
            r#"{
                "maintenance_records": { "Fee": "cost", "Internal Ref": "ignore" },
                "Deals": { "Opportunity": "name" }
            }"#,
        )
        .unwrap();
        assert_eq!(overrides.len(), 3);

        let maintenance: Vec<_> = overrides.for_entity(EntityType::Maintenance).collect();
        assert_eq!(
            maintenance,
            vec![
                ("Fee", &Destination::Field("cost".to_string())),
                ("Internal Ref", &Destination::Ignore),
            ]
        );
        assert_eq!(overrides.for_entity(EntityType::Contacts).count(), 0);
    }

    #[test]
    fn unknown_entity_is_an_error() {
        let err = MappingOverrides::from_json(r#"{ "widgets": { "A": "b" } }"#).unwrap_err();
        assert!(matches!(err, MapError::Entity(_)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = MappingOverrides::from_json(r#"{ "deals": ["Stage"] }"#).unwrap_err();
        assert!(matches!(err, MapError::Parse(_)));
    }

    #[test]
    fn empty_header_is_refused() {
        let mut overrides = MappingOverrides::new();
        assert!(overrides.insert(EntityType::Deals, "  ", "name").is_err());
    }
}
