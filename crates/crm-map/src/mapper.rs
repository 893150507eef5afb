//! Header resolution for one entity type.

use std::collections::BTreeMap;

use crm_model::{EntitySchema, EntityType, RawRecord};
use serde::Serialize;

use crate::overrides::MappingOverrides;
use crate::tables::{StaticTarget, common_ignored, header_rules};

/// Resolved destination of a source header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "field")]
pub enum Destination {
    Field(String),
    Ignore,
}

impl From<StaticTarget> for Destination {
    fn from(target: StaticTarget) -> Self {
        match target {
            StaticTarget::Field(field) => Destination::Field(field.to_string()),
            StaticTarget::Ignore => Destination::Ignore,
        }
    }
}

/// One source column feeding one destination field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnAssignment {
    /// Position of the column in the file.
    pub index: usize,
    pub header: String,
    pub field: String,
}

/// Outcome of mapping a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderMapping {
    pub assignments: Vec<ColumnAssignment>,
    pub ignored: Vec<String>,
    pub unmapped: Vec<String>,
}

impl HeaderMapping {
    /// Destination fields in assignment order, without repeats.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for assignment in &self.assignments {
            if !fields.contains(&assignment.field.as_str()) {
                fields.push(&assignment.field);
            }
        }
        fields
    }

    /// Project a raw record onto destination fields.
    ///
    /// When several columns feed the same field, the earliest non-blank cell
    /// wins; a field whose every source cell is blank maps to `""`.
    pub fn apply<'a>(&self, record: &'a RawRecord) -> BTreeMap<String, &'a str> {
        let mut values: BTreeMap<String, &'a str> = BTreeMap::new();
        for assignment in &self.assignments {
            let cell = record
                .cells
                .get(assignment.index)
                .map(|(_, value)| value.as_str())
                .unwrap_or_default();
            match values.get(&assignment.field) {
                Some(existing) if !existing.trim().is_empty() => {}
                _ => {
                    values.insert(assignment.field.clone(), cell);
                }
            }
        }
        values
    }
}

/// Exact-match header mapper for one entity type.
///
/// Resolution order: caller overrides, then canonical column names (so mapping
/// is idempotent), then the entity's synonym table, then the shared ignore list.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    entity: EntityType,
    lookup: BTreeMap<String, Destination>,
}

impl FieldMapper {
    pub fn new(entity: EntityType) -> Self {
        Self::with_overrides(entity, &MappingOverrides::default())
    }

    pub fn with_overrides(entity: EntityType, overrides: &MappingOverrides) -> Self {
        let schema = entity.schema();
        let mut lookup = BTreeMap::new();
        for rule in common_ignored().iter().chain(header_rules(entity)) {
            lookup.insert(rule.header.to_string(), Destination::from(rule.target));
        }
        for column in schema.columns {
            lookup.insert(
                column.name.to_string(),
                Destination::Field(column.name.to_string()),
            );
        }
        for (header, destination) in overrides.for_entity(entity) {
            lookup.insert(header.to_string(), destination.clone());
        }
        Self { entity, lookup }
    }

    pub fn entity(&self) -> EntityType {
        self.entity
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.entity.schema()
    }

    /// Look up a single header.
    pub fn resolve(&self, header: &str) -> Option<&Destination> {
        self.lookup.get(header)
    }

    /// Every header this mapper recognizes, sorted.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Destination)> {
        self.lookup
            .iter()
            .map(|(header, destination)| (header.as_str(), destination))
    }

    /// Map a header row. Empty headers are skipped entirely.
    pub fn map_headers(&self, headers: &[String]) -> HeaderMapping {
        let schema = self.schema();
        let mut mapping = HeaderMapping::default();

        for (index, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            match self.resolve(header) {
                Some(Destination::Field(field)) if schema.has_column(field) => {
                    mapping.assignments.push(ColumnAssignment {
                        index,
                        header: header.clone(),
                        field: field.clone(),
                    });
                }
                Some(Destination::Field(field)) => {
                    tracing::warn!(
                        entity = %self.entity,
                        header = %header,
                        field = %field,
                        "mapping target is not a column of this entity; header left unmapped"
                    );
                    mapping.unmapped.push(header.clone());
                }
                Some(Destination::Ignore) => mapping.ignored.push(header.clone()),
                None => mapping.unmapped.push(header.clone()),
            }
        }

        tracing::debug!(
            entity = %self.entity,
            mapped = mapping.assignments.len(),
            ignored = mapping.ignored.len(),
            unmapped = mapping.unmapped.len(),
            "mapped headers"
        );
        mapping
    }
}
