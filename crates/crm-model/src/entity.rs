//! Importable CRM entity types.
//!
//! Each variant resolves to a static [`EntitySchema`] describing its destination
//! table, columns, required fields, enum whitelists and numeric bounds. Adding an
//! entity type means adding a variant and a schema table, not a new code path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;
use crate::schema::{self, EntitySchema};

/// Entity type an import job targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Contacts,
    Companies,
    Deals,
    Tasks,
    Tickets,
    Maintenance,
    Vendors,
    Forecasts,
    Reports,
}

impl EntityType {
    /// Every entity type, in display order.
    pub const ALL: [EntityType; 9] = [
        EntityType::Contacts,
        EntityType::Companies,
        EntityType::Deals,
        EntityType::Tasks,
        EntityType::Tickets,
        EntityType::Maintenance,
        EntityType::Vendors,
        EntityType::Forecasts,
        EntityType::Reports,
    ];

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Contacts => "contacts",
            EntityType::Companies => "companies",
            EntityType::Deals => "deals",
            EntityType::Tasks => "tasks",
            EntityType::Tickets => "tickets",
            EntityType::Maintenance => "maintenance",
            EntityType::Vendors => "vendors",
            EntityType::Forecasts => "forecasts",
            EntityType::Reports => "reports",
        }
    }

    /// Returns the static schema for this entity type.
    pub fn schema(&self) -> &'static EntitySchema {
        match self {
            EntityType::Contacts => &schema::CONTACTS,
            EntityType::Companies => &schema::COMPANIES,
            EntityType::Deals => &schema::DEALS,
            EntityType::Tasks => &schema::TASKS,
            EntityType::Tickets => &schema::TICKETS,
            EntityType::Maintenance => &schema::MAINTENANCE,
            EntityType::Vendors => &schema::VENDORS,
            EntityType::Forecasts => &schema::FORECASTS,
            EntityType::Reports => &schema::REPORTS,
        }
    }

    /// Destination table in the backend.
    pub fn table(&self) -> &'static str {
        self.schema().table
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = ModelError;

    /// Parse an entity name (case-insensitive, accepts a few aliases).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "contacts" | "contact" => Ok(EntityType::Contacts),
            "companies" | "company" | "accounts" => Ok(EntityType::Companies),
            "deals" | "deal" | "opportunities" => Ok(EntityType::Deals),
            "tasks" | "task" => Ok(EntityType::Tasks),
            "tickets" | "ticket" | "support_tickets" => Ok(EntityType::Tickets),
            "maintenance" | "maintenance_records" => Ok(EntityType::Maintenance),
            "vendors" | "vendor" => Ok(EntityType::Vendors),
            "forecasts" | "forecast" => Ok(EntityType::Forecasts),
            "reports" | "report" => Ok(EntityType::Reports),
            _ => Err(ModelError::UnknownEntity(s.trim().to_string())),
        }
    }
}
