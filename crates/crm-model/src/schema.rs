//! Static per-entity schemas.
//!
//! A schema lists the destination columns of an entity's table together with the
//! class each column is coerced to, the fields that must be present on every
//! clean record, the enum whitelists, and the numeric bounds clamped on import.

use serde::{Deserialize, Serialize};

use crate::entity::EntityType;

/// How raw cell text is interpreted for a destination column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnClass {
    /// Free text: HTML and CSS fragments are stripped.
    Text,
    /// Identifiers such as emails, phones and URLs: only trimmed.
    Raw,
    /// Floating point number.
    Number,
    /// Date with time, emitted as ISO-8601 UTC.
    Timestamp,
    /// Calendar date, emitted as `YYYY-MM-DD`.
    Date,
    /// `true`/`1`/`yes` are true, anything else false.
    Boolean,
}

impl ColumnClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnClass::Text => "text",
            ColumnClass::Raw => "raw",
            ColumnClass::Number => "number",
            ColumnClass::Timestamp => "timestamp",
            ColumnClass::Date => "date",
            ColumnClass::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub class: ColumnClass,
}

/// A field that must be non-empty on every clean record.
///
/// Without a default, an empty value causes the row to be skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredField {
    pub column: &'static str,
    pub default: Option<&'static str>,
}

/// Whitelist for a status/category style column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnumSpec {
    pub column: &'static str,
    pub values: &'static [&'static str],
    pub default: &'static str,
    /// Missing values are filled with `default` when set.
    pub required: bool,
}

impl EnumSpec {
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(&value)
    }
}

/// Inclusive numeric bounds; values outside are clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBound {
    pub column: &'static str,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericBound {
    pub fn clamp(&self, value: f64) -> f64 {
        let mut out = value;
        if let Some(min) = self.min {
            out = out.max(min);
        }
        if let Some(max) = self.max {
            out = out.min(max);
        }
        out
    }
}

/// Complete import schema for one entity type.
#[derive(Debug)]
pub struct EntitySchema {
    pub entity: EntityType,
    pub table: &'static str,
    pub label: &'static str,
    pub columns: &'static [ColumnSpec],
    pub required: &'static [RequiredField],
    pub enums: &'static [EnumSpec],
    pub bounds: &'static [NumericBound],
}

impl EntitySchema {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|column| column.name)
    }

    pub fn enum_for(&self, name: &str) -> Option<&EnumSpec> {
        self.enums.iter().find(|spec| spec.column == name)
    }

    pub fn bound_for(&self, name: &str) -> Option<&NumericBound> {
        self.bounds.iter().find(|bound| bound.column == name)
    }
}

const fn col(name: &'static str, class: ColumnClass) -> ColumnSpec {
    ColumnSpec { name, class }
}

const fn text(name: &'static str) -> ColumnSpec {
    col(name, ColumnClass::Text)
}

const fn raw(name: &'static str) -> ColumnSpec {
    col(name, ColumnClass::Raw)
}

const fn number(name: &'static str) -> ColumnSpec {
    col(name, ColumnClass::Number)
}

const fn date(name: &'static str) -> ColumnSpec {
    col(name, ColumnClass::Date)
}

const fn timestamp(name: &'static str) -> ColumnSpec {
    col(name, ColumnClass::Timestamp)
}

const fn boolean(name: &'static str) -> ColumnSpec {
    col(name, ColumnClass::Boolean)
}

const fn required(column: &'static str, default: Option<&'static str>) -> RequiredField {
    RequiredField { column, default }
}

const fn non_negative(column: &'static str) -> NumericBound {
    NumericBound {
        column,
        min: Some(0.0),
        max: None,
    }
}

const fn percentage(column: &'static str) -> NumericBound {
    NumericBound {
        column,
        min: Some(0.0),
        max: Some(100.0),
    }
}

const PRIORITIES: &[&str] = &["low", "medium", "high", "urgent"];

/// Six-value deal pipeline.
pub const DEAL_STAGES: &[&str] = &[
    "prospect",
    "qualified",
    "proposal",
    "negotiation",
    "closed_won",
    "closed_lost",
];

pub static CONTACTS: EntitySchema = EntitySchema {
    entity: EntityType::Contacts,
    table: "contacts",
    label: "Contacts",
    columns: &[
        text("first_name"),
        text("last_name"),
        raw("email"),
        raw("phone"),
        raw("mobile"),
        text("job_title"),
        text("company_name"),
        text("address"),
        text("city"),
        text("state"),
        raw("postal_code"),
        text("country"),
        text("lead_source"),
        text("status"),
        text("notes"),
        date("date_of_birth"),
        timestamp("last_contacted"),
        boolean("email_opt_out"),
    ],
    required: &[
        required("first_name", Some("Unknown")),
        required("last_name", Some("Contact")),
    ],
    enums: &[EnumSpec {
        column: "status",
        values: &["active", "inactive", "lead", "prospect", "customer"],
        default: "active",
        required: false,
    }],
    bounds: &[],
};

pub static COMPANIES: EntitySchema = EntitySchema {
    entity: EntityType::Companies,
    table: "companies",
    label: "Companies",
    columns: &[
        text("name"),
        text("industry"),
        raw("website"),
        raw("phone"),
        raw("email"),
        text("address"),
        text("city"),
        text("state"),
        raw("postal_code"),
        text("country"),
        number("employee_count"),
        number("annual_revenue"),
        text("status"),
        text("description"),
        timestamp("created_at"),
    ],
    required: &[required("name", None)],
    enums: &[EnumSpec {
        column: "status",
        values: &["active", "inactive", "prospect", "customer", "partner"],
        default: "active",
        required: false,
    }],
    bounds: &[non_negative("employee_count"), non_negative("annual_revenue")],
};

pub static DEALS: EntitySchema = EntitySchema {
    entity: EntityType::Deals,
    table: "deals",
    label: "Deals",
    columns: &[
        text("name"),
        number("value"),
        text("stage"),
        number("probability"),
        date("expected_close_date"),
        text("contact_name"),
        text("company_name"),
        text("lead_source"),
        text("description"),
        text("notes"),
        timestamp("created_at"),
    ],
    required: &[required("name", Some("Imported Deal"))],
    enums: &[EnumSpec {
        column: "stage",
        values: DEAL_STAGES,
        default: "prospect",
        required: true,
    }],
    bounds: &[percentage("probability"), non_negative("value")],
};

pub static TASKS: EntitySchema = EntitySchema {
    entity: EntityType::Tasks,
    table: "tasks",
    label: "Tasks",
    columns: &[
        text("title"),
        text("description"),
        text("status"),
        text("task_type"),
        text("priority"),
        date("due_date"),
        timestamp("completed_at"),
        text("assigned_to"),
        text("related_to"),
    ],
    required: &[required("title", None)],
    enums: &[
        EnumSpec {
            column: "status",
            values: &["pending", "in_progress", "completed", "cancelled"],
            default: "pending",
            required: true,
        },
        EnumSpec {
            column: "task_type",
            values: &["call", "email", "meeting", "follow_up", "demo", "other"],
            default: "other",
            required: true,
        },
        EnumSpec {
            column: "priority",
            values: PRIORITIES,
            default: "medium",
            required: false,
        },
    ],
    bounds: &[],
};

pub static TICKETS: EntitySchema = EntitySchema {
    entity: EntityType::Tickets,
    table: "support_tickets",
    label: "Support Tickets",
    columns: &[
        text("title"),
        text("description"),
        text("status"),
        text("category"),
        text("priority"),
        raw("contact_email"),
        text("company_name"),
        text("assigned_to"),
        date("due_date"),
        timestamp("resolved_at"),
        text("resolution"),
    ],
    required: &[required("title", None)],
    enums: &[
        EnumSpec {
            column: "status",
            values: &["open", "pending", "in_progress", "resolved", "closed"],
            default: "pending",
            required: true,
        },
        EnumSpec {
            column: "category",
            values: &[
                "technical",
                "billing",
                "account",
                "feature_request",
                "bug",
                "other",
            ],
            default: "other",
            required: true,
        },
        EnumSpec {
            column: "priority",
            values: PRIORITIES,
            default: "medium",
            required: false,
        },
    ],
    bounds: &[],
};

pub static MAINTENANCE: EntitySchema = EntitySchema {
    entity: EntityType::Maintenance,
    table: "maintenance_records",
    label: "Maintenance Records",
    columns: &[
        text("product_name"),
        text("vendor_name"),
        number("cost"),
        date("start_date"),
        date("end_date"),
        date("renewal_date"),
        text("status"),
        raw("license_key"),
        raw("contract_number"),
        boolean("auto_renew"),
        text("notes"),
    ],
    required: &[required("product_name", None)],
    enums: &[EnumSpec {
        column: "status",
        values: &["active", "expired", "pending", "cancelled"],
        default: "active",
        required: false,
    }],
    bounds: &[non_negative("cost")],
};

pub static VENDORS: EntitySchema = EntitySchema {
    entity: EntityType::Vendors,
    table: "vendors",
    label: "Vendors",
    columns: &[
        text("name"),
        text("contact_name"),
        raw("email"),
        raw("phone"),
        raw("website"),
        text("address"),
        text("city"),
        text("state"),
        raw("postal_code"),
        text("country"),
        text("category"),
        text("status"),
        number("rating"),
        text("notes"),
    ],
    required: &[required("name", None)],
    enums: &[EnumSpec {
        column: "status",
        values: &["active", "inactive", "pending"],
        default: "active",
        required: false,
    }],
    bounds: &[NumericBound {
        column: "rating",
        min: Some(0.0),
        max: Some(5.0),
    }],
};

pub static FORECASTS: EntitySchema = EntitySchema {
    entity: EntityType::Forecasts,
    table: "forecasts",
    label: "Forecasts",
    columns: &[
        text("name"),
        date("period_start"),
        date("period_end"),
        number("target_amount"),
        number("forecast_amount"),
        number("actual_amount"),
        number("confidence"),
        text("category"),
        text("notes"),
    ],
    required: &[required("name", Some("Imported Forecast"))],
    enums: &[EnumSpec {
        column: "category",
        values: &["pipeline", "best_case", "commit", "closed"],
        default: "pipeline",
        required: false,
    }],
    bounds: &[
        non_negative("target_amount"),
        non_negative("forecast_amount"),
        non_negative("actual_amount"),
        percentage("confidence"),
    ],
};

pub static REPORTS: EntitySchema = EntitySchema {
    entity: EntityType::Reports,
    table: "reports",
    label: "Reports",
    columns: &[
        text("name"),
        text("report_type"),
        text("description"),
        text("frequency"),
        boolean("is_public"),
        timestamp("generated_at"),
    ],
    required: &[required("name", Some("Imported Report"))],
    enums: &[
        EnumSpec {
            column: "report_type",
            values: &["sales", "pipeline", "activity", "support", "custom"],
            default: "custom",
            required: false,
        },
        EnumSpec {
            column: "frequency",
            values: &["none", "daily", "weekly", "monthly", "quarterly"],
            default: "none",
            required: false,
        },
    ],
    bounds: &[],
};
