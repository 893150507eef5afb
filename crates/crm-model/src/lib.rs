//! Data model for CRM CSV imports.
//!
//! - **entity**: the importable entity types
//! - **schema**: static per-entity destination schemas
//! - **record**: raw input rows and clean destination records
//! - **report**: import results surfaced to the caller
//! - **stage**: the per-job state machine

pub mod entity;
pub mod error;
pub mod ids;
pub mod record;
pub mod report;
pub mod schema;
pub mod stage;
pub mod value;

pub use entity::EntityType;
pub use error::{ModelError, Result};
pub use ids::UserId;
pub use record::{CleanRecord, RawRecord, USER_ID_COLUMN};
pub use report::{
    AdjustmentKind, FieldAdjustment, FieldRejection, HeuristicRule, ImportReport, RejectionReason,
    SkippedRow,
};
pub use schema::{ColumnClass, ColumnSpec, EntitySchema, EnumSpec, NumericBound, RequiredField};
pub use stage::ImportStage;
pub use value::FieldValue;
