//! Import result types surfaced to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::EntityType;
use crate::stage::ImportStage;

/// Sniffing rule that nulled a value before it was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicRule {
    /// HTML or CSS fragment in a typed column.
    Markup,
    /// Contains `@`.
    EmailLike,
    /// Number column value containing date/time separators.
    DateLike,
    /// Date column value made only of digits.
    NumericToken,
    /// Date column value with too much alphabetic text.
    LongText,
    /// Parsed year outside the accepted range.
    YearOutOfRange,
}

impl HeuristicRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeuristicRule::Markup => "markup",
            HeuristicRule::EmailLike => "email_like",
            HeuristicRule::DateLike => "date_like",
            HeuristicRule::NumericToken => "numeric_token",
            HeuristicRule::LongText => "long_text",
            HeuristicRule::YearOutOfRange => "year_out_of_range",
        }
    }
}

impl fmt::Display for HeuristicRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a non-empty cell ended up null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "rule")]
pub enum RejectionReason {
    /// The value did not parse as the column's type.
    Unparseable,
    /// A sniffing heuristic rejected the value; may be a false positive.
    Heuristic(HeuristicRule),
    /// Nothing was left after stripping markup.
    EmptyAfterSanitize,
}

impl RejectionReason {
    /// Heuristic rejections are the ones worth a human look.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, RejectionReason::Heuristic(_))
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::Unparseable => f.write_str("unparseable"),
            RejectionReason::Heuristic(rule) => write!(f, "heuristic: {rule}"),
            RejectionReason::EmptyAfterSanitize => f.write_str("empty after sanitizing"),
        }
    }
}

/// A non-empty source value that was nulled during coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRejection {
    pub row_number: usize,
    pub field: String,
    pub value: String,
    pub reason: RejectionReason,
}

/// How the validator changed a value on a kept row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Blank required field filled with its placeholder.
    Defaulted,
    /// Value outside the enum whitelist replaced by the enum default.
    EnumSnapped,
    /// Enum value rewritten to its canonical spelling.
    EnumNormalized,
    /// Number moved inside its bounds.
    Clamped,
}

impl AdjustmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentKind::Defaulted => "defaulted",
            AdjustmentKind::EnumSnapped => "snapped to default",
            AdjustmentKind::EnumNormalized => "normalized",
            AdjustmentKind::Clamped => "clamped",
        }
    }

    /// Normalizing only changes spelling; the others replace the value.
    pub fn replaces_value(&self) -> bool {
        !matches!(self, AdjustmentKind::EnumNormalized)
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value the validator replaced on a row that was kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAdjustment {
    pub row_number: usize,
    pub field: String,
    pub kind: AdjustmentKind,
    /// Value before the change; `None` when the field was blank.
    pub from: Option<String>,
    pub to: String,
}

/// A row excluded from the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row_number: usize,
    pub reasons: Vec<String>,
}

/// Summary of one import job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub entity: EntityType,
    pub table: String,
    pub file_name: String,
    pub stage: ImportStage,
    pub dry_run: bool,
    pub rows_processed: usize,
    pub rows_imported: usize,
    pub rows_skipped: usize,
    pub skipped: Vec<SkippedRow>,
    pub rejections: Vec<FieldRejection>,
    pub adjustments: Vec<FieldAdjustment>,
    pub ignored_headers: Vec<String>,
    pub unmapped_headers: Vec<String>,
}

impl ImportReport {
    pub fn new(entity: EntityType, file_name: impl Into<String>) -> Self {
        Self {
            entity,
            table: entity.table().to_string(),
            file_name: file_name.into(),
            stage: ImportStage::Idle,
            dry_run: false,
            rows_processed: 0,
            rows_imported: 0,
            rows_skipped: 0,
            skipped: Vec::new(),
            rejections: Vec::new(),
            adjustments: Vec::new(),
            ignored_headers: Vec::new(),
            unmapped_headers: Vec::new(),
        }
    }

    pub fn ambiguous_rejections(&self) -> impl Iterator<Item = &FieldRejection> {
        self.rejections
            .iter()
            .filter(|rejection| rejection.reason.is_ambiguous())
    }

    /// Adjustments that replaced a source value rather than respelling it.
    pub fn replaced_values(&self) -> impl Iterator<Item = &FieldAdjustment> {
        self.adjustments
            .iter()
            .filter(|adjustment| adjustment.kind.replaces_value())
    }

    /// One-line notification text.
    pub fn headline(&self) -> String {
        let verb = if self.dry_run {
            "validated"
        } else {
            "imported"
        };
        format!(
            "{} {} of {} {} rows ({} skipped)",
            verb,
            self.rows_imported,
            self.rows_processed,
            self.entity,
            self.rows_skipped
        )
    }
}
