//! Per-record defaulting, whitelisting and clamping.

use std::fmt;

use crm_model::{
    AdjustmentKind, CleanRecord, EntitySchema, EntityType, FieldAdjustment, FieldValue,
};
use serde::Serialize;

use crate::enums::{EnumMatch, EnumMatching, match_enum};

/// A change the validator made to a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Adjustment {
    /// Empty required field filled with its placeholder.
    Defaulted { field: String, value: String },
    /// Unrecognized enum value replaced by the enum default.
    EnumSnapped {
        field: String,
        from: String,
        to: String,
    },
    /// Lenient matching rewrote the value to its canonical member.
    EnumNormalized {
        field: String,
        from: String,
        to: String,
    },
    /// Number moved inside its declared bounds.
    Clamped { field: String, from: f64, to: f64 },
}

impl Adjustment {
    pub fn field(&self) -> &str {
        match self {
            Adjustment::Defaulted { field, .. }
            | Adjustment::EnumSnapped { field, .. }
            | Adjustment::EnumNormalized { field, .. }
            | Adjustment::Clamped { field, .. } => field,
        }
    }

    pub fn kind(&self) -> AdjustmentKind {
        match self {
            Adjustment::Defaulted { .. } => AdjustmentKind::Defaulted,
            Adjustment::EnumSnapped { .. } => AdjustmentKind::EnumSnapped,
            Adjustment::EnumNormalized { .. } => AdjustmentKind::EnumNormalized,
            Adjustment::Clamped { .. } => AdjustmentKind::Clamped,
        }
    }

    /// Report entry for this change on row `row_number`.
    pub fn for_row(&self, row_number: usize) -> FieldAdjustment {
        let (from, to) = match self {
            Adjustment::Defaulted { value, .. } => (None, value.clone()),
            Adjustment::EnumSnapped { from, to, .. }
            | Adjustment::EnumNormalized { from, to, .. } => (Some(from.clone()), to.clone()),
            Adjustment::Clamped { from, to, .. } => (Some(from.to_string()), to.to_string()),
        };
        FieldAdjustment {
            row_number,
            field: self.field().to_string(),
            kind: self.kind(),
            from,
            to,
        }
    }
}

/// Why a record cannot be kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    MissingRequired { field: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingRequired { field } => {
                write!(f, "missing required field '{field}'")
            }
        }
    }
}

/// Outcome of validating one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Validation {
    pub adjustments: Vec<Adjustment>,
    pub skip_reasons: Vec<SkipReason>,
}

impl Validation {
    pub fn is_kept(&self) -> bool {
        self.skip_reasons.is_empty()
    }
}

/// Applies an entity's record rules to clean records.
#[derive(Debug, Clone, Copy)]
pub struct RecordValidator {
    schema: &'static EntitySchema,
    matching: EnumMatching,
}

impl RecordValidator {
    pub fn new(entity: EntityType) -> Self {
        Self {
            schema: entity.schema(),
            matching: EnumMatching::default(),
        }
    }

    pub fn with_matching(mut self, matching: EnumMatching) -> Self {
        self.matching = matching;
        self
    }

    pub fn matching(&self) -> EnumMatching {
        self.matching
    }

    /// Normalize enums, clamp numbers and fill defaults in place, then decide
    /// whether the record is kept.
    ///
    /// A record is skipped only when a required field without a default is
    /// still blank.
    pub fn validate(&self, record: &mut CleanRecord) -> Validation {
        let mut validation = Validation::default();
        self.apply_enums(record, &mut validation);
        self.apply_bounds(record, &mut validation);
        self.apply_required(record, &mut validation);
        validation
    }

    fn apply_enums(&self, record: &mut CleanRecord, validation: &mut Validation) {
        for spec in self.schema.enums {
            let current = record.text(spec.column).map(str::to_string);
            let matched = match_enum(spec, current.as_deref(), self.matching);
            let field = spec.column.to_string();
            match (&matched, current) {
                (EnumMatch::Snapped(to), Some(from)) => {
                    validation.adjustments.push(Adjustment::EnumSnapped {
                        field,
                        from,
                        to: (*to).to_string(),
                    });
                }
                (EnumMatch::Member(to), Some(from)) if from != *to => {
                    validation.adjustments.push(Adjustment::EnumNormalized {
                        field,
                        from,
                        to: (*to).to_string(),
                    });
                }
                (EnumMatch::Defaulted(to), _) => {
                    validation.adjustments.push(Adjustment::Defaulted {
                        field,
                        value: (*to).to_string(),
                    });
                }
                _ => {}
            }
            match matched.value() {
                Some(value) => record.set(spec.column, FieldValue::text(value)),
                None if record.get(spec.column).is_some() => {
                    record.set(spec.column, FieldValue::Null);
                }
                None => {}
            }
        }
    }

    fn apply_bounds(&self, record: &mut CleanRecord, validation: &mut Validation) {
        for bound in self.schema.bounds {
            let Some(value) = record.get(bound.column).and_then(FieldValue::as_f64) else {
                continue;
            };
            let clamped = bound.clamp(value);
            if clamped != value {
                validation.adjustments.push(Adjustment::Clamped {
                    field: bound.column.to_string(),
                    from: value,
                    to: clamped,
                });
                record.set(bound.column, FieldValue::Number(clamped));
            }
        }
    }

    fn apply_required(&self, record: &mut CleanRecord, validation: &mut Validation) {
        for required in self.schema.required {
            if !record.is_blank(required.column) {
                continue;
            }
            match required.default {
                Some(default) => {
                    record.set(required.column, FieldValue::text(default));
                    validation.adjustments.push(Adjustment::Defaulted {
                        field: required.column.to_string(),
                        value: default.to_string(),
                    });
                }
                None => validation.skip_reasons.push(SkipReason::MissingRequired {
                    field: required.column.to_string(),
                }),
            }
        }
    }
}
