//! Row-level processing: mapping, coercion and validation of one raw record.

use crm_map::HeaderMapping;
use crm_model::{CleanRecord, EntitySchema, FieldAdjustment, FieldRejection, RawRecord};
use crm_normalization::coerce_value;
use crm_validate::{RecordValidator, Validation};

/// Result of processing a single row.
#[derive(Debug, Clone)]
pub struct RowOutcome {
    pub row_number: usize,
    pub record: CleanRecord,
    pub rejections: Vec<FieldRejection>,
    pub validation: Validation,
}

impl RowOutcome {
    pub fn is_kept(&self) -> bool {
        self.validation.is_kept()
    }

    /// Validator changes, as report entries for this row.
    pub fn adjustments(&self) -> impl Iterator<Item = FieldAdjustment> + '_ {
        self.validation
            .adjustments
            .iter()
            .map(|adjustment| adjustment.for_row(self.row_number))
    }

    pub fn skip_reasons(&self) -> Vec<String> {
        self.validation
            .skip_reasons
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// Turns raw records into clean records for one entity type.
#[derive(Debug, Clone, Copy)]
pub struct RowProcessor<'a> {
    schema: &'static EntitySchema,
    mapping: &'a HeaderMapping,
    validator: RecordValidator,
}

impl<'a> RowProcessor<'a> {
    pub fn new(
        schema: &'static EntitySchema,
        mapping: &'a HeaderMapping,
        validator: RecordValidator,
    ) -> Self {
        Self {
            schema,
            mapping,
            validator,
        }
    }

    pub fn process(&self, raw: &RawRecord) -> RowOutcome {
        let mut record = CleanRecord::new();
        let mut rejections = Vec::new();

        for (field, value) in self.mapping.apply(raw) {
            let Some(column) = self.schema.column(&field) else {
                continue;
            };
            let coerced = coerce_value(value, column.class);
            if let Some(reason) = coerced.rejection {
                if reason.is_ambiguous() {
                    tracing::debug!(
                        row = raw.row_number,
                        field = %field,
                        reason = %reason,
                        "value nulled by heuristic"
                    );
                } else {
                    tracing::trace!(
                        row = raw.row_number,
                        field = %field,
                        reason = %reason,
                        "value nulled"
                    );
                }
                rejections.push(FieldRejection {
                    row_number: raw.row_number,
                    field: field.clone(),
                    value: value.trim().to_string(),
                    reason,
                });
            }
            record.set(field, coerced.value);
        }

        let validation = self.validator.validate(&mut record);
        RowOutcome {
            row_number: raw.row_number,
            record,
            rejections,
            validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use crm_map::FieldMapper;
    use crm_model::{EntityType, FieldValue, HeuristicRule, RejectionReason};

    use super::*;

    fn raw(cells: &[(&str, &str)]) -> RawRecord {
        RawRecord::new(
            1,
            cells
                .iter()
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect(),
        )
    }

    #[test]
    fn maintenance_end_date_heuristics() {
        let entity = EntityType::Maintenance;
        let mapper = FieldMapper::new(entity);
        let headers = vec!["Product".to_string(), "End Date".to_string()];
        let mapping = mapper.map_headers(&headers);
        let processor = RowProcessor::new(entity.schema(), &mapping, RecordValidator::new(entity));

        let outcome = processor.process(&raw(&[
            ("Product", "Backup Suite"),
            ("End Date", "WISDM Support Services"),
        ]));
        assert!(outcome.is_kept());
        assert_eq!(outcome.record.get("end_date"), Some(&FieldValue::Null));
        assert_eq!(
            outcome.rejections[0].reason,
            RejectionReason::Heuristic(HeuristicRule::LongText)
        );

        let outcome = processor.process(&raw(&[
            ("Product", "Backup Suite"),
            ("End Date", "2024-12-31"),
        ]));
        assert_eq!(
            outcome.record.get("end_date"),
            Some(&FieldValue::Date("2024-12-31".to_string()))
        );
        assert!(outcome.rejections.is_empty());
    }

    #[test]
    fn skipped_row_explains_itself() {
        let entity = EntityType::Vendors;
        let mapping = FieldMapper::new(entity).map_headers(&["Vendor".to_string()]);
        let processor = RowProcessor::new(entity.schema(), &mapping, RecordValidator::new(entity));
        let outcome = processor.process(&raw(&[("Vendor", "<p></p>")]));
        assert!(!outcome.is_kept());
        assert_eq!(outcome.skip_reasons(), vec!["missing required field 'name'"]);
        assert_eq!(
            outcome.rejections[0].reason,
            RejectionReason::EmptyAfterSanitize
        );
    }
}
