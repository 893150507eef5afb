//! Identity stamping and batch submission.

use crm_model::{CleanRecord, UserId};

use crate::backend::Backend;
use crate::error::{ImportError, Result};

/// Submits clean records as one batch on behalf of a user.
#[derive(Debug, Clone)]
pub struct BulkLoader {
    user_id: UserId,
}

impl BulkLoader {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Attach the user's identity to every record and insert them in one call.
    ///
    /// Returns the number of records inserted.
    pub fn submit<B>(&self, backend: &mut B, table: &str, records: Vec<CleanRecord>) -> Result<usize>
    where
        B: Backend + ?Sized,
    {
        let records: Vec<CleanRecord> = records
            .into_iter()
            .map(|record| record.with_identity(&self.user_id))
            .collect();

        tracing::info!(table, records = records.len(), "submitting batch");
        backend
            .insert(table, &records)
            .map_err(|source| ImportError::Backend {
                table: table.to_string(),
                source,
            })?;
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use crm_model::FieldValue;

    use super::*;
    use crate::backend::{FailingBackend, MemoryBackend};

    fn records() -> Vec<CleanRecord> {
        ["A", "B"]
            .into_iter()
            .map(|name| {
                let mut record = CleanRecord::new();
                record.set("name", FieldValue::text(name));
                record
            })
            .collect()
    }

    #[test]
    fn stamps_every_record() {
        let loader = BulkLoader::new(UserId::new("user-7").unwrap());
        let mut backend = MemoryBackend::new();
        let count = loader.submit(&mut backend, "vendors", records()).unwrap();
        assert_eq!(count, 2);
        assert!(
            backend
                .records("vendors")
                .iter()
                .all(|record| record.user_id.as_ref().map(UserId::as_str) == Some("user-7"))
        );
    }

    #[test]
    fn backend_failure_fails_the_batch() {
        let loader = BulkLoader::new(UserId::new("user-7").unwrap());
        let mut backend = FailingBackend::new("duplicate key");
        let err = loader.submit(&mut backend, "vendors", records()).unwrap_err();
        assert_eq!(err.category(), "backend insert error");
        assert_eq!(
            err.to_string(),
            "backend insert into vendors failed: duplicate key"
        );
    }
}
