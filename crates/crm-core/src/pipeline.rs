//! End-to-end import: gates, mapping, per-row cleaning and the batch insert.
//!
//! # Stages
//!
//! 1. **FileSelected** - job created for one file and one entity type
//! 2. **Validating** - file gates, decoding, header and row-count checks
//! 3. **ProcessingRows** - mapping, coercion and validation of every row
//! 4. **Submitting** - one bulk insert through the [`Backend`] (skipped on dry runs)
//!
//! # Example
//!
//! ```ignore
//! use crm_core::{ImportOptions, ImportPipeline, MemoryBackend, NoProgress};
//! use crm_model::{EntityType, UserId};
//!
//! let pipeline = ImportPipeline::new(ImportOptions::default());
//! let mut backend = MemoryBackend::new();
//! let report = pipeline.import_file(
//!     EntityType::Contacts,
//!     &UserId::new("user-1")?,
//!     Path::new("contacts.csv"),
//!     &mut backend,
//!     &mut NoProgress,
//! )?;
//! println!("{}", report.headline());
//! ```

use std::path::Path;

use crm_ingest::{CsvTable, IngestLimits, ingest_bytes, read_import_file};
use crm_map::{FieldMapper, MappingOverrides};
use crm_model::{EntityType, ImportReport, ImportStage, SkippedRow, UserId};
use crm_validate::RecordValidator;

use crate::backend::Backend;
use crate::error::{ImportError, Result};
use crate::job::ImportJob;
use crate::loader::BulkLoader;
use crate::options::ImportOptions;
use crate::processor::RowProcessor;
use crate::progress::ProgressSink;

/// Runs import jobs with fixed options and mapping overrides.
#[derive(Debug, Clone, Default)]
pub struct ImportPipeline {
    options: ImportOptions,
    overrides: MappingOverrides,
}

impl ImportPipeline {
    pub fn new(options: ImportOptions) -> Self {
        Self {
            options,
            overrides: MappingOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: MappingOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Header mapper for `entity` with this pipeline's overrides applied.
    pub fn mapper(&self, entity: EntityType) -> FieldMapper {
        FieldMapper::with_overrides(entity, &self.overrides)
    }

    /// Import a file from disk.
    pub fn import_file<B, P>(
        &self,
        entity: EntityType,
        user_id: &UserId,
        path: &Path,
        backend: &mut B,
        progress: &mut P,
    ) -> Result<ImportReport>
    where
        B: Backend + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.run(
            entity,
            user_id,
            &file_name,
            |limits| read_import_file(path, limits),
            backend,
            progress,
        )
    }

    /// Import an in-memory upload.
    pub fn import_bytes<B, P>(
        &self,
        entity: EntityType,
        user_id: &UserId,
        file_name: &str,
        bytes: &[u8],
        backend: &mut B,
        progress: &mut P,
    ) -> Result<ImportReport>
    where
        B: Backend + ?Sized,
        P: ProgressSink + ?Sized,
    {
        self.run(
            entity,
            user_id,
            file_name,
            |limits| ingest_bytes(file_name, bytes, limits),
            backend,
            progress,
        )
    }

    fn run<L, B, P>(
        &self,
        entity: EntityType,
        user_id: &UserId,
        file_name: &str,
        load: L,
        backend: &mut B,
        progress: &mut P,
    ) -> Result<ImportReport>
    where
        L: FnOnce(&IngestLimits) -> crm_ingest::Result<CsvTable>,
        B: Backend + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let span = tracing::info_span!("import", entity = %entity, file = file_name);
        let _guard = span.enter();

        let mut job = ImportJob::new(entity, file_name);
        job.advance(ImportStage::FileSelected)?;
        match self.execute(&mut job, user_id, load, backend, progress) {
            Ok(report) => {
                tracing::info!(
                    imported = report.rows_imported,
                    skipped = report.rows_skipped,
                    rejected_fields = report.rejections.len(),
                    adjusted_fields = report.adjustments.len(),
                    dry_run = report.dry_run,
                    "import complete"
                );
                Ok(report)
            }
            Err(err) => {
                let failed_at = job.stage();
                job.fail();
                tracing::error!(
                    file = job.file_name(),
                    stage = %failed_at,
                    category = err.category(),
                    error = %err,
                    "import failed"
                );
                Err(err)
            }
        }
    }

    fn execute<L, B, P>(
        &self,
        job: &mut ImportJob,
        user_id: &UserId,
        load: L,
        backend: &mut B,
        progress: &mut P,
    ) -> Result<ImportReport>
    where
        L: FnOnce(&IngestLimits) -> crm_ingest::Result<CsvTable>,
        B: Backend + ?Sized,
        P: ProgressSink + ?Sized,
    {
        let entity = job.entity();

        job.advance(ImportStage::Validating)?;
        let table = load(&self.options.ingest_limits())?;

        job.advance(ImportStage::ProcessingRows)?;
        let mapping = self.mapper(entity).map_headers(&table.headers.columns);
        if !mapping.unmapped.is_empty() {
            tracing::info!(headers = ?mapping.unmapped, "dropping unmapped headers");
        }
        let validator = RecordValidator::new(entity).with_matching(self.options.enum_matching);
        let processor = RowProcessor::new(entity.schema(), &mapping, validator);

        let mut report = ImportReport::new(entity, job.file_name());
        report.dry_run = self.options.dry_run;
        report.ignored_headers = mapping.ignored.clone();
        report.unmapped_headers = mapping.unmapped.clone();

        let total = table.row_count();
        let interval = self.options.progress_interval.max(1);
        let mut records = Vec::with_capacity(total);
        for (index, raw) in table.records().enumerate() {
            let outcome = processor.process(raw);
            if outcome.is_kept() {
                report.adjustments.extend(outcome.adjustments());
                records.push(outcome.record);
            } else {
                let reasons = outcome.skip_reasons();
                tracing::debug!(row = outcome.row_number, reasons = ?reasons, "skipping row");
                report.skipped.push(SkippedRow {
                    row_number: outcome.row_number,
                    reasons,
                });
            }
            report.rejections.extend(outcome.rejections);

            let processed = index + 1;
            if processed % interval == 0 && processed < total {
                progress.on_progress(processed, total);
            }
        }
        progress.on_progress(total, total);

        report.rows_processed = total;
        report.rows_skipped = report.skipped.len();
        if records.is_empty() {
            return Err(ImportError::NoValidRecords { rows: total });
        }

        if self.options.dry_run {
            report.rows_imported = records.len();
        } else {
            job.advance(ImportStage::Submitting)?;
            report.rows_imported =
                BulkLoader::new(user_id.clone()).submit(backend, entity.table(), records)?;
        }
        job.advance(ImportStage::Succeeded)?;
        report.stage = job.stage();
        Ok(report)
    }
}
