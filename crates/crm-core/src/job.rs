//! Per-job stage tracking.

use crm_model::{EntityType, ImportStage};

use crate::error::Result;

/// One import of one file for one entity type.
#[derive(Debug, Clone)]
pub struct ImportJob {
    entity: EntityType,
    file_name: String,
    stage: ImportStage,
}

impl ImportJob {
    pub fn new(entity: EntityType, file_name: impl Into<String>) -> Self {
        Self {
            entity,
            file_name: file_name.into(),
            stage: ImportStage::Idle,
        }
    }

    pub fn entity(&self) -> EntityType {
        self.entity
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    /// Move to `next`, refusing transitions the state machine does not allow.
    pub fn advance(&mut self, next: ImportStage) -> Result<()> {
        self.stage = self.stage.transition(next)?;
        tracing::debug!(stage = %self.stage, "import stage");
        Ok(())
    }

    /// Mark the job failed when the current stage allows it.
    pub fn fail(&mut self) {
        if self.stage.can_transition_to(ImportStage::Failed) {
            self.stage = ImportStage::Failed;
        }
    }
}
