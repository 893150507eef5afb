use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Lifecycle stage of a single import job.
///
/// ```text
/// Idle -> FileSelected -> Validating -> ProcessingRows -> Submitting -> Succeeded
///                    \___________\______________\_____________\______-> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStage {
    Idle,
    FileSelected,
    Validating,
    ProcessingRows,
    Submitting,
    Succeeded,
    Failed,
}

impl ImportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStage::Idle => "idle",
            ImportStage::FileSelected => "file_selected",
            ImportStage::Validating => "validating",
            ImportStage::ProcessingRows => "processing_rows",
            ImportStage::Submitting => "submitting",
            ImportStage::Succeeded => "succeeded",
            ImportStage::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ImportStage::Succeeded | ImportStage::Failed)
    }

    /// Whether the job may move from `self` to `next`.
    ///
    /// Any non-terminal stage past `Idle` may fail. `ProcessingRows` may finish
    /// directly when nothing is submitted (dry run). A terminal job can only be
    /// restarted from `FileSelected`.
    pub fn can_transition_to(&self, next: ImportStage) -> bool {
        use ImportStage::{
            FileSelected, Failed, Idle, ProcessingRows, Submitting, Succeeded, Validating,
        };
        match (self, next) {
            (Idle, FileSelected)
            | (FileSelected, Validating)
            | (Validating, ProcessingRows)
            | (ProcessingRows, Submitting)
            | (ProcessingRows, Succeeded)
            | (Submitting, Succeeded)
            | (Succeeded, FileSelected)
            | (Failed, FileSelected) => true,
            (FileSelected | Validating | ProcessingRows | Submitting, Failed) => true,
            _ => false,
        }
    }

    /// Checked transition.
    pub fn transition(self, next: ImportStage) -> Result<ImportStage, ModelError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(ModelError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
