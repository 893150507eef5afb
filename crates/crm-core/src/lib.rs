//! Import pipeline for CRM CSV files.
//!
//! - **pipeline**: staged end-to-end import producing an [`ImportReport`]
//! - **processor**: per-row mapping, coercion and validation
//! - **loader**: identity stamping and the single batch insert
//! - **backend**: the insert API and its implementations
//! - **job**: per-job stage tracking
//! - **progress**: progress callbacks
//!
//! [`ImportReport`]: crm_model::ImportReport

pub mod backend;
pub mod error;
pub mod job;
pub mod loader;
pub mod options;
pub mod pipeline;
pub mod processor;
pub mod progress;

pub use backend::{Backend, BackendError, FailingBackend, JsonLinesBackend, MemoryBackend};
pub use error::{ImportError, Result};
pub use job::ImportJob;
pub use loader::BulkLoader;
pub use options::{DEFAULT_PROGRESS_INTERVAL, ImportOptions};
pub use pipeline::ImportPipeline;
pub use processor::{RowOutcome, RowProcessor};
pub use progress::{NoProgress, ProgressSink};
