use thiserror::Error;

use crate::stage::ImportStage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown entity type: {0}")]
    UnknownEntity(String),
    #[error("user id must not be empty")]
    EmptyUserId,
    #[error("invalid import stage transition: {from} -> {to}")]
    InvalidTransition { from: ImportStage, to: ImportStage },
}

pub type Result<T> = std::result::Result<T, ModelError>;
