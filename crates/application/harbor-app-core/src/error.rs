use harbor_core::{Filter, RecordId};
use thiserror::Error;

use crate::ports::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("query for filter {filter} failed: {message}")]
    QueryFailure { filter: Filter, message: String },
    #[error("save failed: {message}")]
    SaveFailure { message: String },
    #[error("query result arrived for a superseded subscription")]
    StaleResultDiscarded,
    #[error("edit rejected: {0}")]
    EditRejected(String),
    #[error("cannot select record '{0}'")]
    InvalidSelection(RecordId),
}

impl ControllerError {
    pub fn query(filter: &Filter, err: &ServiceError) -> Self {
        ControllerError::QueryFailure {
            filter: filter.clone(),
            message: err.message(),
        }
    }

    pub fn save(err: &ServiceError) -> Self {
        ControllerError::SaveFailure {
            message: err.message(),
        }
    }

    /// Message shown to the user, without the taxonomy prefix.
    pub fn user_message(&self) -> String {
        match self {
            ControllerError::QueryFailure { message, .. }
            | ControllerError::SaveFailure { message } => message.clone(),
            other => other.to_string(),
        }
    }
}
