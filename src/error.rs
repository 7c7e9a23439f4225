use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Id;

pub type ReducerResult<T> = Result<T, ReducerError>;

/// Kind of entity an id belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Endpoint,
    Subgraph,
    Processor,
    Column,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Endpoint => "Endpoint",
            EntityKind::Subgraph => "Subgraph",
            EntityKind::Processor => "Processor",
            EntityKind::Column => "Column",
        };
        f.write_str(name)
    }
}

/// Errors raised by operation handlers. Every variant is detected before the
/// handler mutates anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReducerError {
    #[error("Endpoint with ID {id} not found")]
    EndpointNotFound { id: Id },

    #[error("Subgraph with ID {id} not found")]
    SubgraphNotFound { id: Id },

    #[error("Processor with ID {id} not found")]
    ProcessorNotFound { id: Id },

    #[error("Column with ID {id} not found")]
    ColumnNotFound { id: Id },

    #[error("{entity} with ID {id} already exists")]
    DuplicateId { entity: EntityKind, id: Id },
}

impl ReducerError {
    pub fn endpoint_not_found(id: &str) -> Self {
        Self::EndpointNotFound { id: id.to_string() }
    }

    pub fn subgraph_not_found(id: &str) -> Self {
        Self::SubgraphNotFound { id: id.to_string() }
    }

    pub fn processor_not_found(id: &str) -> Self {
        Self::ProcessorNotFound { id: id.to_string() }
    }

    pub fn column_not_found(id: &str) -> Self {
        Self::ColumnNotFound { id: id.to_string() }
    }

    pub fn duplicate_id(entity: EntityKind, id: &str) -> Self {
        Self::DuplicateId {
            entity,
            id: id.to_string(),
        }
    }

    /// Error class name as seen by document consumers
    pub fn error_code(&self) -> &'static str {
        match self {
            ReducerError::EndpointNotFound { .. } => "EndpointNotFoundError",
            ReducerError::SubgraphNotFound { .. } => "SubgraphNotFoundError",
            ReducerError::ProcessorNotFound { .. } => "ProcessorNotFoundError",
            ReducerError::ColumnNotFound { .. } => "ColumnNotFoundError",
            ReducerError::DuplicateId { .. } => "DuplicateIdError",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ReducerError::EndpointNotFound { .. } => "ENDPOINT_NOT_FOUND",
            ReducerError::SubgraphNotFound { .. } => "SUBGRAPH_NOT_FOUND",
            ReducerError::ProcessorNotFound { .. } => "PROCESSOR_NOT_FOUND",
            ReducerError::ColumnNotFound { .. } => "COLUMN_NOT_FOUND",
            ReducerError::DuplicateId { .. } => "DUPLICATE_ID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_missing_id() {
        let err = ReducerError::processor_not_found("p-42");
        assert_eq!(err.to_string(), "Processor with ID p-42 not found");
        assert_eq!(err.error_code(), "ProcessorNotFoundError");
        assert_eq!(err.code(), "PROCESSOR_NOT_FOUND");
    }

    #[test]
    fn test_duplicate_id_message() {
        let err = ReducerError::duplicate_id(EntityKind::Column, "c1");
        assert_eq!(err.to_string(), "Column with ID c1 already exists");
        assert_eq!(err.code(), "DUPLICATE_ID");
    }
}
