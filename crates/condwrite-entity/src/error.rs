//! Entity update errors.

use condwrite_model::StoreError;

/// Why a conditional entity update did not commit.
#[derive(Debug, thiserror::Error)]
pub enum EntityUpdateError {
    /// The item does not exist or was soft-deleted.
    #[error("{entity} not found")]
    NotFound {
        /// Entity name, e.g. `Template`.
        entity: &'static str,
    },
    /// The item is in a status that forbids further updates.
    #[error("{entity} with status {status} cannot be updated")]
    AlreadySubmitted {
        /// Entity name.
        entity: &'static str,
        /// The stored status.
        status: String,
    },
    /// The update would change the template type.
    #[error("Can not change template templateType: expected {expected} but got {actual}")]
    TemplateTypeChanged {
        /// The stored type.
        expected: String,
        /// The type the update asked for.
        actual: String,
    },
    /// The item was modified since it was read.
    #[error("Lock number mismatch - {entity} has been modified since last read")]
    Conflict {
        /// Entity name.
        entity: &'static str,
    },
    /// A caller-supplied precondition did not hold.
    #[error("{message}")]
    Unsupported {
        /// Description of the failed precondition.
        message: String,
    },
    /// A value could not be converted for storage.
    #[error("Failed to convert value: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The store rejected the write for a reason not attributable to a
    /// precondition.
    #[error("Failed to update {entity}: {source}")]
    Store {
        /// Entity name.
        entity: &'static str,
        /// The store error, unchanged.
        #[source]
        source: StoreError,
    },
}

impl EntityUpdateError {
    /// The store error behind this failure, if any.
    #[must_use]
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            Self::Store { source, .. } => Some(source),
            _ => None,
        }
    }
}
