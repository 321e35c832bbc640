//! Reconciliation error types.

use idalias_directory::DirectoryError;
use thiserror::Error;

/// Error that can occur during one reconciliation attempt.
///
/// The variants fall into four groups: incomplete input, failed identifier
/// resolution, a dangling alias reference, and directory/transport failures.
/// None of them are retried internally; the caller owns re-invocation, which
/// is safe because reconciliation is idempotent.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Neither `alias_id` nor `name` was supplied.
    #[error("either alias_id or name must be provided")]
    MissingReference,

    /// Neither `canonical_id` nor `entity_name` was supplied.
    #[error("either canonical_id or entity_name must be provided")]
    MissingCanonicalReference,

    /// No auth mount exists at the default path for this backend type.
    #[error("auth method '{auth_type}' not found; supply mount_accessor for non-default mount paths")]
    AuthMethodNotFound { auth_type: String },

    /// The named entity does not exist in the directory.
    #[error("no entity with name '{entity_name}'")]
    EntityNotFound { entity_name: String },

    /// An explicitly supplied alias id does not exist.
    #[error("alias '{alias_id}' not found")]
    AliasNotFound { alias_id: String },

    /// A directory call failed and the failure was not absorbable.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl ReconcileError {
    /// Short code for log fields and reports.
    pub fn error_code(&self) -> &'static str {
        match self {
            ReconcileError::MissingReference | ReconcileError::MissingCanonicalReference => {
                "INVALID_INPUT"
            }
            ReconcileError::AuthMethodNotFound { .. } | ReconcileError::EntityNotFound { .. } => {
                "RESOLUTION_FAILED"
            }
            ReconcileError::AliasNotFound { .. } => "ALIAS_NOT_FOUND",
            ReconcileError::Directory(_) => "DIRECTORY_ERROR",
        }
    }
}

/// Result type for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;
