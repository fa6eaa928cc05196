use mod3d_gate::{Action, GateError};
use mod3d_store::MetadataError;
use mod3d_types::{RecordId, UserId};

/// Errors surfaced by lifecycle operations.
///
/// Object store failures never appear here; they are logged where they occur.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// The referenced record does not exist.
    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// The acting identity may not perform the action. Nothing was mutated.
    #[error("{identity} is not authorized to {action} record {id}")]
    Unauthorized {
        id: RecordId,
        identity: UserId,
        action: Action,
        reason: String,
    },

    /// The metadata store failed to read or write.
    #[error("persistence failed: {0}")]
    Persistence(#[from] MetadataError),

    /// A stage added to the gate pipeline could not reach a decision.
    /// Nothing was mutated.
    #[error("gate failed: {0}")]
    Gate(#[from] GateError),
}

/// Result alias for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;
