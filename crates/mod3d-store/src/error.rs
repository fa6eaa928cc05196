use mod3d_types::AssetKey;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    /// The store refused or failed to delete the key.
    #[error("failed to delete {key}: {reason}")]
    DeleteFailed { key: AssetKey, reason: String },

    /// The store could not be reached.
    #[error("object store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for object store operations.
pub type ObjectStoreResult<T> = Result<T, ObjectStoreError>;

/// Errors from metadata store operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The record failed schema validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A write was attempted and failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// A read was attempted and failed.
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// The store could not be reached or its state is unusable.
    #[error("metadata store unavailable: {0}")]
    Unavailable(String),
}

/// Result alias for metadata store operations.
pub type MetadataResult<T> = Result<T, MetadataError>;
