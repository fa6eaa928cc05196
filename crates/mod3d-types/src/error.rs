use thiserror::Error;

/// Errors produced by type construction and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("asset key must not be empty")]
    EmptyAssetKey,

    #[error("invalid record id: {0}")]
    InvalidRecordId(String),

    #[error("user id must not be empty")]
    EmptyUserId,
}
