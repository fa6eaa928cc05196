use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mod3d_types::{
    AssetKey, AuthorProjection, ModelRecord, ModelUpdate, RecordDraft, RecordFilter, RecordId,
    UserId,
};

use crate::error::{MetadataResult, ObjectStoreResult};

/// Key-addressed blob store holding record assets.
///
/// The catalog only ever reclaims objects; uploads happen out of band before
/// a record is created.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Delete the object stored under `key`.
    ///
    /// Deleting a key that does not exist should succeed. Callers do not
    /// distinguish a missing-key failure from any other failure.
    async fn delete_by_key(&self, key: &AssetKey) -> ObjectStoreResult<()>;
}

/// Document store holding catalog records.
///
/// Implementations must satisfy these invariants:
/// - Each call is atomic for the single record it touches.
/// - Record ids are assigned by the store on insert and never reused.
/// - There is no optimistic-concurrency token; the last write wins.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Persist a new record for `draft` and return it with its assigned id.
    async fn insert(
        &self,
        draft: RecordDraft,
        author: UserId,
        date_created: DateTime<Utc>,
    ) -> MetadataResult<ModelRecord>;

    /// Returns `Ok(None)` if the record does not exist.
    async fn find_by_id(&self, id: &RecordId) -> MetadataResult<Option<ModelRecord>>;

    /// Records matching `filter`, most recently created first.
    async fn find(&self, filter: RecordFilter) -> MetadataResult<Vec<ModelRecord>>;

    /// Apply `update` and return the updated record, or `Ok(None)` if the
    /// record no longer exists.
    async fn update_by_id(
        &self,
        id: &RecordId,
        update: &ModelUpdate,
    ) -> MetadataResult<Option<ModelRecord>>;

    /// Delete a record. Returns `true` if the record existed.
    async fn delete_by_id(&self, id: &RecordId) -> MetadataResult<bool>;
}

/// Read-time lookup of the author fields a listing may expose.
#[async_trait]
pub trait AuthorDirectory: Send + Sync {
    /// Returns `Ok(None)` if the identity is unknown.
    async fn project(&self, id: &UserId) -> MetadataResult<Option<AuthorProjection>>;
}
