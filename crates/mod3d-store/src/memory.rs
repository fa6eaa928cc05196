use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use mod3d_types::{AssetKey, AuthorProjection, UserId};

use crate::error::{MetadataError, MetadataResult, ObjectStoreError, ObjectStoreResult};
use crate::traits::{AuthorDirectory, ObjectStore};

/// In-memory object store.
///
/// Tracks which keys are present and can be told to fail deletions for
/// specific keys. A store built with [`InMemoryObjectStore::recording`] also
/// logs every deletion attempt in call order; one built with
/// [`InMemoryObjectStore::new`] keeps no history, so it is safe to serve from.
pub struct InMemoryObjectStore {
    objects: RwLock<HashSet<AssetKey>>,
    deletions: Option<RwLock<Vec<AssetKey>>>,
    failing: RwLock<HashSet<AssetKey>>,
}

impl InMemoryObjectStore {
    /// Create a new empty store without a deletion log.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashSet::new()),
            deletions: None,
            failing: RwLock::new(HashSet::new()),
        }
    }

    /// Create a new empty store that logs every deletion attempt.
    pub fn recording() -> Self {
        Self {
            deletions: Some(RwLock::new(Vec::new())),
            ..Self::new()
        }
    }

    pub fn is_recording(&self) -> bool {
        self.deletions.is_some()
    }

    /// Record an object as uploaded under `key`.
    pub fn put(&self, key: AssetKey) {
        self.objects.write().expect("lock poisoned").insert(key);
    }

    pub fn contains(&self, key: &AssetKey) -> bool {
        self.objects.read().expect("lock poisoned").contains(key)
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Every key passed to `delete_by_key`, in call order, failures included.
    ///
    /// Always empty unless the store was built with [`Self::recording`].
    pub fn deletions(&self) -> Vec<AssetKey> {
        self.deletions
            .as_ref()
            .map(|log| log.read().expect("lock poisoned").clone())
            .unwrap_or_default()
    }

    /// Make every future deletion of `key` fail.
    pub fn fail_deletes_for(&self, key: AssetKey) {
        self.failing.write().expect("lock poisoned").insert(key);
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn delete_by_key(&self, key: &AssetKey) -> ObjectStoreResult<()> {
        if let Some(log) = &self.deletions {
            log.write()
                .map_err(|e| ObjectStoreError::Unavailable(format!("lock poisoned: {e}")))?
                .push(key.clone());
        }

        let failing = self
            .failing
            .read()
            .map_err(|e| ObjectStoreError::Unavailable(format!("lock poisoned: {e}")))?
            .contains(key);
        if failing {
            return Err(ObjectStoreError::DeleteFailed {
                key: key.clone(),
                reason: "injected failure".into(),
            });
        }

        // Missing keys are fine: deletion is idempotent.
        self.objects
            .write()
            .map_err(|e| ObjectStoreError::Unavailable(format!("lock poisoned: {e}")))?
            .remove(key);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .field("recording", &self.is_recording())
            .finish()
    }
}

/// In-memory author directory.
#[derive(Debug, Default)]
pub struct InMemoryAuthorDirectory {
    authors: RwLock<HashMap<UserId, AuthorProjection>>,
}

impl InMemoryAuthorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace the projection for `author.id`.
    pub fn register(&self, author: AuthorProjection) {
        self.authors
            .write()
            .expect("lock poisoned")
            .insert(author.id.clone(), author);
    }
}

#[async_trait]
impl AuthorDirectory for InMemoryAuthorDirectory {
    async fn project(&self, id: &UserId) -> MetadataResult<Option<AuthorProjection>> {
        let authors = self
            .authors
            .read()
            .map_err(|e| MetadataError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(authors.get(id).cloned())
    }
}
