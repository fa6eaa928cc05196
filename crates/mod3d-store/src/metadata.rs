//! In-memory metadata store for tests and embedding.
//!
//! [`InMemoryMetadataStore`] keeps records in a `HashMap` behind a `RwLock`
//! and mimics the two behaviours of a document store the catalog relies on:
//! schema validation on write, and newest-first listing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mod3d_types::{ModelRecord, ModelUpdate, RecordDraft, RecordFilter, RecordId, UserId};

use crate::error::{MetadataError, MetadataResult};
use crate::traits::MetadataStore;

/// An in-memory implementation of [`MetadataStore`].
///
/// Writes can be forced to fail with [`Self::set_fail_writes`] and reads with
/// [`Self::set_fail_reads`], so callers can exercise partial-failure paths.
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    records: RwLock<HashMap<RecordId, ModelRecord>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent insert, update, and delete fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent read fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().expect("lock poisoned").is_empty()
    }

    fn check_write(&self) -> MetadataResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(MetadataError::WriteFailed("injected failure".into()));
        }
        Ok(())
    }

    fn check_read(&self) -> MetadataResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(MetadataError::ReadFailed("injected failure".into()));
        }
        Ok(())
    }
}

fn validate(record: &ModelRecord) -> MetadataResult<()> {
    if record.title.trim().is_empty() {
        return Err(MetadataError::Validation("title is required".into()));
    }
    Ok(())
}

fn poisoned(e: impl std::fmt::Display) -> MetadataError {
    MetadataError::Unavailable(format!("lock poisoned: {e}"))
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn insert(
        &self,
        draft: RecordDraft,
        author: UserId,
        date_created: DateTime<Utc>,
    ) -> MetadataResult<ModelRecord> {
        self.check_write()?;
        let record = ModelRecord::from_draft(RecordId::generate(), draft, author, date_created);
        validate(&record)?;

        let mut records = self.records.write().map_err(poisoned)?;
        records.insert(record.id, record.clone());
        tracing::debug!(id = %record.id, "record inserted");
        Ok(record)
    }

    async fn find_by_id(&self, id: &RecordId) -> MetadataResult<Option<ModelRecord>> {
        self.check_read()?;
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.get(id).cloned())
    }

    async fn find(&self, filter: RecordFilter) -> MetadataResult<Vec<ModelRecord>> {
        self.check_read()?;
        let records = self.records.read().map_err(poisoned)?;
        let mut matching: Vec<ModelRecord> = records
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.date_created
                .cmp(&a.date_created)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(matching)
    }

    async fn update_by_id(
        &self,
        id: &RecordId,
        update: &ModelUpdate,
    ) -> MetadataResult<Option<ModelRecord>> {
        self.check_write()?;
        let mut records = self.records.write().map_err(poisoned)?;
        let Some(existing) = records.get(id) else {
            return Ok(None);
        };
        let updated = existing.apply(update);
        validate(&updated)?;
        records.insert(*id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, id: &RecordId) -> MetadataResult<bool> {
        self.check_write()?;
        let mut records = self.records.write().map_err(poisoned)?;
        Ok(records.remove(id).is_some())
    }
}
