use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use mod3d_diff::diff_assets;
use mod3d_gate::{Action, GateConfig, GateDecision, GateRequest, RequestGate};
use mod3d_store::{AuthorDirectory, MetadataStore, ObjectStore};
use mod3d_types::{
    AssetKey, AuthorProjection, ModelRecord, ModelUpdate, RecordDraft, RecordFilter, RecordId,
    RecordView, UserId,
};

use crate::error::{LifecycleError, LifecycleResult};
use crate::reclaim::{reclaim_keys, ReclaimPhase};

/// Sequences metadata writes and asset reclamation for catalog records.
///
/// Holds only shared client handles and the immutable gate pipeline, so one
/// orchestrator can serve every request concurrently.
pub struct LifecycleOrchestrator {
    metadata: Arc<dyn MetadataStore>,
    objects: Arc<dyn ObjectStore>,
    authors: Arc<dyn AuthorDirectory>,
    gate: RequestGate,
}

impl LifecycleOrchestrator {
    /// Create an orchestrator with the default gate pipeline.
    pub fn new(
        metadata: Arc<dyn MetadataStore>,
        objects: Arc<dyn ObjectStore>,
        authors: Arc<dyn AuthorDirectory>,
    ) -> Self {
        Self::with_gate(
            metadata,
            objects,
            authors,
            RequestGate::with_default_stages(GateConfig::default()),
        )
    }

    /// Create an orchestrator with a caller-assembled gate pipeline.
    pub fn with_gate(
        metadata: Arc<dyn MetadataStore>,
        objects: Arc<dyn ObjectStore>,
        authors: Arc<dyn AuthorDirectory>,
        gate: RequestGate,
    ) -> Self {
        Self {
            metadata,
            objects,
            authors,
            gate,
        }
    }

    pub fn gate(&self) -> &RequestGate {
        &self.gate
    }

    /// Persist a new record authored by `author`.
    ///
    /// The payload's assets are assumed to be uploaded already. If the
    /// metadata write fails, every key in the payload is reclaimed on a
    /// best-effort basis before the persistence error is returned.
    pub async fn create_record(
        &self,
        draft: RecordDraft,
        author: UserId,
    ) -> LifecycleResult<ModelRecord> {
        let keys: Vec<AssetKey> = draft.asset_keys().cloned().collect();
        tracing::debug!(%author, title = %draft.title, assets = keys.len(), "creating record");

        match self.metadata.insert(draft, author.clone(), Utc::now()).await {
            Ok(record) => {
                tracing::info!(id = %record.id, %author, "record created");
                Ok(record)
            }
            Err(error) => {
                tracing::error!(%author, %error, "failed to persist new record; rolling back assets");
                let report =
                    reclaim_keys(self.objects.as_ref(), None, ReclaimPhase::CreateRollback, &keys)
                        .await;
                if !report.is_clean() {
                    tracing::warn!(
                        %author,
                        failed = report.failed.len(),
                        "create rollback left orphaned assets"
                    );
                }
                Err(LifecycleError::Persistence(error))
            }
        }
    }

    /// Apply `update` to an existing record.
    ///
    /// Superseded keys are reclaimed first and the metadata write happens
    /// after. If that write fails, the stored record still references the
    /// keys that were just reclaimed.
    pub async fn edit_record(
        &self,
        id: RecordId,
        update: ModelUpdate,
        identity: UserId,
    ) -> LifecycleResult<ModelRecord> {
        let existing = self.load(id).await?;
        self.authorize(Action::Edit, &identity, &existing)?;
        tracing::debug!(%id, %identity, ?update, "editing record");

        let diff = diff_assets(&existing, &update);
        for asset in &diff.superseded {
            tracing::debug!(%id, slot = %asset.slot, key = %asset.key, "asset superseded");
        }
        let report = reclaim_keys(
            self.objects.as_ref(),
            Some(id),
            ReclaimPhase::EditSuperseded,
            diff.superseded_keys(),
        )
        .await;

        match self.metadata.update_by_id(&id, &update).await {
            Ok(Some(updated)) => {
                tracing::info!(
                    %id,
                    %identity,
                    reclaimed = report.reclaimed.len(),
                    orphaned = report.failed.len(),
                    "record updated"
                );
                Ok(updated)
            }
            Ok(None) => {
                tracing::warn!(
                    %id,
                    reclaimed = report.reclaimed.len(),
                    "record vanished before update was written"
                );
                Err(LifecycleError::NotFound(id))
            }
            Err(error) => {
                tracing::error!(
                    %id,
                    %error,
                    reclaimed = report.reclaimed.len(),
                    orphaned = report.failed.len(),
                    "failed to write update; record may reference reclaimed assets"
                );
                Err(LifecycleError::Persistence(error))
            }
        }
    }

    /// Delete a record and reclaim all of its assets.
    ///
    /// Only the record's author may delete it; a denied request mutates
    /// nothing. Assets are reclaimed before the metadata delete, so a failed
    /// delete leaves a record whose assets are already gone.
    pub async fn delete_record(&self, id: RecordId, identity: UserId) -> LifecycleResult<()> {
        let record = self.load(id).await?;
        self.authorize(Action::Delete, &identity, &record)?;

        let report = reclaim_keys(
            self.objects.as_ref(),
            Some(id),
            ReclaimPhase::Delete,
            record.asset_keys(),
        )
        .await;

        match self.metadata.delete_by_id(&id).await {
            Ok(existed) => {
                if !existed {
                    tracing::debug!(%id, "record already gone at delete");
                }
                tracing::info!(
                    %id,
                    %identity,
                    reclaimed = report.reclaimed.len(),
                    orphaned = report.failed.len(),
                    "record deleted"
                );
                Ok(())
            }
            Err(error) => {
                tracing::error!(
                    %id,
                    %error,
                    "failed to delete record after reclaiming its assets; references now dangle"
                );
                Err(LifecycleError::Persistence(error))
            }
        }
    }

    /// Records matching `filter`, newest first, with authors projected.
    pub async fn retrieve_all(&self, filter: RecordFilter) -> LifecycleResult<Vec<RecordView>> {
        let records = self.metadata.find(filter).await?;
        let mut projections: HashMap<UserId, Option<AuthorProjection>> = HashMap::new();
        let mut views = Vec::with_capacity(records.len());

        for record in records {
            let author = match projections.get(&record.author) {
                Some(cached) => cached.clone(),
                None => {
                    let projected = self.authors.project(&record.author).await?;
                    projections.insert(record.author.clone(), projected.clone());
                    projected
                }
            };
            views.push(RecordView::new(record, author));
        }

        Ok(views)
    }

    /// One record with its author projected.
    pub async fn retrieve_one(&self, id: RecordId) -> LifecycleResult<RecordView> {
        let record = self.load(id).await?;
        let author = self.authors.project(&record.author).await?;
        Ok(RecordView::new(record, author))
    }

    async fn load(&self, id: RecordId) -> LifecycleResult<ModelRecord> {
        self.metadata
            .find_by_id(&id)
            .await?
            .ok_or(LifecycleError::NotFound(id))
    }

    fn authorize(
        &self,
        action: Action,
        identity: &UserId,
        record: &ModelRecord,
    ) -> LifecycleResult<()> {
        let outcome = self
            .gate
            .evaluate(&GateRequest::new(action, identity, record))?;
        match outcome.decision {
            GateDecision::Allowed => Ok(()),
            GateDecision::Denied { reason, .. } => {
                tracing::warn!(id = %record.id, %identity, %action, %reason, "request denied");
                Err(LifecycleError::Unauthorized {
                    id: record.id,
                    identity: identity.clone(),
                    action,
                    reason,
                })
            }
        }
    }
}

impl std::fmt::Debug for LifecycleOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifecycleOrchestrator")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
