use std::collections::HashSet;
use std::fmt;

use mod3d_store::{ObjectStore, ObjectStoreError};
use mod3d_types::{AssetKey, RecordId};

/// Why a set of keys is being reclaimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReclaimPhase {
    /// The metadata write for a new record failed.
    CreateRollback,
    /// An edit superseded the keys.
    EditSuperseded,
    /// The owning record is being deleted.
    Delete,
}

impl fmt::Display for ReclaimPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateRollback => f.write_str("create-rollback"),
            Self::EditSuperseded => f.write_str("edit-superseded"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// What happened during one reclamation pass.
#[derive(Debug, Default)]
pub struct ReclamationReport {
    pub reclaimed: Vec<AssetKey>,
    pub failed: Vec<(AssetKey, ObjectStoreError)>,
}

impl ReclamationReport {
    pub fn attempted(&self) -> usize {
        self.reclaimed.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete each key from the object store, one at a time and in order.
///
/// A key is attempted at most once per pass. A failure is logged and the pass
/// moves on to the next key.
pub async fn reclaim_keys<'a, I>(
    store: &dyn ObjectStore,
    record: Option<RecordId>,
    phase: ReclaimPhase,
    keys: I,
) -> ReclamationReport
where
    I: IntoIterator<Item = &'a AssetKey>,
{
    let mut report = ReclamationReport::default();
    let mut seen = HashSet::new();

    for key in keys {
        if !seen.insert(key) {
            continue;
        }
        match store.delete_by_key(key).await {
            Ok(()) => {
                tracing::debug!(%phase, %key, "reclaimed asset");
                report.reclaimed.push(key.clone());
            }
            Err(error) => {
                tracing::warn!(
                    %phase,
                    %key,
                    record = ?record,
                    %error,
                    "failed to reclaim asset; object may be orphaned"
                );
                report.failed.push((key.clone(), error));
            }
        }
    }

    report
}
