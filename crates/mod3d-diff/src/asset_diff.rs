//! Record-level asset diff.
//!
//! Image and video compare by key, and only when the payload supplies the
//! field. The model-file list compares as a whole: structurally and in
//! order. Any difference at all, a pure reordering included, supersedes every
//! key in the old list.

use std::fmt;

use mod3d_types::{AssetKey, FieldPatch, ModelRecord, ModelUpdate};

/// Where a superseded key was referenced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    Image,
    Video,
    /// Position in the old model-file list.
    File(usize),
}

impl fmt::Display for AssetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image => f.write_str("image"),
            Self::Video => f.write_str("video"),
            Self::File(index) => write!(f, "file[{index}]"),
        }
    }
}

/// A previously referenced key that an edit replaces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupersededAsset {
    pub slot: AssetSlot,
    pub key: AssetKey,
}

/// The result of diffing a record's asset references against an edit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetDiff {
    pub image_changed: bool,
    pub video_changed: bool,
    pub files_changed: bool,
    /// Superseded keys: image, video, then the old file list in order.
    pub superseded: Vec<SupersededAsset>,
}

impl AssetDiff {
    /// Returns `true` if nothing needs reclaiming.
    pub fn is_empty(&self) -> bool {
        self.superseded.is_empty()
    }

    pub fn len(&self) -> usize {
        self.superseded.len()
    }

    pub fn superseded_keys(&self) -> impl Iterator<Item = &AssetKey> {
        self.superseded.iter().map(|asset| &asset.key)
    }
}

/// Compute which of `existing`'s asset keys `update` supersedes.
pub fn diff_assets(existing: &ModelRecord, update: &ModelUpdate) -> AssetDiff {
    let mut diff = AssetDiff::default();

    diff.image_changed = slot_changed(&existing.image_id, &update.image_id);
    if diff.image_changed {
        if let Some(key) = &existing.image_id {
            diff.superseded.push(SupersededAsset {
                slot: AssetSlot::Image,
                key: key.clone(),
            });
        }
    }

    diff.video_changed = slot_changed(&existing.video_id, &update.video_id);
    if diff.video_changed {
        if let Some(key) = &existing.video_id {
            diff.superseded.push(SupersededAsset {
                slot: AssetSlot::Video,
                key: key.clone(),
            });
        }
    }

    // Whole-list comparison: reordering counts as a change.
    diff.files_changed = update
        .model_files
        .as_ref()
        .is_some_and(|proposed| *proposed != existing.model_files);
    if diff.files_changed {
        diff.superseded
            .extend(existing.model_files.iter().enumerate().map(|(index, file)| {
                SupersededAsset {
                    slot: AssetSlot::File(index),
                    key: file.key.clone(),
                }
            }));
    }

    diff
}

fn slot_changed(current: &Option<AssetKey>, patch: &FieldPatch<AssetKey>) -> bool {
    match patch.supplied() {
        None => false,
        Some(proposed) => proposed != current.as_ref(),
    }
}
