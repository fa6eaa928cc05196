use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::asset::{AssetKey, ModelFile};
use crate::identity::{RecordId, UserId};

/// A stored catalog entry.
///
/// `author` and `date_created` are fixed when the record is created and are
/// never touched by an edit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRecord {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub author: UserId,
    /// `None` is the legacy default and counts as public.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub image_id: Option<AssetKey>,
    #[serde(default)]
    pub video_id: Option<AssetKey>,
    #[serde(default)]
    pub model_files: Vec<ModelFile>,
    pub date_created: DateTime<Utc>,
}

impl ModelRecord {
    /// Materialize a draft into a record owned by `author`.
    pub fn from_draft(
        id: RecordId,
        draft: RecordDraft,
        author: UserId,
        date_created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            author,
            is_public: draft.is_public,
            image_id: draft.image_id,
            video_id: draft.video_id,
            model_files: draft.model_files,
            date_created,
        }
    }

    /// Whether the record shows up in the public listing.
    pub fn is_publicly_visible(&self) -> bool {
        self.is_public.unwrap_or(true)
    }

    /// Every asset key the record references: image, video, then each file in order.
    pub fn asset_keys(&self) -> impl Iterator<Item = &AssetKey> {
        self.image_id
            .iter()
            .chain(self.video_id.iter())
            .chain(self.model_files.iter().map(|file| &file.key))
    }

    /// The record as it reads after `update` is applied.
    pub fn apply(&self, update: &ModelUpdate) -> Self {
        let mut next = self.clone();
        if let Some(title) = &update.title {
            next.title = title.clone();
        }
        if let Some(description) = &update.description {
            next.description = description.clone();
        }
        next.is_public = update.is_public.apply(&self.is_public);
        next.image_id = update.image_id.apply(&self.image_id);
        next.video_id = update.video_id.apply(&self.video_id);
        if let Some(files) = &update.model_files {
            next.model_files = files.clone();
        }
        next
    }
}

/// Create payload: the record shell proposed by an author.
///
/// Any `author` or `dateCreated` in the incoming payload is ignored; the
/// orchestrator sets both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub image_id: Option<AssetKey>,
    #[serde(default)]
    pub video_id: Option<AssetKey>,
    #[serde(default)]
    pub model_files: Vec<ModelFile>,
}

impl RecordDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Every asset key in the draft: image, video, then each file in order.
    pub fn asset_keys(&self) -> impl Iterator<Item = &AssetKey> {
        self.image_id
            .iter()
            .chain(self.video_id.iter())
            .chain(self.model_files.iter().map(|file| &file.key))
    }
}

/// A nullable field in an edit payload.
///
/// Distinguishes a field left out of the payload from one explicitly set to
/// `null`. Use with `#[serde(default)]` so absence deserializes to
/// [`FieldPatch::Unchanged`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Not supplied: keep the current value.
    Unchanged,
    /// Supplied as `null`: clear the current value.
    Clear,
    /// Supplied with a value.
    Set(T),
}

impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<T> FieldPatch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// The proposed value, or `None` when the field was not supplied.
    pub fn supplied(&self) -> Option<Option<&T>> {
        match self {
            Self::Unchanged => None,
            Self::Clear => Some(None),
            Self::Set(value) => Some(Some(value)),
        }
    }
}

impl<T: Clone> FieldPatch<T> {
    /// Resolve the patch against the current value.
    pub fn apply(&self, current: &Option<T>) -> Option<T> {
        match self {
            Self::Unchanged => current.clone(),
            Self::Clear => None,
            Self::Set(value) => Some(value.clone()),
        }
    }
}

impl<T: Serialize> Serialize for FieldPatch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unchanged | Self::Clear => serializer.serialize_none(),
            Self::Set(value) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldPatch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        })
    }
}

/// Edit payload. A field left out means "no change requested".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unchanged")]
    pub is_public: FieldPatch<bool>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unchanged")]
    pub image_id: FieldPatch<AssetKey>,
    #[serde(default, skip_serializing_if = "FieldPatch::is_unchanged")]
    pub video_id: FieldPatch<AssetKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_files: Option<Vec<ModelFile>>,
}

/// Listing filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordFilter {
    #[default]
    All,
    /// `isPublic` explicitly `true`, or absent altogether.
    PublicOnly,
}

impl RecordFilter {
    pub fn matches(&self, record: &ModelRecord) -> bool {
        match self {
            Self::All => true,
            Self::PublicOnly => record.is_publicly_visible(),
        }
    }
}
