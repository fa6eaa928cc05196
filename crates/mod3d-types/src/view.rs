use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::asset::{AssetKey, ModelFile};
use crate::identity::{RecordId, UserId};
use crate::record::ModelRecord;

/// The author fields a listing may expose. Never carries credentials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProjection {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// A record as returned to readers, with its author resolved to a projection.
///
/// `author` is `None` when the author id no longer resolves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub author: Option<AuthorProjection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    pub image_id: Option<AssetKey>,
    pub video_id: Option<AssetKey>,
    pub model_files: Vec<ModelFile>,
    pub date_created: DateTime<Utc>,
}

impl RecordView {
    pub fn new(record: ModelRecord, author: Option<AuthorProjection>) -> Self {
        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            author,
            is_public: record.is_public,
            image_id: record.image_id,
            video_id: record.video_id,
            model_files: record.model_files,
            date_created: record.date_created,
        }
    }
}
