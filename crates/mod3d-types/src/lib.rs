//! Foundation types for the Mod3d catalog.
//!
//! This crate provides the data model shared by every other Mod3d crate: the
//! catalog record, the asset references it owns, the identities that author
//! records, and the read-side views handed to listing callers.
//!
//! # Key Types
//!
//! - [`ModelRecord`] -- Stored catalog entry with its asset references
//! - [`AssetKey`] -- Opaque key of one object in the object store
//! - [`ModelFile`] -- Ordered model-file reference (key plus display metadata)
//! - [`RecordDraft`] / [`ModelUpdate`] -- Create and edit payloads
//! - [`RecordFilter`] -- Listing filter (all or public-only)
//! - [`RecordView`] / [`AuthorProjection`] -- Listing result with restricted author fields

pub mod asset;
pub mod error;
pub mod identity;
pub mod record;
pub mod view;

pub use asset::{AssetKey, ModelFile};
pub use error::TypeError;
pub use identity::{RecordId, UserId};
pub use record::{FieldPatch, ModelRecord, ModelUpdate, RecordDraft, RecordFilter};
pub use view::{AuthorProjection, RecordView};
