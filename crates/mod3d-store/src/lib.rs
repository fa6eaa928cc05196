//! Store seams for the Mod3d catalog.
//!
//! The catalog keeps record metadata and binary assets in two separate
//! services with no transaction spanning them. This crate defines the narrow
//! interface the catalog consumes from each, plus the author lookup that
//! replaces a relational join.
//!
//! # Seams
//!
//! - [`ObjectStore`] -- key-addressed blob store; only deletion is consumed
//! - [`MetadataStore`] -- document store holding [`mod3d_types::ModelRecord`]s
//! - [`AuthorDirectory`] -- read-time author projection lookup
//!
//! # Backends
//!
//! - [`InMemoryObjectStore`], [`InMemoryMetadataStore`],
//!   [`InMemoryAuthorDirectory`] -- `RwLock`-guarded maps for tests and
//!   embedding, with fault injection for the failure paths
//!
//! # Design Rules
//!
//! 1. Object deletion is expected to be idempotent; deleting a missing key succeeds.
//! 2. Metadata writes are atomic per record.
//! 3. No backend offers locking or versioning; concurrent writers race.

pub mod error;
pub mod memory;
pub mod metadata;
pub mod traits;

pub use error::{MetadataError, MetadataResult, ObjectStoreError, ObjectStoreResult};
pub use memory::{InMemoryAuthorDirectory, InMemoryObjectStore};
pub use metadata::InMemoryMetadataStore;
pub use traits::{AuthorDirectory, MetadataStore, ObjectStore};
