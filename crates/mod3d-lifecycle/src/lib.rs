//! Asset lifecycle orchestration for the Mod3d catalog.
//!
//! A catalog record lives in the metadata store while the assets it
//! references live in a separate object store, and no transaction spans the
//! two. [`LifecycleOrchestrator`] sequences the calls to both stores for
//! create, edit, and delete, and owns the cleanup policy when a step fails.
//!
//! # Ordering
//!
//! - **Create**: write metadata; on failure, reclaim every key in the payload.
//! - **Edit**: reclaim superseded keys, then write metadata.
//! - **Delete**: check ownership, reclaim every key, then delete metadata.
//!
//! Reclamation runs one key at a time, each awaited before the next. A failed
//! reclamation is logged and never changes the operation's result, which
//! always reflects the metadata store. Edit and delete reclaim before they
//! write, so a metadata failure after reclamation leaves the record pointing
//! at assets that are already gone. There is no locking: concurrent edits and
//! deletes of the same record race, and the last metadata write wins.

pub mod error;
pub mod orchestrator;
pub mod reclaim;

pub use error::{LifecycleError, LifecycleResult};
pub use orchestrator::LifecycleOrchestrator;
pub use reclaim::{ReclaimPhase, ReclamationReport};
