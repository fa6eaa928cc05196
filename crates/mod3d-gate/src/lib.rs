//! Request gate pipeline for the Mod3d catalog.
//!
//! Mutating requests against an existing record pass through the gate before
//! any store is touched. The gate runs an ordered pipeline of side-effect-free
//! stages, assembled once at startup, and stops at the first failure.
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use mod3d_gate::{Action, GateConfig, GateRequest, RequestGate};
//! use mod3d_types::{ModelRecord, RecordDraft, RecordId, UserId};
//!
//! let gate = RequestGate::with_default_stages(GateConfig::default());
//! let owner = UserId::new("u1").unwrap();
//! let record = ModelRecord::from_draft(
//!     RecordId::generate(),
//!     RecordDraft::new("Benchy"),
//!     owner.clone(),
//!     Utc::now(),
//! );
//! let outcome = gate
//!     .evaluate(&GateRequest::new(Action::Delete, &owner, &record))
//!     .unwrap();
//! assert!(outcome.is_allowed());
//! ```

pub mod config;
pub mod error;
pub mod gate;
pub mod stage;
pub mod stages;

pub use config::GateConfig;
pub use error::GateError;
pub use gate::{GateDecision, GateOutcome, RequestGate};
pub use stage::{Action, GateRequest, GateStage, StageDecision, StageResult};
pub use stages::ownership::OwnershipStage;
