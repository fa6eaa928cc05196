use std::fmt;

use mod3d_types::{ModelRecord, UserId};

use crate::error::GateError;

// ---------------------------------------------------------------------------
// GateRequest
// ---------------------------------------------------------------------------

/// The mutating operation being requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Edit,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit => f.write_str("edit"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// An identity asking to perform an action on a loaded record.
#[derive(Clone, Copy, Debug)]
pub struct GateRequest<'a> {
    pub action: Action,
    pub identity: &'a UserId,
    pub record: &'a ModelRecord,
}

impl<'a> GateRequest<'a> {
    pub fn new(action: Action, identity: &'a UserId, record: &'a ModelRecord) -> Self {
        Self {
            action,
            identity,
            record,
        }
    }
}

// ---------------------------------------------------------------------------
// StageDecision / StageResult
// ---------------------------------------------------------------------------

/// The outcome of a single stage evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageDecision {
    /// Proceed to the next stage.
    Pass,
    /// Deny the request.
    Fail { reason: String },
}

impl StageDecision {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Recorded result from a completed stage evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageResult {
    pub stage_name: String,
    pub passed: bool,
    /// Populated on failure.
    pub reason: Option<String>,
}

// ---------------------------------------------------------------------------
// GateStage trait
// ---------------------------------------------------------------------------

/// A single evaluation stage in the gate pipeline.
///
/// Stages must not perform I/O or mutate shared state; the pipeline may be
/// shared across every request for the lifetime of the process.
pub trait GateStage: Send + Sync {
    /// Human-readable name of this stage (e.g. "ownership").
    fn name(&self) -> &str;

    /// Evaluate the request and return a decision.
    fn evaluate(&self, request: &GateRequest<'_>) -> Result<StageDecision, GateError>;
}
