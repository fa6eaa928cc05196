/// Errors that can occur while running the gate itself.
///
/// A denied request is not an error; it is a [`crate::GateDecision::Denied`].
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// A stage could not reach a decision.
    ///
    /// The built-in [`crate::OwnershipStage`] always decides; this is the
    /// error path for stages added with [`crate::RequestGate::add_stage`].
    #[error("stage error in '{stage}': {message}")]
    StageError { stage: String, message: String },
}

impl GateError {
    /// Create a stage error with a name and message.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StageError {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
