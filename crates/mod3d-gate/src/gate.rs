use crate::config::GateConfig;
use crate::error::GateError;
use crate::stage::{GateRequest, GateStage, StageDecision, StageResult};
use crate::stages::OwnershipStage;

// ---------------------------------------------------------------------------
// GateOutcome
// ---------------------------------------------------------------------------

/// Final decision of the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    Denied { stage: String, reason: String },
}

/// The outcome of running a request through the full pipeline.
#[derive(Clone, Debug)]
pub struct GateOutcome {
    pub decision: GateDecision,
    /// Per-stage results in evaluation order.
    pub stage_results: Vec<StageResult>,
}

impl GateOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self.decision, GateDecision::Allowed)
    }
}

// ---------------------------------------------------------------------------
// RequestGate
// ---------------------------------------------------------------------------

/// An ordered pipeline of stages every gated request passes through.
pub struct RequestGate {
    stages: Vec<Box<dyn GateStage>>,
    config: GateConfig,
}

impl RequestGate {
    /// Create a gate with an empty pipeline. Use [`Self::add_stage`] to add
    /// stages, or [`Self::with_default_stages`] for the standard pipeline.
    pub fn new(config: GateConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Create a gate with the default pipeline: Ownership.
    pub fn with_default_stages(config: GateConfig) -> Self {
        let mut gate = Self::new(config);
        let ownership = OwnershipStage::new(gate.config.enforce_ownership_on_edit);
        gate.add_stage(Box::new(ownership));
        gate
    }

    /// Append a stage to the end of the pipeline.
    pub fn add_stage(&mut self, stage: Box<dyn GateStage>) {
        self.stages.push(stage);
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Evaluate a request through the pipeline.
    ///
    /// The pipeline is **fail-fast**: the first failing stage stops
    /// evaluation and produces a `Denied` decision.
    pub fn evaluate(&self, request: &GateRequest<'_>) -> Result<GateOutcome, GateError> {
        let mut stage_results = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let decision = stage.evaluate(request)?;
            match decision {
                StageDecision::Pass => stage_results.push(StageResult {
                    stage_name: stage.name().to_string(),
                    passed: true,
                    reason: None,
                }),
                StageDecision::Fail { reason } => {
                    tracing::debug!(
                        stage = stage.name(),
                        action = %request.action,
                        record = %request.record.id,
                        %reason,
                        "gate denied request"
                    );
                    stage_results.push(StageResult {
                        stage_name: stage.name().to_string(),
                        passed: false,
                        reason: Some(reason.clone()),
                    });
                    return Ok(GateOutcome {
                        decision: GateDecision::Denied {
                            stage: stage.name().to_string(),
                            reason,
                        },
                        stage_results,
                    });
                }
            }
        }

        Ok(GateOutcome {
            decision: GateDecision::Allowed,
            stage_results,
        })
    }
}

impl std::fmt::Debug for RequestGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.stages.iter().map(|s| s.name()).collect();
        f.debug_struct("RequestGate")
            .field("stages", &names)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::Action;
    use chrono::Utc;
    use mod3d_types::{ModelRecord, RecordDraft, RecordId, UserId};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn record_by(author: &str) -> ModelRecord {
        ModelRecord::from_draft(
            RecordId::generate(),
            RecordDraft::new("Benchy"),
            user(author),
            Utc::now(),
        )
    }

    struct AlwaysFail;

    impl GateStage for AlwaysFail {
        fn name(&self) -> &str {
            "always-fail"
        }

        fn evaluate(&self, _request: &GateRequest<'_>) -> Result<StageDecision, GateError> {
            Ok(StageDecision::Fail {
                reason: "nope".into(),
            })
        }
    }

    struct Broken;

    impl GateStage for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn evaluate(&self, _request: &GateRequest<'_>) -> Result<StageDecision, GateError> {
            Err(GateError::stage("broken", "cannot decide"))
        }
    }

    #[test]
    fn default_pipeline_has_ownership_stage() {
        let gate = RequestGate::with_default_stages(GateConfig::default());
        assert_eq!(gate.stage_count(), 1);
        assert!(format!("{gate:?}").contains("ownership"));
    }

    #[test]
    fn empty_pipeline_allows() {
        let gate = RequestGate::new(GateConfig::default());
        let record = record_by("u1");
        let who = user("u2");
        let outcome = gate
            .evaluate(&GateRequest::new(Action::Delete, &who, &record))
            .unwrap();
        assert!(outcome.is_allowed());
        assert!(outcome.stage_results.is_empty());
    }

    #[test]
    fn owner_delete_is_allowed() {
        let gate = RequestGate::with_default_stages(GateConfig::default());
        let record = record_by("u1");
        let who = user("u1");
        let outcome = gate
            .evaluate(&GateRequest::new(Action::Delete, &who, &record))
            .unwrap();
        assert!(outcome.is_allowed());
        assert!(outcome.stage_results[0].passed);
    }

    #[test]
    fn stranger_delete_is_denied_by_ownership() {
        let gate = RequestGate::with_default_stages(GateConfig::default());
        let record = record_by("u1");
        let who = user("u2");
        let outcome = gate
            .evaluate(&GateRequest::new(Action::Delete, &who, &record))
            .unwrap();
        match outcome.decision {
            GateDecision::Denied { stage, .. } => assert_eq!(stage, "ownership"),
            GateDecision::Allowed => panic!("stranger allowed to delete"),
        }
    }

    #[test]
    fn stranger_edit_is_allowed_unless_configured() {
        let record = record_by("u1");
        let who = user("u2");
        let request = GateRequest::new(Action::Edit, &who, &record);

        let lenient = RequestGate::with_default_stages(GateConfig::default());
        assert!(lenient.evaluate(&request).unwrap().is_allowed());

        let strict = RequestGate::with_default_stages(GateConfig {
            enforce_ownership_on_edit: true,
        });
        assert!(!strict.evaluate(&request).unwrap().is_allowed());
    }

    #[test]
    fn pipeline_stops_at_first_failure() {
        let mut gate = RequestGate::new(GateConfig::default());
        gate.add_stage(Box::new(AlwaysFail));
        gate.add_stage(Box::new(Broken));
        let record = record_by("u1");
        let who = user("u1");
        let outcome = gate
            .evaluate(&GateRequest::new(Action::Delete, &who, &record))
            .unwrap();
        assert!(!outcome.is_allowed());
        assert_eq!(outcome.stage_results.len(), 1);
    }

    #[test]
    fn stage_error_propagates() {
        let mut gate = RequestGate::new(GateConfig::default());
        gate.add_stage(Box::new(Broken));
        let record = record_by("u1");
        let who = user("u1");
        let err = gate
            .evaluate(&GateRequest::new(Action::Delete, &who, &record))
            .unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: GateConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.enforce_ownership_on_edit);
    }
}
