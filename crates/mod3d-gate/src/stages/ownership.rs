use crate::error::GateError;
use crate::stage::{Action, GateRequest, GateStage, StageDecision};

/// Ownership check.
///
/// Passes when the acting identity is the record's author, compared by
/// identity and nothing derived from it. Applies to deletes always and to
/// edits only when `enforce_on_edit` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct OwnershipStage {
    enforce_on_edit: bool,
}

impl OwnershipStage {
    pub fn new(enforce_on_edit: bool) -> Self {
        Self { enforce_on_edit }
    }

    fn applies_to(&self, action: Action) -> bool {
        match action {
            Action::Delete => true,
            Action::Edit => self.enforce_on_edit,
        }
    }
}

impl GateStage for OwnershipStage {
    fn name(&self) -> &str {
        "ownership"
    }

    fn evaluate(&self, request: &GateRequest<'_>) -> Result<StageDecision, GateError> {
        if !self.applies_to(request.action) {
            return Ok(StageDecision::Pass);
        }
        if request.record.author == *request.identity {
            return Ok(StageDecision::Pass);
        }
        Ok(StageDecision::Fail {
            reason: format!(
                "{} may not {} record {} owned by {}",
                request.identity, request.action, request.record.id, request.record.author
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn owner_may_delete() {
        let record = record_by("u1");
        let me = user("u1");
        let decision = OwnershipStage::default()
            .evaluate(&GateRequest::new(Action::Delete, &me, &record))
            .unwrap();
        assert!(decision.is_pass());
    }

    #[test]
    fn stranger_may_not_delete() {
        let record = record_by("u1");
        let other = user("u2");
        let decision = OwnershipStage::default()
            .evaluate(&GateRequest::new(Action::Delete, &other, &record))
            .unwrap();
        match decision {
            StageDecision::Fail { reason } => assert!(reason.contains("may not delete")),
            StageDecision::Pass => panic!("stranger passed ownership"),
        }
    }

    #[test]
    fn edit_is_not_checked_by_default() {
        let record = record_by("u1");
        let other = user("u2");
        let decision = OwnershipStage::default()
            .evaluate(&GateRequest::new(Action::Edit, &other, &record))
            .unwrap();
        assert!(decision.is_pass());
    }

    #[test]
    fn edit_is_checked_when_enforced() {
        let record = record_by("u1");
        let other = user("u2");
        let decision = OwnershipStage::new(true)
            .evaluate(&GateRequest::new(Action::Edit, &other, &record))
            .unwrap();
        assert!(!decision.is_pass());
    }
}
