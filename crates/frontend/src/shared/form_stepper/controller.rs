use serde_json::Value;

use super::draft_store::DraftStore;
use super::machine::{NextOutcome, PreviousOutcome, StepDescriptor, StepperMachine};

/// Binds a [`StepperMachine`] to a [`DraftStore`]: every state change is
/// written through, a successful final submission clears the draft.
///
/// Storage failures are logged and never block the wizard. While a final
/// submission is in flight the stepper does not move.
#[derive(Debug, Clone)]
pub struct StepperController<S: DraftStore> {
    stepper_id: String,
    machine: StepperMachine,
    store: S,
    submitting: bool,
}

impl<S: DraftStore> StepperController<S> {
    pub fn new(stepper_id: impl Into<String>, steps: Vec<StepDescriptor>, store: S) -> Self {
        Self {
            stepper_id: stepper_id.into(),
            machine: StepperMachine::new(steps),
            store,
            submitting: false,
        }
    }

    pub fn stepper_id(&self) -> &str {
        &self.stepper_id
    }

    pub fn machine(&self) -> &StepperMachine {
        &self.machine
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn mount(&mut self, initial_data: Option<Value>) {
        let draft = match self.store.load(&self.stepper_id) {
            Ok(draft) => draft,
            Err(e) => {
                log::warn!("Draft {} not loaded: {}", self.stepper_id, e);
                None
            }
        };
        if draft.is_some() {
            log::debug!("Resuming draft {}", self.stepper_id);
        }
        self.machine.resume(draft, initial_data);
    }

    pub fn next(&mut self, data: Value) -> Option<NextOutcome> {
        if self.submitting {
            log::debug!("Stepper {} is submitting, next ignored", self.stepper_id);
            return None;
        }
        let outcome = self.machine.next(data)?;
        self.persist();
        if matches!(outcome, NextOutcome::Submit(_)) {
            self.submitting = true;
        }
        Some(outcome)
    }

    /// `next` with the step's payload, or with the data already recorded
    /// for the active step when the step hands none over
    pub fn advance(&mut self, payload: Option<Value>) -> Option<NextOutcome> {
        let data = payload.unwrap_or_else(|| {
            self.machine
                .step_data(self.machine.active_step_id())
                .cloned()
                .unwrap_or(Value::Null)
        });
        self.next(data)
    }

    pub fn previous(&mut self) -> PreviousOutcome {
        let outcome = self.machine.previous();
        if outcome == PreviousOutcome::Moved {
            self.persist();
        }
        outcome
    }

    pub fn select(&mut self, step_id: &str) -> bool {
        if self.submitting {
            return false;
        }
        let moved = self.machine.select(step_id);
        if moved {
            self.persist();
        }
        moved
    }

    /// Outcome of the final submission. On failure nothing changes so the
    /// user can retry from the last step.
    pub fn finish(&mut self, success: bool) {
        self.submitting = false;
        if !success {
            log::warn!("Submission of {} failed, keeping draft", self.stepper_id);
            return;
        }
        if let Err(e) = self.store.remove(&self.stepper_id) {
            log::warn!("Draft {} not removed: {}", self.stepper_id, e);
        }
        self.machine.reset();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.machine.to_draft(&self.stepper_id)) {
            log::warn!("Draft {} not saved: {}", self.stepper_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::form_stepper::draft_store::MemoryDraftStore;
    use crate::shared::form_stepper::machine::StepValidationError;
    use crate::shared::form_stepper::step::{run_step_submit, SubmitFn};
    use serde_json::json;
    use std::sync::Arc;

    fn steps() -> Vec<StepDescriptor> {
        vec![
            StepDescriptor::new("account", "Account"),
            StepDescriptor::new("profile", "Profile"),
            StepDescriptor::new("role", "Role"),
        ]
    }

    fn controller(store: &MemoryDraftStore) -> StepperController<MemoryDraftStore> {
        let mut controller = StepperController::new("user-create", steps(), store.clone());
        controller.mount(None);
        controller
    }

    fn fill(controller: &mut StepperController<MemoryDraftStore>) -> Option<NextOutcome> {
        controller.next(json!({"email": "a@b.c"}));
        controller.next(json!({"firstName": "Ann"}));
        controller.next(json!({"role": "agent"}))
    }

    #[test]
    fn test_failed_submission_keeps_everything() {
        let store = MemoryDraftStore::new();
        let mut controller = controller(&store);
        assert!(matches!(fill(&mut controller), Some(NextOutcome::Submit(_))));

        let before = controller.machine().clone();
        controller.finish(false);
        assert_eq!(controller.machine(), &before);
        assert_eq!(controller.machine().active_step_id(), "role");
        assert_eq!(controller.machine().step_data("account"), Some(&json!({"email": "a@b.c"})));
        assert!(store.contains("user-create"));
    }

    #[test]
    fn test_successful_submission_clears_draft() {
        let store = MemoryDraftStore::new();
        let mut controller = controller(&store);
        fill(&mut controller);
        controller.finish(true);
        assert!(!store.contains("user-create"));
        assert_eq!(controller.machine().active_step_id(), "account");

        let remounted = self::controller(&store);
        assert_eq!(remounted.machine().active_step_id(), "account");
        assert_eq!(remounted.machine().step_data("account"), None);
    }

    #[test]
    fn test_remount_resumes_last_visited() {
        let store = MemoryDraftStore::new();
        let mut controller = controller(&store);
        controller.next(json!({"email": "a@b.c"}));
        controller.next(json!({"firstName": "Ann"}));
        controller.select("account");

        let remounted = self::controller(&store);
        assert_eq!(remounted.machine().active_step_id(), "role");
        assert!(remounted.machine().is_unlocked("profile"));
    }

    #[test]
    fn test_corrupt_draft_starts_fresh() {
        let store = MemoryDraftStore::new();
        store.insert_raw("user-create", "not json");
        let controller = controller(&store);
        assert_eq!(controller.machine().active_step_id(), "account");
        assert!(!store.contains("user-create"));
    }

    #[test]
    fn test_abort_does_not_write() {
        let store = MemoryDraftStore::new();
        let mut controller = controller(&store);
        assert_eq!(controller.previous(), PreviousOutcome::Abort);
        assert!(!store.contains("user-create"));
    }

    #[test]
    fn test_select_on_active_step_keeps_step_validation() {
        let store = MemoryDraftStore::new();
        let mut controller = controller(&store);
        assert!(!controller.select("account"));
        assert!(!store.contains("user-create"));

        let invalid: SubmitFn = Arc::new(|| Err(StepValidationError::new("Email is required")));
        let blocked = run_step_submit(Some(&invalid)).map(|payload| controller.advance(payload));
        assert_eq!(blocked, Err(StepValidationError::new("Email is required")));
        assert_eq!(controller.machine().active_step_id(), "account");
        assert!(!controller.machine().is_completed("account"));

        let valid: SubmitFn = Arc::new(|| Ok(json!({"email": "a@b.c"})));
        let outcome = run_step_submit(Some(&valid)).map(|payload| controller.advance(payload));
        assert_eq!(outcome, Ok(Some(NextOutcome::Advanced)));
        assert_eq!(controller.machine().step_data("account"), Some(&json!({"email": "a@b.c"})));
    }

    #[test]
    fn test_advance_without_payload_keeps_recorded_data() {
        let store = MemoryDraftStore::new();
        let mut controller = controller(&store);
        controller.next(json!({"email": "a@b.c"}));
        controller.previous();

        assert_eq!(controller.advance(None), Some(NextOutcome::Advanced));
        assert_eq!(controller.machine().step_data("account"), Some(&json!({"email": "a@b.c"})));
    }

    #[test]
    fn test_no_moves_while_submitting() {
        let store = MemoryDraftStore::new();
        let mut controller = controller(&store);
        assert!(matches!(fill(&mut controller), Some(NextOutcome::Submit(_))));
        assert!(controller.is_submitting());

        assert_eq!(controller.advance(None), None);
        assert!(!controller.select("account"));
        assert_eq!(controller.machine().active_step_id(), "role");

        controller.finish(false);
        assert!(!controller.is_submitting());
        assert!(matches!(controller.advance(None), Some(NextOutcome::Submit(_))));
    }
}
