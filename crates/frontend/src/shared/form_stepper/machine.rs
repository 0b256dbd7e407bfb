//! Form stepper state machine.
//!
//! States are step ids. `step_data` for a step is only ever written while
//! that step is active.

use contracts::shared::wizard_draft::WizardDraft;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    pub id: String,
    pub label: String,
}

impl StepDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Reported by a step whose local data is not valid yet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct StepValidationError(pub String);

impl StepValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    Advanced,
    /// Last step accepted; carries the aggregated payload of every step
    Submit(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousOutcome {
    Moved,
    /// `previous` on the first step cancels the wizard
    Abort,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepperMachine {
    steps: Vec<StepDescriptor>,
    active_step_id: String,
    step_data: BTreeMap<String, Value>,
    last_visited_step_id: String,
    edit_mode: bool,
}

impl StepperMachine {
    pub fn new(steps: Vec<StepDescriptor>) -> Self {
        let first = steps.first().map(|s| s.id.clone()).unwrap_or_default();
        Self {
            steps,
            active_step_id: first.clone(),
            step_data: BTreeMap::new(),
            last_visited_step_id: first,
            edit_mode: false,
        }
    }

    /// Mount-time state: a persisted draft wins, otherwise `initial_data`
    /// seeds every step and the wizard starts over at the first step.
    /// Initial data switches the stepper into edit mode either way.
    pub fn resume(&mut self, draft: Option<WizardDraft>, initial_data: Option<Value>) {
        self.edit_mode = initial_data.is_some();
        let first = self.first_step_id();

        match (draft, initial_data) {
            (Some(draft), _) => {
                self.step_data = draft.step_data;
                self.last_visited_step_id = draft.last_visited_step_id.unwrap_or_else(|| first.clone());
                self.active_step_id = self.last_visited_step_id.clone();
            }
            (None, Some(data)) => {
                self.step_data = self
                    .steps
                    .iter()
                    .map(|s| (s.id.clone(), data.clone()))
                    .collect();
                self.active_step_id = first.clone();
                self.last_visited_step_id = first;
            }
            (None, None) => {}
        }
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn active_step_id(&self) -> &str {
        &self.active_step_id
    }

    /// `None` when the active id matches no declared step (e.g. a stale draft)
    pub fn active_step(&self) -> Option<&StepDescriptor> {
        self.steps.iter().find(|s| s.id == self.active_step_id)
    }

    pub fn last_visited_step_id(&self) -> &str {
        &self.last_visited_step_id
    }

    pub fn step_data(&self, step_id: &str) -> Option<&Value> {
        self.step_data.get(step_id)
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn is_first_active(&self) -> bool {
        self.active_index() == Some(0)
    }

    pub fn is_last_active(&self) -> bool {
        self.active_index()
            .is_some_and(|i| i + 1 == self.steps.len())
    }

    pub fn is_completed(&self, step_id: &str) -> bool {
        self.step_data.contains_key(step_id)
    }

    /// Edit mode unlocks everything; in create mode only completed steps and
    /// the furthest visited one are reachable.
    pub fn is_unlocked(&self, step_id: &str) -> bool {
        self.edit_mode || self.is_completed(step_id) || self.last_visited_step_id == step_id
    }

    /// Records `data` for the active step, then advances or asks for the
    /// final submission. `None` when the active step is stale.
    pub fn next(&mut self, data: Value) -> Option<NextOutcome> {
        let index = self.active_index()?;
        self.step_data.insert(self.active_step_id.clone(), data);

        let Some(following) = self.steps.get(index + 1) else {
            return Some(NextOutcome::Submit(self.aggregate()));
        };
        self.active_step_id = following.id.clone();
        if self
            .index_of(&self.last_visited_step_id)
            .map_or(true, |furthest| index + 1 > furthest)
        {
            self.last_visited_step_id = following.id.clone();
        }
        Some(NextOutcome::Advanced)
    }

    pub fn previous(&mut self) -> PreviousOutcome {
        match self.active_index() {
            Some(index) if index > 0 => {
                self.active_step_id = self.steps[index - 1].id.clone();
                PreviousOutcome::Moved
            }
            _ => PreviousOutcome::Abort,
        }
    }

    /// Jumps to `step_id` if it is declared, unlocked and not already active
    pub fn select(&mut self, step_id: &str) -> bool {
        if step_id == self.active_step_id
            || self.index_of(step_id).is_none()
            || !self.is_unlocked(step_id)
        {
            return false;
        }
        self.active_step_id = step_id.to_string();
        true
    }

    /// Step payloads merged in step order. Object payloads are merged
    /// key-wise, anything else is kept under its step id.
    pub fn aggregate(&self) -> Value {
        let mut merged = Map::new();
        for step in &self.steps {
            match self.step_data.get(&step.id) {
                Some(Value::Object(fields)) => {
                    merged.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                Some(Value::Null) | None => {}
                Some(other) => {
                    merged.insert(step.id.clone(), other.clone());
                }
            }
        }
        Value::Object(merged)
    }

    /// Back to a fresh create-mode stepper
    pub fn reset(&mut self) {
        *self = Self::new(std::mem::take(&mut self.steps));
    }

    pub fn to_draft(&self, stepper_id: &str) -> WizardDraft {
        WizardDraft {
            id: stepper_id.to_string(),
            step_data: self.step_data.clone(),
            last_visited_step_id: Some(self.last_visited_step_id.clone()),
        }
    }

    fn first_step_id(&self) -> String {
        self.steps.first().map(|s| s.id.clone()).unwrap_or_default()
    }

    fn active_index(&self) -> Option<usize> {
        self.index_of(&self.active_step_id)
    }

    fn index_of(&self, step_id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == step_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn three_steps() -> StepperMachine {
        StepperMachine::new(vec![
            StepDescriptor::new("basics", "Basics"),
            StepDescriptor::new("location", "Location"),
            StepDescriptor::new("pricing", "Pricing"),
        ])
    }

    #[test]
    fn test_next_unlocks_following_step_only() {
        let mut machine = three_steps();
        assert!(machine.is_unlocked("basics"));
        assert!(!machine.is_unlocked("location"));

        assert_eq!(machine.next(json!({"a": 1})), Some(NextOutcome::Advanced));
        assert_eq!(machine.active_step_id(), "location");
        assert_eq!(machine.step_data("basics"), Some(&json!({"a": 1})));
        assert!(machine.is_unlocked("location"));
        assert!(!machine.is_unlocked("pricing"));
        assert!(!machine.select("pricing"));

        machine.next(json!({"b": 2}));
        assert!(machine.is_unlocked("pricing"));
    }

    #[test]
    fn test_select_active_step_does_not_move() {
        let mut machine = three_steps();
        assert!(!machine.select("basics"));
        assert_eq!(machine.step_data("basics"), None);

        machine.resume(None, Some(json!({"title": "Loft"})));
        assert!(machine.select("location"));
        assert!(!machine.select("location"));
        assert_eq!(machine.active_step_id(), "location");
    }

    #[test]
    fn test_edit_mode_unlocks_every_step() {
        let mut machine = three_steps();
        machine.resume(None, Some(json!({"title": "Loft"})));

        assert_eq!(machine.last_visited_step_id(), "basics");
        assert!(machine.is_edit_mode());
        for step in ["basics", "location", "pricing"] {
            assert!(machine.is_unlocked(step));
        }
        assert!(machine.select("pricing"));
        assert_eq!(machine.active_step_id(), "pricing");
        assert_eq!(machine.step_data("location"), Some(&json!({"title": "Loft"})));
    }

    #[test]
    fn test_draft_wins_over_initial_data() {
        let mut draft = WizardDraft::new("property-edit");
        draft.step_data.insert("basics".into(), json!({"title": "Draft"}));
        draft.last_visited_step_id = Some("location".into());

        let mut machine = three_steps();
        machine.resume(Some(draft), Some(json!({"title": "Stored"})));
        assert_eq!(machine.active_step_id(), "location");
        assert_eq!(machine.step_data("basics"), Some(&json!({"title": "Draft"})));
        assert_eq!(machine.step_data("pricing"), None);
    }

    #[test]
    fn test_previous_keeps_data_and_aborts_on_first() {
        let mut machine = three_steps();
        machine.next(json!({"a": 1}));
        assert_eq!(machine.previous(), PreviousOutcome::Moved);
        assert_eq!(machine.active_step_id(), "basics");
        assert_eq!(machine.step_data("basics"), Some(&json!({"a": 1})));
        assert_eq!(machine.last_visited_step_id(), "location");
        assert_eq!(machine.previous(), PreviousOutcome::Abort);
        assert_eq!(machine.active_step_id(), "basics");
    }

    #[test]
    fn test_revisit_overwrites_only_that_step() {
        let mut machine = three_steps();
        machine.next(json!({"a": 1}));
        machine.next(json!({"b": 2}));
        assert!(machine.select("basics"));
        machine.next(json!({"a": 10}));

        assert_eq!(machine.step_data("basics"), Some(&json!({"a": 10})));
        assert_eq!(machine.step_data("location"), Some(&json!({"b": 2})));
        // furthest visited step is not pulled back
        assert_eq!(machine.last_visited_step_id(), "pricing");
    }

    #[test]
    fn test_last_step_submits_aggregate() {
        let mut machine = three_steps();
        machine.next(json!({"title": "Loft"}));
        machine.next(json!({"city": "Oslo"}));
        let outcome = machine.next(json!(42));
        assert_eq!(
            outcome,
            Some(NextOutcome::Submit(json!({"title": "Loft", "city": "Oslo", "pricing": 42})))
        );
        assert_eq!(machine.active_step_id(), "pricing");
        assert!(machine.is_last_active());
    }

    #[test]
    fn test_stale_active_step() {
        let mut draft = WizardDraft::new("w");
        draft.last_visited_step_id = Some("removed".into());
        let mut machine = three_steps();
        machine.resume(Some(draft), None);

        assert_eq!(machine.active_step(), None);
        assert_eq!(machine.next(json!({})), None);
        assert_eq!(machine.previous(), PreviousOutcome::Abort);
    }

    #[test]
    fn test_reset() {
        let mut machine = three_steps();
        machine.resume(None, Some(json!({"x": 1})));
        machine.select("pricing");
        machine.reset();
        assert_eq!(machine, three_steps());
    }
}
