//! Contract between the stepper and its step components.

use leptos::prelude::*;
use serde_json::Value;
use std::sync::Arc;

use super::machine::{StepDescriptor, StepValidationError};

pub type SubmitFn = Arc<dyn Fn() -> Result<Value, StepValidationError> + Send + Sync>;

/// Payload of the active step's own submit; `Ok(None)` when it registered none
pub fn run_step_submit(submit: Option<&SubmitFn>) -> Result<Option<Value>, StepValidationError> {
    submit.map(|submit| submit()).transpose()
}

/// Handed to the active step's view.
///
/// A step registers its `submit` once on creation; the stepper's Next button
/// runs it and advances only on `Ok`.
#[derive(Clone, Copy)]
pub struct StepContext {
    data: Signal<Option<Value>>,
    next: Callback<Option<Value>>,
    previous: Callback<()>,
    submit_slot: StoredValue<Option<SubmitFn>>,
}

impl StepContext {
    pub(crate) fn new(
        data: Signal<Option<Value>>,
        next: Callback<Option<Value>>,
        previous: Callback<()>,
        submit_slot: StoredValue<Option<SubmitFn>>,
    ) -> Self {
        Self {
            data,
            next,
            previous,
            submit_slot,
        }
    }

    /// Data previously recorded for this step (or seeded in edit mode)
    pub fn data(&self) -> Option<Value> {
        self.data.get_untracked()
    }

    /// Field of an object payload as a string, empty when missing
    pub fn field(&self, key: &str) -> String {
        self.data
            .with_untracked(|d| d.as_ref().and_then(|v| v.get(key)).map(value_to_string))
            .unwrap_or_default()
    }

    /// Advance without going through `submit`; `None` keeps the recorded data
    pub fn next(&self, data: Option<Value>) {
        self.next.run(data);
    }

    pub fn previous(&self) {
        self.previous.run(());
    }

    pub fn register_submit(
        &self,
        submit: impl Fn() -> Result<Value, StepValidationError> + Send + Sync + 'static,
    ) {
        self.submit_slot.set_value(Some(Arc::new(submit)));
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub type StepView = Arc<dyn Fn(StepContext) -> AnyView + Send + Sync>;

#[derive(Clone)]
pub struct StepDef {
    pub descriptor: StepDescriptor,
    pub view: StepView,
}

impl StepDef {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        view: impl Fn(StepContext) -> AnyView + Send + Sync + 'static,
    ) -> Self {
        Self {
            descriptor: StepDescriptor::new(id, label),
            view: Arc::new(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("Oslo")), "Oslo");
        assert_eq!(value_to_string(&json!(3)), "3");
        assert_eq!(value_to_string(&json!(250000.5)), "250000.5");
        assert_eq!(value_to_string(&Value::Null), "");
    }
}
