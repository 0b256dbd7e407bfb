use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Persisted, resumable state of a multi-step form, addressed by the stepper id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardDraft {
    pub id: String,
    #[serde(default)]
    pub step_data: BTreeMap<String, Value>,
    #[serde(default)]
    pub last_visited_step_id: Option<String>,
}

impl WizardDraft {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Any parse failure yields `None`; a corrupt draft is never partially recovered.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
