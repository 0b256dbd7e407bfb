//! Persistence of stepper drafts, addressed by stepper id.

use contracts::shared::wizard_draft::WizardDraft;
#[cfg(test)]
use std::{cell::RefCell, collections::HashMap, rc::Rc};
use thiserror::Error;

use crate::shared::config::config;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftStoreError {
    #[error("Draft storage is not available")]
    Unavailable,
    #[error("Draft storage failed: {0}")]
    Storage(String),
    #[error("Failed to serialize draft: {0}")]
    Serialize(String),
}

/// Corrupt entries are removed on load and reported as absent.
pub trait DraftStore {
    fn load(&self, stepper_id: &str) -> Result<Option<WizardDraft>, DraftStoreError>;

    fn save(&self, draft: &WizardDraft) -> Result<(), DraftStoreError>;

    fn remove(&self, stepper_id: &str) -> Result<(), DraftStoreError>;
}

/// Browser `localStorage`, one key per stepper id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStorageDraftStore {
    prefix: String,
}

impl Default for LocalStorageDraftStore {
    fn default() -> Self {
        Self::new(config().stepper.draft_key_prefix.clone())
    }
}

impl LocalStorageDraftStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn key(&self, stepper_id: &str) -> String {
        format!("{}{}", self.prefix, stepper_id)
    }

    fn storage() -> Result<web_sys::Storage, DraftStoreError> {
        web_sys::window()
            .ok_or(DraftStoreError::Unavailable)?
            .local_storage()
            .map_err(|e| DraftStoreError::Storage(format!("{:?}", e)))?
            .ok_or(DraftStoreError::Unavailable)
    }
}

impl DraftStore for LocalStorageDraftStore {
    fn load(&self, stepper_id: &str) -> Result<Option<WizardDraft>, DraftStoreError> {
        let storage = Self::storage()?;
        let key = self.key(stepper_id);
        let raw = storage
            .get_item(&key)
            .map_err(|e| DraftStoreError::Storage(format!("{:?}", e)))?;

        match raw {
            None => Ok(None),
            Some(raw) => match WizardDraft::from_json(&raw) {
                Some(draft) => Ok(Some(draft)),
                None => {
                    log::warn!("Discarding corrupt draft {}", key);
                    storage
                        .remove_item(&key)
                        .map_err(|e| DraftStoreError::Storage(format!("{:?}", e)))?;
                    Ok(None)
                }
            },
        }
    }

    fn save(&self, draft: &WizardDraft) -> Result<(), DraftStoreError> {
        let raw = draft
            .to_json()
            .map_err(|e| DraftStoreError::Serialize(e.to_string()))?;
        Self::storage()?
            .set_item(&self.key(&draft.id), &raw)
            .map_err(|e| DraftStoreError::Storage(format!("{:?}", e)))
    }

    fn remove(&self, stepper_id: &str) -> Result<(), DraftStoreError> {
        Self::storage()?
            .remove_item(&self.key(stepper_id))
            .map_err(|e| DraftStoreError::Storage(format!("{:?}", e)))
    }
}

/// In-memory store holding serialized drafts. Clones share the same entries.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw entry as-is
    pub fn insert_raw(&self, stepper_id: &str, raw: &str) {
        self.entries
            .borrow_mut()
            .insert(stepper_id.to_string(), raw.to_string());
    }

    pub fn contains(&self, stepper_id: &str) -> bool {
        self.entries.borrow().contains_key(stepper_id)
    }
}

#[cfg(test)]
impl DraftStore for MemoryDraftStore {
    fn load(&self, stepper_id: &str) -> Result<Option<WizardDraft>, DraftStoreError> {
        let raw = self.entries.borrow().get(stepper_id).cloned();
        let Some(raw) = raw else {
            return Ok(None);
        };
        let draft = WizardDraft::from_json(&raw);
        if draft.is_none() {
            self.entries.borrow_mut().remove(stepper_id);
        }
        Ok(draft)
    }

    fn save(&self, draft: &WizardDraft) -> Result<(), DraftStoreError> {
        let raw = draft
            .to_json()
            .map_err(|e| DraftStoreError::Serialize(e.to_string()))?;
        self.entries.borrow_mut().insert(draft.id.clone(), raw);
        Ok(())
    }

    fn remove(&self, stepper_id: &str) -> Result<(), DraftStoreError> {
        self.entries.borrow_mut().remove(stepper_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryDraftStore::new();
        let mut draft = WizardDraft::new("user-create");
        draft.step_data.insert("account".into(), json!({"email": "a@b.c"}));

        store.save(&draft).unwrap();
        assert_eq!(store.load("user-create").unwrap(), Some(draft));

        store.remove("user-create").unwrap();
        assert_eq!(store.load("user-create").unwrap(), None);
    }

    #[test]
    fn test_corrupt_entry_is_removed() {
        let store = MemoryDraftStore::new();
        store.insert_raw("user-create", "{\"id\": \"user-create\", \"stepData\": [");

        assert_eq!(store.load("user-create").unwrap(), None);
        assert!(!store.contains("user-create"));
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryDraftStore::new();
        let other = store.clone();
        store.save(&WizardDraft::new("w")).unwrap();
        assert!(other.contains("w"));
    }

    #[test]
    fn test_local_storage_key() {
        let store = LocalStorageDraftStore::new("wizard_draft:");
        assert_eq!(store.key("property-create"), "wizard_draft:property-create");
        assert_eq!(LocalStorageDraftStore::default().key("x"), "wizard_draft:x");
    }
}
