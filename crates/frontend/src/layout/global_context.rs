use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

use crate::layout::tabs::tab_label_for_key;

/// Open tabs, the active tab and sidebar visibility.
///
/// Every page of the dashboard lives in a tab addressed by a string key
/// (see `layout::tabs::registry`). The active key is mirrored into the
/// `?active=` query parameter so a reload reopens it.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(active_key) = active_from_query(&search) {
            self.open_tab(&active_key, tab_label_for_key(&active_key));
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let new_url = active_query(&active_key);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    /// Opens the tab (or just activates it when already open)
    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                })
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn update_tab_title(&self, key: &str, new_title: &str) {
        self.opened.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.title = new_title.to_string();
            }
        });
    }

    /// Closing the active tab activates the last remaining one
    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab: key='{}'", key);
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            let next_active = self
                .opened
                .with_untracked(|tabs| tabs.last().map(|t| t.key.clone()));
            self.active.set(next_active);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// `?active=<key>` -> key; empty values are ignored
fn active_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").filter(|key| !key.is_empty()).cloned()
}

fn active_query(key: &str) -> String {
    let query_string =
        serde_qs::to_string(&HashMap::from([("active".to_string(), key.to_string())]))
            .unwrap_or_default();
    format!("?{}", query_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_query_round_trip() {
        let query = active_query("a002_property_edit_7");
        assert_eq!(query, "?active=a002_property_edit_7");
        assert_eq!(
            active_from_query(&query).as_deref(),
            Some("a002_property_edit_7")
        );
    }

    #[test]
    fn test_active_from_query_ignores_missing_or_empty() {
        assert_eq!(active_from_query(""), None);
        assert_eq!(active_from_query("?active="), None);
        assert_eq!(active_from_query("?other=1"), None);
    }

    #[test]
    fn test_close_active_tab_activates_last() {
        let ctx = AppGlobalContext::new();
        ctx.open_tab("a001_user", "Users");
        ctx.open_tab("a002_property", "Properties");
        ctx.open_tab("sys_notifications", "Notifications");
        ctx.activate_tab("a002_property");

        ctx.close_tab("a002_property");
        assert_eq!(ctx.active.get_untracked().as_deref(), Some("sys_notifications"));

        ctx.close_tab("a001_user");
        assert_eq!(ctx.active.get_untracked().as_deref(), Some("sys_notifications"));
        assert_eq!(ctx.opened.with_untracked(|t| t.len()), 1);
    }

    #[test]
    fn test_open_existing_tab_only_activates() {
        let ctx = AppGlobalContext::new();
        ctx.open_tab("a001_user", "Users");
        ctx.open_tab("a002_property", "Properties");
        ctx.open_tab("a001_user", "Users");
        assert_eq!(ctx.opened.with_untracked(|t| t.len()), 2);
        assert_eq!(ctx.active.get_untracked().as_deref(), Some("a001_user"));
    }
}
