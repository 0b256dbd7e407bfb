//! Row-level actions and the permission rules deciding what a row shows.

use contracts::shared::permission::{PermissionAction, PermissionOracle};
use std::sync::Arc;

pub type RowPredicate<T> = Arc<dyn Fn(&str, &T) -> bool + Send + Sync>;

/// Handed to row actions so they can ask the table to reload the current page
#[derive(Clone)]
pub struct RowRefresh(Arc<dyn Fn() + Send + Sync>);

impl RowRefresh {
    pub fn new(f: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn run(&self) {
        (self.0)()
    }
}

/// Caller-defined operation attached to every row ("approve", "publish", ...)
pub struct RowAction<T> {
    pub key: String,
    pub label: String,
    pub icon: &'static str,
    on_click: Arc<dyn Fn(&str, &T, RowRefresh) + Send + Sync>,
    enabled: Option<RowPredicate<T>>,
}

impl<T> Clone for RowAction<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            icon: self.icon,
            on_click: self.on_click.clone(),
            enabled: self.enabled.clone(),
        }
    }
}

impl<T> RowAction<T> {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        icon: &'static str,
        on_click: impl Fn(&str, &T, RowRefresh) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon,
            on_click: Arc::new(on_click),
            enabled: None,
        }
    }

    pub fn enabled_when(mut self, predicate: impl Fn(&str, &T) -> bool + Send + Sync + 'static) -> Self {
        self.enabled = Some(Arc::new(predicate));
        self
    }

    pub fn is_enabled(&self, id: &str, item: &T) -> bool {
        self.enabled.as_ref().map(|p| p(id, item)).unwrap_or(true)
    }

    pub fn run(&self, id: &str, item: &T, refresh: RowRefresh) {
        (self.on_click)(id, item, refresh)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    /// Index into the policy's custom actions
    Custom(usize),
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMenu {
    Actions(Vec<MenuEntry>),
    Locked,
    Hidden,
}

impl RowMenu {
    pub fn is_hidden(&self) -> bool {
        matches!(self, RowMenu::Hidden)
    }
}

pub struct RowActionPolicy<T> {
    pub namespace: String,
    pub actions: Vec<RowAction<T>>,
    /// Defaults to visible
    pub show_edit: Option<RowPredicate<T>>,
    /// Defaults to visible
    pub show_delete: Option<RowPredicate<T>>,
    pub show_lock: bool,
}

impl<T> Clone for RowActionPolicy<T> {
    fn clone(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            actions: self.actions.clone(),
            show_edit: self.show_edit.clone(),
            show_delete: self.show_delete.clone(),
            show_lock: self.show_lock,
        }
    }
}

impl<T> RowActionPolicy<T> {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            actions: Vec::new(),
            show_edit: None,
            show_delete: None,
            show_lock: false,
        }
    }

    pub fn action(&self, index: usize) -> Option<&RowAction<T>> {
        self.actions.get(index)
    }

    /// Menu for a single row.
    ///
    /// When the oracle denies both update and delete on the row the lock glyph
    /// wins over any custom action.
    pub fn resolve(&self, id: &str, item: &T, oracle: &dyn PermissionOracle) -> RowMenu {
        let locked_or_hidden = if self.show_lock {
            RowMenu::Locked
        } else {
            RowMenu::Hidden
        };

        let can_update = oracle.can(&self.namespace, PermissionAction::Update, Some(id));
        let can_delete = oracle.can(&self.namespace, PermissionAction::Delete, Some(id));
        if !can_update && !can_delete {
            return locked_or_hidden;
        }

        let mut entries: Vec<MenuEntry> = self
            .actions
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_enabled(id, item))
            .map(|(i, _)| MenuEntry::Custom(i))
            .collect();

        let show_edit = self.show_edit.as_ref().map(|p| p(id, item)).unwrap_or(true);
        if show_edit && can_update {
            entries.push(MenuEntry::Edit);
        }
        let show_delete = self.show_delete.as_ref().map(|p| p(id, item)).unwrap_or(true);
        if show_delete && can_delete {
            entries.push(MenuEntry::Delete);
        }

        if entries.is_empty() {
            locked_or_hidden
        } else {
            RowMenu::Actions(entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::permission::PermissionGrants;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone)]
    struct Listing {
        published: bool,
    }

    fn never() -> Option<RowPredicate<Listing>> {
        Some(Arc::new(|_: &str, _: &Listing| false))
    }

    fn publish_action() -> RowAction<Listing> {
        RowAction::new("publish", "Publish", "check", |_, _, refresh| refresh.run())
            .enabled_when(|_, item: &Listing| !item.published)
    }

    fn editor() -> PermissionGrants {
        PermissionGrants::default().grant(
            "properties",
            &[PermissionAction::Update, PermissionAction::Delete],
        )
    }

    #[test]
    fn test_default_edit_and_delete() {
        let policy = RowActionPolicy::<Listing>::new("properties");
        let menu = policy.resolve("1", &Listing { published: true }, &editor());
        assert_eq!(menu, RowMenu::Actions(vec![MenuEntry::Edit, MenuEntry::Delete]));
    }

    #[test]
    fn test_nothing_to_show_renders_lock() {
        let mut policy = RowActionPolicy::<Listing>::new("properties");
        policy.show_edit = never();
        policy.show_delete = never();
        policy.show_lock = true;
        let menu = policy.resolve("1", &Listing { published: true }, &editor());
        assert_eq!(menu, RowMenu::Locked);

        policy.show_lock = false;
        let menu = policy.resolve("1", &Listing { published: true }, &editor());
        assert_eq!(menu, RowMenu::Hidden);
    }

    #[test]
    fn test_oracle_denial_beats_custom_actions() {
        let mut policy = RowActionPolicy::<Listing>::new("properties");
        policy.actions.push(publish_action());
        policy.show_lock = true;
        let read_only = PermissionGrants::default().grant("properties", &[PermissionAction::Read]);
        let menu = policy.resolve("1", &Listing { published: false }, &read_only);
        assert_eq!(menu, RowMenu::Locked);
    }

    #[test]
    fn test_custom_action_enablement() {
        let mut policy = RowActionPolicy::<Listing>::new("properties");
        policy.actions.push(publish_action());
        policy.show_delete = never();

        let draft = policy.resolve("1", &Listing { published: false }, &editor());
        assert_eq!(
            draft,
            RowMenu::Actions(vec![MenuEntry::Custom(0), MenuEntry::Edit])
        );
        let live = policy.resolve("1", &Listing { published: true }, &editor());
        assert_eq!(live, RowMenu::Actions(vec![MenuEntry::Edit]));
    }

    #[test]
    fn test_per_entity_denial() {
        let policy = RowActionPolicy::<Listing>::new("properties");
        let grants = editor().deny_entity("properties", "9", PermissionAction::Delete);
        let menu = policy.resolve("9", &Listing { published: true }, &grants);
        assert_eq!(menu, RowMenu::Actions(vec![MenuEntry::Edit]));
    }

    #[test]
    fn test_action_receives_refresh() {
        let refreshed = Arc::new(AtomicUsize::new(0));
        let counter = refreshed.clone();
        let refresh = RowRefresh::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        publish_action().run("1", &Listing { published: false }, refresh);
        assert_eq!(refreshed.load(Ordering::SeqCst), 1);
    }
}
