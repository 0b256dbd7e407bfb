//! Tab keys and their titles.

use super::NOT_FOUND_KEY;
use crate::system::notifications::ui::NOTIFICATIONS_KEY;

const PROPERTY_EDIT_PREFIX: &str = "a002_property_edit_";

/// What a tab key points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabRoute {
    Users,
    UserNew,
    Properties,
    PropertyNew,
    PropertyEdit(u64),
    AgentApplications,
    Notifications,
    NotFound,
}

impl TabRoute {
    pub fn parse(key: &str) -> Self {
        match key {
            "a001_user" => TabRoute::Users,
            "a001_user_new" => TabRoute::UserNew,
            "a002_property" => TabRoute::Properties,
            "a002_property_new" => TabRoute::PropertyNew,
            "a003_agent_application" => TabRoute::AgentApplications,
            k if k == NOTIFICATIONS_KEY => TabRoute::Notifications,
            k => k
                .strip_prefix(PROPERTY_EDIT_PREFIX)
                .and_then(|id| id.parse().ok())
                .map(TabRoute::PropertyEdit)
                .unwrap_or(TabRoute::NotFound),
        }
    }
}

pub fn property_edit_key(id: u64) -> String {
    format!("{}{}", PROPERTY_EDIT_PREFIX, id)
}

/// Readable tab title for a key. Fallback: the not-found title.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match TabRoute::parse(key) {
        TabRoute::Users => "Users",
        TabRoute::UserNew => "New user",
        TabRoute::Properties => "Properties",
        TabRoute::PropertyNew => "New property",
        TabRoute::PropertyEdit(_) => "Edit property",
        TabRoute::AgentApplications => "Agent applications",
        TabRoute::Notifications => "Notifications",
        TabRoute::NotFound => {
            if key != NOT_FOUND_KEY {
                log::warn!("Unknown tab key: {}", key);
            }
            "Not found"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_keys() {
        assert_eq!(TabRoute::parse("a001_user"), TabRoute::Users);
        assert_eq!(TabRoute::parse("a002_property_new"), TabRoute::PropertyNew);
        assert_eq!(TabRoute::parse("sys_notifications"), TabRoute::Notifications);
        assert_eq!(TabRoute::parse(&property_edit_key(42)), TabRoute::PropertyEdit(42));
    }

    #[test]
    fn test_unknown_keys_are_not_found() {
        assert_eq!(TabRoute::parse("a002_property_edit_abc"), TabRoute::NotFound);
        assert_eq!(TabRoute::parse("a002_property_edit_"), TabRoute::NotFound);
        assert_eq!(TabRoute::parse("d400_monthly_summary"), TabRoute::NotFound);
        assert_eq!(TabRoute::parse(NOT_FOUND_KEY), TabRoute::NotFound);
        assert_eq!(tab_label_for_key("whatever"), "Not found");
    }
}
