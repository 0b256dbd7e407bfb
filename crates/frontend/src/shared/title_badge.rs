//! Browser tab title carrying an unread counter.
//!
//! Other parts of the page (and the browser itself) may overwrite
//! `document.title`, so the badge is re-asserted on a fixed interval for as
//! long as the owning component is mounted.

use gloo_timers::callback::Interval;
use leptos::prelude::*;

use crate::shared::config::config;

pub fn badge_title(base: &str, unread: u32) -> String {
    if unread == 0 {
        base.to_string()
    } else {
        format!("({}) {}", unread.min(99), base)
    }
}

fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if document.title() != title {
            document.set_title(title);
        }
    }
}

/// Keeps `document.title` at `(<unread>) <base>` until the current owner is
/// cleaned up, then restores the base title.
pub fn use_title_badge(base: String, unread: Signal<u32>) {
    let interval_ms = config().notifications.title_interval_ms;
    let base_for_tick = base.clone();
    set_document_title(&badge_title(&base, unread.get_untracked()));

    let interval = Interval::new(interval_ms, move || {
        set_document_title(&badge_title(&base_for_tick, unread.get_untracked()));
    });
    let handle = StoredValue::new_local(Some(interval));

    on_cleanup(move || {
        // dropping the interval cancels it
        handle.try_update_value(|i| i.take());
        set_document_title(&base);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_title() {
        assert_eq!(badge_title("Estate Admin", 0), "Estate Admin");
        assert_eq!(badge_title("Estate Admin", 3), "(3) Estate Admin");
        assert_eq!(badge_title("Estate Admin", 250), "(99) Estate Admin");
    }
}
