use contracts::system::notifications::{Notification, NotificationKind};
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::config::config;
use crate::shared::format::format_datetime;
use crate::shared::icons::icon;
use crate::shared::title_badge::use_title_badge;

pub const APP_TITLE: &str = "Estate Admin";
pub const NOTIFICATIONS_KEY: &str = "sys_notifications";

/// Unread counter shared by the bell and the notification list
#[derive(Clone, Copy)]
pub struct NotificationsContext {
    pub unread: RwSignal<u32>,
}

impl NotificationsContext {
    pub fn refresh(&self) {
        let unread = self.unread;
        spawn_local(async move {
            match api::fetch_unread_count().await {
                Ok(count) => unread.set(count),
                Err(e) => log::warn!("Unread count not loaded: {}", e),
            }
        });
    }
}

pub fn provide_notifications() -> NotificationsContext {
    let context = NotificationsContext {
        unread: RwSignal::new(0),
    };
    provide_context(context);
    context
}

pub fn use_notifications() -> NotificationsContext {
    use_context::<NotificationsContext>().expect("NotificationsContext not provided")
}

fn kind_label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::AgentApplication => "Agent application",
        NotificationKind::PropertyPublished => "Property published",
        NotificationKind::System => "System",
    }
}

/// Header bell with unread badge. Polls the unread count and keeps the tab
/// title badge in sync while mounted.
#[component]
pub fn NotificationBell() -> impl IntoView {
    let notifications = use_notifications();
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let unread = notifications.unread;

    notifications.refresh();
    let poll = Interval::new(config().notifications.poll_interval_ms, move || {
        notifications.refresh()
    });
    let poll = StoredValue::new_local(Some(poll));
    on_cleanup(move || {
        poll.try_update_value(|p| p.take());
    });

    use_title_badge(APP_TITLE.to_string(), unread.into());

    view! {
        <button
            class="top-header__icon-btn"
            title="Notifications"
            on:click=move |_| tabs_store.open_tab(NOTIFICATIONS_KEY, "Notifications")
        >
            {icon("bell")}
            <Show when=move || { unread.get() > 0 }>
                <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Danger>
                    {move || unread.get().to_string()}
                </Badge>
            </Show>
        </button>
    }
}

#[component]
pub fn NotificationList() -> impl IntoView {
    let notifications = use_notifications();
    let (items, set_items) = signal(Vec::<Notification>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_notifications().await {
                Ok(list) => set_items.set(list),
                Err(e) => {
                    log::error!("Failed to fetch notifications: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());

    let mark_read = move |notification: Notification| {
        spawn_local(async move {
            match api::mark_read(notification.id).await {
                Ok(()) => {
                    set_items.update(|list| {
                        if let Some(n) = list.iter_mut().find(|n| n.id == notification.id) {
                            n.read = true;
                        }
                    });
                    notifications.refresh();
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="notification-list" style="padding: 20px;">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 16px;">
                <h2 style="margin: 0;">"Notifications"</h2>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| load() disabled=loading>
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </Flex>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {move || {
                let list = items.get();
                if list.is_empty() {
                    let text = if loading.get() { "Loading..." } else { "No notifications" };
                    return view! { <div class="notification-list__empty">{text}</div> }.into_any();
                }
                list.into_iter()
                    .map(|n| {
                        let unread = !n.read;
                        let for_click = n.clone();
                        view! {
                            <div class="notification-item" class:notification-item--unread=unread>
                                <div class="notification-item__head">
                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                                        {kind_label(n.kind)}
                                    </Badge>
                                    <strong>{n.title.clone()}</strong>
                                    <span class="notification-item__date">{format_datetime(&n.created_at)}</span>
                                </div>
                                {n.body.clone().map(|body| view! { <p class="notification-item__body">{body}</p> })}
                                {unread.then(|| view! {
                                    <Button
                                        appearance=ButtonAppearance::Subtle
                                        size=ButtonSize::Small
                                        on_click=move |_| mark_read(for_click.clone())
                                    >
                                        {icon("check")}
                                        " Mark as read"
                                    </Button>
                                })}
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}
