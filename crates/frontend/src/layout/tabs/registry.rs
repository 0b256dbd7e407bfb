//! Tab content registry: the single mapping of tab.key -> View.

use leptos::prelude::*;

use super::tab_labels::TabRoute;
use crate::domain::a001_user::ui::list::UserList;
use crate::domain::a001_user::ui::wizard::UserWizard;
use crate::domain::a002_property::ui::list::PropertyList;
use crate::domain::a002_property::ui::wizard::PropertyWizard;
use crate::domain::a003_agent_application::ui::list::AgentApplicationList;
use crate::layout::global_context::AppGlobalContext;
use crate::system::notifications::ui::NotificationList;
use crate::system::pages::not_found::NotFoundPage;

/// Renders the content of a tab by its key.
///
/// `tabs_store` lets wizards close their own tab when done or cancelled.
/// Unknown keys render the not-found page.
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let close = Callback::new(move |_: ()| tabs_store.close_tab(&key_for_close));

    match TabRoute::parse(key) {
        TabRoute::Users => view! { <UserList /> }.into_any(),
        TabRoute::UserNew => view! { <UserWizard on_close=close /> }.into_any(),
        TabRoute::Properties => view! { <PropertyList /> }.into_any(),
        TabRoute::PropertyNew => view! { <PropertyWizard on_close=close /> }.into_any(),
        TabRoute::PropertyEdit(id) => {
            log::debug!("Creating PropertyWizard for id {}", id);
            view! { <PropertyWizard id=id on_close=close /> }.into_any()
        }
        TabRoute::AgentApplications => view! { <AgentApplicationList /> }.into_any(),
        TabRoute::Notifications => view! { <NotificationList /> }.into_any(),
        TabRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}
