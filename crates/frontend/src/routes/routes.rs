use crate::layout::center::tabs::Tabs;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::sidebar::Sidebar;
use crate::layout::tabs::tab_label_for_key;
use crate::layout::Shell;
use crate::system::auth::guard::RequireAuth;
use crate::system::auth::permissions::provide_permissions;
use crate::system::notifications::ui::provide_notifications;
use leptos::prelude::*;

/// Opened when the URL names no tab
const HOME_TAB: &str = "a002_property";

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    // Restores `?active=` once, when the layout is created
    tabs_store.init_router_integration();
    if tabs_store.active.get_untracked().is_none() {
        tabs_store.open_tab(HOME_TAB, tab_label_for_key(HOME_TAB));
    }

    view! {
        <Shell
            left=|| view! { <Sidebar /> }.into_any()
            center=|| view! { <Tabs /> }.into_any()
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    provide_permissions();
    provide_notifications();

    view! {
        <RequireAuth>
            <MainLayout />
        </RequireAuth>
    }
}
