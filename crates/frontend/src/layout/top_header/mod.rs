//! TopHeader: sidebar toggle, application title, notification bell,
//! current user and sign out.

use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{sign_out, use_auth};
use crate::system::notifications::ui::{NotificationBell, APP_TITLE};

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let auth_state = use_auth();

    let is_sidebar_visible = move || ctx.left_open.get();

    let user_name = move || {
        auth_state.with(|state| {
            state
                .user_info
                .as_ref()
                .map(|u| u.full_name.clone().unwrap_or_else(|| u.email.clone()))
                .unwrap_or_else(|| "Guest".to_string())
        })
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {icon("menu")}
                </button>
                <span class="top-header__title">{APP_TITLE}</span>
            </div>

            <div class="top-header__actions">
                <NotificationBell />

                <div class="top-header__user">
                    {icon("user")}
                    <span>{user_name}</span>
                </div>

                <button
                    class="top-header__icon-btn"
                    on:click=move |_| sign_out(auth_state)
                    title="Sign out"
                >
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
