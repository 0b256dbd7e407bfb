use contracts::shared::permission::PermissionExpr;
use leptos::prelude::*;

use super::context::use_auth;
use super::permissions::use_permissions;

/// Component that requires authentication
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth_state = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.access_token.is_some())
            fallback=move || {
                if auth_state.with(|s| s.resolved) {
                    view! { <div class="guard-message">"Not authenticated. Please sign in."</div> }.into_any()
                } else {
                    view! { <div class="guard-message">"Restoring session..."</div> }.into_any()
                }
            }
        >
            {children()}
        </Show>
    }
}

/// Renders children only when the permission expression holds.
///
/// Denial is a silent omission unless a fallback is given.
#[component]
pub fn Can(
    expr: PermissionExpr,
    #[prop(optional, into)] fallback: ViewFn,
    children: ChildrenFn,
) -> impl IntoView {
    let permissions = use_permissions();

    view! {
        <Show when=move || permissions.check(&expr) fallback=fallback.clone()>
            {children()}
        </Show>
    }
}
