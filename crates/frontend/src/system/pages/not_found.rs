use leptos::prelude::*;
use thaw::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;

/// Shown for unknown tab keys and for wizards whose active step no longer exists
#[component]
pub fn NotFoundPage() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="not-found" style="padding: 40px; text-align: center;">
            <h2>"Page not found"</h2>
            <p>"The page you were looking for does not exist or is no longer available."</p>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| tabs_store.open_tab("a002_property", "Properties")
            >
                {icon("home")}
                " Back to properties"
            </Button>
        </div>
    }
}
