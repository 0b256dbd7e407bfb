//! Search box with field selector and debounce.
//!
//! Each keystroke replaces the pending timer (dropping a `Timeout` cancels it),
//! and a fired timer is checked against the search generation before it emits.

use crate::shared::icons::icon;
use crate::shared::remote_table::search::{SearchBox, SearchConfig};
use contracts::shared::list_query::FilterClause;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

#[component]
pub fn SearchInput(
    config: SearchConfig,
    /// Settled filter; `None` clears it
    on_filter: Callback<Option<FilterClause>>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let placeholder = placeholder.unwrap_or_else(|| "Search...".to_string());
    let debounce_ms = config.debounce_ms;
    let fields = config.fields.clone();
    let show_field_select = fields.len() > 1;

    let search = StoredValue::new(SearchBox::new(&config));
    let pending = StoredValue::new_local(None::<Timeout>);
    let (input_value, set_input_value) = signal(String::new());
    let (selected_field, set_selected_field) = signal(search.with_value(|s| s.field().to_string()));

    let schedule = move |generation: u64| {
        let timer = Timeout::new(debounce_ms, move || {
            if let Some(filter) = search.with_value(|s| s.settle(generation)) {
                log::debug!("search settled: {:?}", filter);
                on_filter.run(filter);
            }
        });
        // replacing the previous timer drops and cancels it
        pending.set_value(Some(timer));
    };

    let on_input = move |ev| {
        let text = event_target_value(&ev);
        set_input_value.set(text.clone());
        let generation = search.try_update_value(|s| s.input(text)).unwrap_or_default();
        schedule(generation);
    };

    let on_field_change = move |ev| {
        let field = event_target_value(&ev);
        set_selected_field.set(field.clone());
        let generation = search
            .try_update_value(|s| s.select_field(field))
            .unwrap_or_default();
        schedule(generation);
    };

    let clear = move |_| {
        set_input_value.set(String::new());
        let generation = search.try_update_value(|s| s.clear()).unwrap_or_default();
        schedule(generation);
    };

    view! {
        <div class="search-input">
            {show_field_select.then(|| view! {
                <select
                    class="search-input__field"
                    on:change=on_field_change
                    prop:value=move || selected_field.get()
                >
                    {fields
                        .into_iter()
                        .map(|f| view! { <option value=f.field.clone()>{f.label}</option> })
                        .collect_view()}
                </select>
            })}
            <span class="search-input__icon">{icon("search")}</span>
            <input
                type="text"
                class="search-input__text"
                placeholder=placeholder
                class:search-input__text--active=move || !input_value.get().trim().is_empty()
                prop:value=move || input_value.get()
                on:input=on_input
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Clear">
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}
