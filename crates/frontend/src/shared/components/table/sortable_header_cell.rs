//! Sortable table header cell
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Price"
//!     field="price"
//!     sort=Signal::derive(move || state.with(|s| s.sort.clone()))
//!     on_sort=Callback::new(move |field| state.update(|s| s.toggle_sort(&field)))
//! />
//! ```

use contracts::shared::list_query::{SortDirection, SortSpec};
use leptos::prelude::*;
use thaw::*;

pub fn sort_indicator(sort: Option<&SortSpec>, field: &str) -> &'static str {
    match sort {
        Some(s) if s.field == field => match s.direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        },
        _ => " ⇅",
    }
}

pub fn sort_class(sort: Option<&SortSpec>, field: &str) -> &'static str {
    match sort {
        Some(s) if s.field == field => "table__sort-indicator table__sort-indicator--active",
        _ => "table__sort-indicator",
    }
}

#[component]
pub fn SortableHeaderCell(
    #[prop(into)] label: String,
    #[prop(into)] field: String,
    /// Column sort currently selected by the user, `None` when cleared
    #[prop(into)]
    sort: Signal<Option<SortSpec>>,
    on_sort: Callback<String>,
    #[prop(default = None)] width: Option<u32>,
) -> impl IntoView {
    let field_for_click = field.clone();
    let field_for_class = field.clone();
    let style = width
        .map(|w| format!("width: {}px;", w))
        .unwrap_or_default();

    view! {
        <TableHeaderCell attr:style=style>
            <div
                class="table__sortable-header"
                style="cursor: pointer;"
                on:click=move |_| on_sort.run(field_for_click.clone())
            >
                {label}
                <span class=move || sort.with(|s| sort_class(s.as_ref(), &field_for_class))>
                    {move || sort.with(|s| sort_indicator(s.as_ref(), &field))}
                </span>
            </div>
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        let sort = SortSpec::asc("price");
        assert_eq!(sort_indicator(Some(&sort), "price"), " ▲");
        assert_eq!(sort_indicator(Some(&SortSpec::desc("price")), "price"), " ▼");
        assert_eq!(sort_indicator(Some(&sort), "title"), " ⇅");
        assert_eq!(sort_indicator(None, "price"), " ⇅");
    }

    #[test]
    fn test_sort_class() {
        let sort = SortSpec::asc("price");
        assert!(sort_class(Some(&sort), "price").ends_with("--active"));
        assert_eq!(sort_class(None, "price"), "table__sort-indicator");
    }
}
