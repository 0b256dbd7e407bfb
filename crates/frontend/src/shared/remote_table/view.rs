use contracts::shared::list_query::{FilterClause, SortSpec};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

use super::columns::{render_columns, ColumnDef, RenderColumn, TableRow};
use super::data_source::ItemsDataSource;
use super::query_state::{FetchCoordinator, FetchTicket, TableQueryState};
use super::row_actions::{MenuEntry, RowAction, RowActionPolicy, RowMenu, RowPredicate, RowRefresh};
use super::search::SearchConfig;
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::search_input::SearchInput;
use crate::shared::components::table::sortable_header_cell::SortableHeaderCell;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::system::auth::permissions::use_permissions;

const SKELETON_ROWS: usize = 8;
const SKELETON_COLUMNS: usize = 5;

/// Paginated grid bound to an [`ItemsDataSource`].
///
/// Every change of page, page size, sort or filter produces exactly one
/// request; responses of superseded requests are dropped. `refresh_index`
/// re-requests the current page without touching the query state.
#[component]
pub fn RemoteTable<T, R>(
    /// `None` while column definitions are still being prepared (renders a skeleton)
    #[prop(into)]
    columns: Signal<Option<Vec<ColumnDef<R>>>>,
    map_item: Callback<T, R>,
    data_source: Arc<dyn ItemsDataSource<T>>,
    /// Permission namespace of the resource
    #[prop(into)]
    namespace: String,
    #[prop(optional)] row_actions: Vec<RowAction<T>>,
    #[prop(optional)] show_edit: Option<RowPredicate<T>>,
    #[prop(optional)] show_delete: Option<RowPredicate<T>>,
    #[prop(optional)] show_lock: bool,
    /// Edit entry is offered only when a handler is given
    #[prop(optional)]
    on_edit: Option<Callback<String>>,
    #[prop(optional)] search: Option<SearchConfig>,
    #[prop(optional)] initial_sort: Option<SortSpec>,
    #[prop(optional)] initial_filter: Option<FilterClause>,
    /// Caller-driven filter; a change replaces the current filter clause
    #[prop(optional, into)]
    filter: Option<Signal<Option<FilterClause>>>,
    #[prop(optional)] page_size: Option<usize>,
    #[prop(optional, into)] refresh_index: Option<Signal<u32>>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    R: TableRow,
{
    let table_config = &config().table;
    let page_size_options = table_config.page_size_options.clone();
    let permissions = use_permissions();

    let query = RwSignal::new(TableQueryState::new(
        page_size.unwrap_or(table_config.default_page_size),
        initial_sort,
        initial_filter,
    ));
    let coordinator = StoredValue::new(FetchCoordinator::new());
    let source = StoredValue::new(data_source);
    let rows = RwSignal::new(Vec::<(R, T)>::new());
    let total_items = RwSignal::new(0u64);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let never: RowPredicate<T> = Arc::new(|_, _| false);
    let policy = StoredValue::new(RowActionPolicy {
        namespace,
        actions: row_actions,
        show_edit: if on_edit.is_some() { show_edit } else { Some(never) },
        show_delete,
        show_lock,
    });

    let run_fetch = move |ticket: FetchTicket| {
        let source = source.get_value();
        loading.set(true);
        spawn_local(async move {
            let result = source.list(&ticket.query).await;
            if !coordinator.with_value(|c| c.accepts(ticket.seq)) {
                log::debug!("dropping stale page response #{}", ticket.seq);
                return;
            }
            match result {
                Ok(response) => {
                    total_items.set(response.pagination_meta.total_items);
                    rows.set(
                        response
                            .items
                            .into_iter()
                            .map(|item| (map_item.run(item.clone()), item))
                            .collect(),
                    );
                    error.set(None);
                }
                Err(e) => {
                    log::error!("page request #{} failed: {}", ticket.seq, e);
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    let refresh_rows = move || {
        let current = query.with_untracked(|s| s.to_list_query());
        if let Some(ticket) = coordinator.try_update_value(|c| c.force(current)) {
            run_fetch(ticket);
        }
    };

    Effect::new(move |_| {
        let current = query.with(|s| s.to_list_query());
        if let Some(ticket) = coordinator.try_update_value(|c| c.request(current)).flatten() {
            run_fetch(ticket);
        }
    });

    if let Some(refresh_index) = refresh_index {
        Effect::new(move |previous: Option<u32>| {
            let current = refresh_index.get();
            if previous.is_some_and(|p| p != current) {
                refresh_rows();
            }
            current
        });
    }

    if let Some(filter) = filter {
        Effect::new(move |initialized: Option<()>| {
            let clause = filter.get();
            if initialized.is_some() {
                query.update(|s| s.set_filter(clause));
            }
        });
    }

    let menus = Memo::new(move |_| {
        let grants = permissions.grants().get();
        rows.with(|rows| {
            policy.with_value(|p| {
                rows.iter()
                    .map(|(row, item)| p.resolve(&row.id(), item, &grants))
                    .collect::<Vec<RowMenu>>()
            })
        })
    });

    let pending_delete = RwSignal::new(None::<String>);
    let confirm_open = RwSignal::new(false);
    let confirm_delete = Callback::new(move |_| {
        let Some(id) = pending_delete.get_untracked() else {
            return;
        };
        pending_delete.set(None);
        let source = source.get_value();
        spawn_local(async move {
            match source.delete_one(&id).await {
                Ok(response) if response.success => {
                    log::info!("deleted {}", id);
                    refresh_rows();
                }
                Ok(_) => error.set(Some(format!("Could not delete {}", id))),
                Err(e) => {
                    log::error!("delete {} failed: {}", id, e);
                    error.set(Some(e.to_string()));
                }
            }
        });
    });

    let on_sort = Callback::new(move |field: String| query.update(|s| s.toggle_sort(&field)));
    let sort = Signal::derive(move || query.with(|s| s.sort.clone()));

    let menu_items = move |entries: Vec<MenuEntry>, id: String, item: T| -> Vec<MenuItem> {
        let refresh = RowRefresh::new(refresh_rows);
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                MenuEntry::Custom(index) => {
                    let action = policy.with_value(|p| p.action(index).cloned())?;
                    let id = id.clone();
                    let item = item.clone();
                    let refresh = refresh.clone();
                    Some(MenuItem {
                        label: action.label.clone(),
                        icon: action.icon,
                        danger: false,
                        on_select: Callback::new(move |_| action.run(&id, &item, refresh.clone())),
                    })
                }
                MenuEntry::Edit => {
                    let on_edit = on_edit?;
                    let id = id.clone();
                    Some(MenuItem {
                        label: "Edit".to_string(),
                        icon: "edit",
                        danger: false,
                        on_select: Callback::new(move |_| on_edit.run(id.clone())),
                    })
                }
                MenuEntry::Delete => {
                    let id = id.clone();
                    Some(MenuItem {
                        label: "Delete".to_string(),
                        icon: "delete",
                        danger: true,
                        on_select: Callback::new(move |_| {
                            pending_delete.set(Some(id.clone()));
                            confirm_open.set(true);
                        }),
                    })
                }
            })
            .collect()
    };

    let grid = move || {
        let Some(base) = columns.get() else {
            return skeleton_grid().into_any();
        };
        let menus = menus.get();
        let render = render_columns(&base, &menus);
        let column_count = render.len();

        let header = render
            .iter()
            .map(|column| match column {
                RenderColumn::Data(def) if def.sortable => view! {
                    <SortableHeaderCell
                        label=def.header.clone()
                        field=def.field.clone()
                        sort=sort
                        on_sort=on_sort
                        width=def.width
                    />
                }
                .into_any(),
                RenderColumn::Data(def) => {
                    let header = def.header.clone();
                    view! { <TableHeaderCell>{header}</TableHeaderCell> }.into_any()
                }
                RenderColumn::Actions => view! {
                    <TableHeaderCell attr:style="width: 80px; text-align: center;">"Actions"</TableHeaderCell>
                }
                .into_any(),
            })
            .collect_view();

        let body = rows.with(|rows| {
            if rows.is_empty() {
                return view! {
                    <TableRow>
                        <TableCell attr:colspan=column_count.to_string() attr:style="padding: 40px; text-align: center;">
                            {move || if loading.get() { "Loading..." } else { "No records" }}
                        </TableCell>
                    </TableRow>
                }
                .into_any();
            }

            rows.iter()
                .zip(menus.iter())
                .map(|((row, item), menu)| {
                    let cells = render
                        .iter()
                        .map(|column| match column {
                            RenderColumn::Data(def) => {
                                let content = match &def.render {
                                    Some(render_cell) => render_cell(row),
                                    None => view! { <span>{row.cell(&def.field)}</span> }.into_any(),
                                };
                                view! {
                                    <TableCell>
                                        <TableCellLayout>{content}</TableCellLayout>
                                    </TableCell>
                                }
                                .into_any()
                            }
                            RenderColumn::Actions => {
                                let content = match menu {
                                    RowMenu::Actions(entries) => {
                                        let items = menu_items(entries.clone(), row.id(), item.clone());
                                        view! { <RowActionMenu items=items /> }.into_any()
                                    }
                                    RowMenu::Locked => view! {
                                        <span class="row-lock" title="Locked">{icon("lock")}</span>
                                    }
                                    .into_any(),
                                    RowMenu::Hidden => ().into_any(),
                                };
                                view! {
                                    <TableCell attr:style="text-align: center;">{content}</TableCell>
                                }
                                .into_any()
                            }
                        })
                        .collect_view();
                    view! { <TableRow>{cells}</TableRow> }
                })
                .collect_view()
                .into_any()
        });

        view! {
            <Table>
                <TableHeader>
                    <TableRow>{header}</TableRow>
                </TableHeader>
                <TableBody>{body}</TableBody>
            </Table>
        }
        .into_any()
    };

    let total_pages = Signal::derive(move || {
        let page_size = query.with(|s| s.page_size).max(1) as u64;
        total_items.get().div_ceil(page_size) as usize
    });

    view! {
        <div class="remote-table">
            {search.map(|config| view! {
                <div class="remote-table__toolbar">
                    <SearchInput
                        config=config
                        on_filter=Callback::new(move |clause| query.update(|s| s.set_filter(clause)))
                    />
                </div>
            })}

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            {grid}

            <PaginationControls
                current_page=Signal::derive(move || query.with(|s| s.page))
                total_pages=total_pages
                total_count=Signal::derive(move || total_items.get() as usize)
                page_size=Signal::derive(move || query.with(|s| s.page_size))
                on_page_change=Callback::new(move |page| query.update(|s| s.set_page(page)))
                on_page_size_change=Callback::new(move |size| query.update(|s| s.set_page_size(size)))
                page_size_options=page_size_options
            />

            <ConfirmDialog
                open=confirm_open
                title="Delete record"
                message=Signal::derive(move || {
                    pending_delete
                        .get()
                        .map(|id| format!("Delete record #{}? This cannot be undone.", id))
                        .unwrap_or_default()
                })
                on_confirm=confirm_delete
            />
        </div>
    }
}

#[derive(Clone)]
struct MenuItem {
    label: String,
    icon: &'static str,
    danger: bool,
    on_select: Callback<()>,
}

#[component]
fn RowActionMenu(items: Vec<MenuItem>) -> impl IntoView {
    let open = RwSignal::new(false);

    view! {
        <div class="row-menu">
            <Button
                appearance=ButtonAppearance::Transparent
                size=ButtonSize::Small
                on_click=move |_| open.update(|v| *v = !*v)
            >
                {icon("more")}
            </Button>
            <Show when=move || open.get()>
                <div class="row-menu__popup" on:mouseleave=move |_| open.set(false)>
                    {items
                        .clone()
                        .into_iter()
                        .map(|item| {
                            let on_select = item.on_select;
                            view! {
                                <button
                                    class="row-menu__item"
                                    class:row-menu__item--danger=item.danger
                                    on:click=move |_| {
                                        open.set(false);
                                        on_select.run(());
                                    }
                                >
                                    {icon(item.icon)}
                                    <span>{item.label}</span>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

fn skeleton_grid() -> impl IntoView {
    view! {
        <div class="remote-table__skeleton" aria-busy="true">
            {(0..SKELETON_ROWS)
                .map(|_| view! {
                    <div class="skeleton-row">
                        {(0..SKELETON_COLUMNS)
                            .map(|_| view! { <div class="skeleton-cell"></div> })
                            .collect_view()}
                    </div>
                })
                .collect_view()}
        </div>
    }
}
