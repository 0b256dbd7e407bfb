//! Sidebar with collapsible menu groups

use contracts::domain::{a001_user, a002_property, a003_agent_application};
use contracts::shared::permission::{PermissionAction, PermissionOracle};
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use crate::system::auth::permissions::use_permissions;
use crate::system::notifications::ui::NOTIFICATIONS_KEY;

#[derive(Clone, Copy, Debug, PartialEq)]
struct MenuItem {
    key: &'static str,
    icon: &'static str,
    /// Shown only when the user may read this namespace; `None` is always shown
    namespace: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<MenuItem>,
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "catalog",
            label: "Catalog",
            icon: "home",
            items: vec![MenuItem {
                key: "a002_property",
                icon: "home",
                namespace: Some(a002_property::aggregate::NAMESPACE),
            }],
        },
        MenuGroup {
            id: "people",
            label: "People",
            icon: "users",
            items: vec![
                MenuItem {
                    key: "a001_user",
                    icon: "users",
                    namespace: Some(a001_user::aggregate::NAMESPACE),
                },
                MenuItem {
                    key: "a003_agent_application",
                    icon: "briefcase",
                    namespace: Some(a003_agent_application::aggregate::NAMESPACE),
                },
            ],
        },
        MenuGroup {
            id: "system",
            label: "System",
            icon: "bell",
            items: vec![MenuItem {
                key: NOTIFICATIONS_KEY,
                icon: "bell",
                namespace: None,
            }],
        },
    ]
}

/// Groups reduced to the items the oracle lets the user read; empty groups are dropped
fn visible_groups(groups: Vec<MenuGroup>, oracle: &dyn PermissionOracle) -> Vec<MenuGroup> {
    groups
        .into_iter()
        .filter_map(|mut group| {
            group.items.retain(|item| {
                item.namespace
                    .map(|ns| oracle.can(ns, PermissionAction::Read, None))
                    .unwrap_or(true)
            });
            (!group.items.is_empty()).then_some(group)
        })
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let permissions = use_permissions();

    let expanded_groups = RwSignal::new(
        get_menu_groups()
            .iter()
            .map(|g| g.id.to_string())
            .collect::<Vec<_>>(),
    );

    let groups = Memo::new(move |_| {
        permissions
            .grants()
            .with(|grants| visible_groups(get_menu_groups(), grants))
    });

    view! {
        <div class="app-sidebar__content">
            {move || groups.get().into_iter().map(|group| {
                let group_id = group.id.to_string();
                let group_id_for_click = group_id.clone();
                let group_id_for_exp = group_id.clone();
                let items = group.items.clone();

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = group_id_for_click.clone();
                                expanded_groups.update(move |ids| {
                                    if let Some(pos) = ids.iter().position(|x| x == &gid) {
                                        ids.remove(pos);
                                    } else {
                                        ids.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&group_id_for_exp)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&group_id)>
                            <div class="app-sidebar__children">
                                {items.clone().into_iter().map(|item| {
                                    let key = item.key;
                                    let label = tab_label_for_key(key);
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(key)
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(item.icon)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::permission::PermissionGrants;

    fn keys(groups: &[MenuGroup]) -> Vec<&'static str> {
        groups.iter().flat_map(|g| g.items.iter().map(|i| i.key)).collect()
    }

    #[test]
    fn test_menu_filtered_by_read_grants() {
        let grants = PermissionGrants::default()
            .grant(a002_property::aggregate::NAMESPACE, &[PermissionAction::Read]);
        let groups = visible_groups(get_menu_groups(), &grants);
        assert_eq!(keys(&groups), vec!["a002_property", NOTIFICATIONS_KEY]);
        assert!(groups.iter().all(|g| g.id != "people"));
    }

    #[test]
    fn test_superuser_sees_everything() {
        let groups = visible_groups(get_menu_groups(), &PermissionGrants::superuser());
        assert_eq!(groups.len(), 3);
        assert_eq!(keys(&groups).len(), 4);
    }

    #[test]
    fn test_menu_keys_have_labels() {
        for key in keys(&get_menu_groups()) {
            assert_ne!(tab_label_for_key(key), "Not found", "{}", key);
        }
    }
}
