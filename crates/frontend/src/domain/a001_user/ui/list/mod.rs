use contracts::domain::a001_user::aggregate::{User, NAMESPACE};
use contracts::shared::list_query::{FilterClause, FilterOperator};
use contracts::shared::permission::{PermissionAction, PermissionExpr};
use leptos::prelude::*;
use thaw::*;

use crate::domain::a001_user::model;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::format::format_date;
use crate::shared::icons::icon;
use crate::shared::remote_table::{ColumnDef, RemoteTable, SearchConfig, SearchField, TableRow};
use crate::system::auth::guard::Can;

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: u64,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<User> for UserRow {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name(),
            email: u.email,
            phone: u.phone.unwrap_or_default(),
            role: u.role.label().to_string(),
            is_active: u.is_active,
            created_at: format_date(&u.created_at),
        }
    }
}

impl TableRow for UserRow {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, field: &str) -> String {
        match field {
            "id" => self.id.to_string(),
            "email" => self.email.clone(),
            "lastName" => self.full_name.clone(),
            "phone" => self.phone.clone(),
            "role" => self.role.clone(),
            "isActive" => if self.is_active { "Active" } else { "Blocked" }.to_string(),
            "createdAt" => self.created_at.clone(),
            _ => String::new(),
        }
    }
}

fn columns() -> Vec<ColumnDef<UserRow>> {
    vec![
        ColumnDef::new("id", "ID").width(80),
        ColumnDef::new("email", "Email"),
        ColumnDef::new("lastName", "Name"),
        ColumnDef::new("phone", "Phone").width(150).unsortable(),
        ColumnDef::new("role", "Role").width(130),
        ColumnDef::new("isActive", "Status").width(100).render(|row: &UserRow| {
            let (label, color) = if row.is_active {
                ("Active", BadgeColor::Success)
            } else {
                ("Blocked", BadgeColor::Danger)
            };
            view! { <Badge appearance=BadgeAppearance::Tint color=color>{label}</Badge> }.into_any()
        }),
        ColumnDef::new("createdAt", "Registered").width(110),
    ]
}

/// Agents only, used by the "Agents" filter toggle
pub fn agents_filter() -> FilterClause {
    FilterClause::new("role", FilterOperator::Equals, "agent")
}

#[component]
pub fn UserList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let refresh_index = RwSignal::new(0u32);
    let agents_only = RwSignal::new(false);
    let role_filter = Signal::derive(move || agents_only.get().then(agents_filter));

    let search = SearchConfig::new(vec![
        SearchField::new("email", "Email"),
        SearchField::new("lastName", "Last name"),
        SearchField::new("id", "ID"),
    ]);

    view! {
        <div class="user-list" style="padding: 20px;">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 16px;">
                <h2 style="margin: 0;">"Users"</h2>
                <Space>
                    <Button
                        appearance=Signal::derive(move || {
                            if agents_only.get() { ButtonAppearance::Primary } else { ButtonAppearance::Subtle }
                        })
                        on_click=move |_| agents_only.update(|v| *v = !*v)
                    >
                        {icon("briefcase")}
                        " Agents"
                    </Button>
                    <Can expr=PermissionExpr::leaf(NAMESPACE, PermissionAction::Create)>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| tabs_store.open_tab("a001_user_new", "New user")
                        >
                            {icon("plus")}
                            " New user"
                        </Button>
                    </Can>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| refresh_index.update(|i| *i += 1)
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </Space>
            </Flex>

            <RemoteTable
                columns=Some(columns())
                map_item=Callback::new(UserRow::from)
                data_source=model::data_source()
                namespace=NAMESPACE
                show_lock=true
                search=search
                filter=role_filter
                refresh_index=refresh_index
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use contracts::domain::a001_user::aggregate::UserRole;

    #[test]
    fn test_row_from_user() {
        let row = UserRow::from(User {
            id: 3,
            email: "ann@example.com".into(),
            first_name: "Ann".into(),
            last_name: "Berg".into(),
            phone: None,
            role: UserRole::Agent,
            is_active: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 9, 0, 0, 0).unwrap(),
        });
        assert_eq!(row.cell("lastName"), "Ann Berg");
        assert_eq!(row.cell("role"), "Agent");
        assert_eq!(row.cell("isActive"), "Blocked");
        assert_eq!(row.cell("phone"), "");
        assert_eq!(row.cell("createdAt"), "09.01.2024");
    }

    #[test]
    fn test_agents_filter() {
        let filter = agents_filter();
        assert_eq!(filter.field, "role");
        assert_eq!(filter.operator, FilterOperator::Equals);
        assert_eq!(filter.value, "agent");
    }
}
