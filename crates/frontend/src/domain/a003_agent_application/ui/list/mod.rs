use contracts::domain::a003_agent_application::aggregate::{
    AgentApplication, ApplicationStatus, ReviewDecision, NAMESPACE,
};
use contracts::shared::list_query::{FilterClause, FilterOperator, SortSpec};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

use crate::domain::a003_agent_application::model;
use crate::shared::format::format_datetime;
use crate::shared::icons::icon;
use crate::shared::remote_table::{
    ColumnDef, RemoteTable, RowAction, RowPredicate, SearchConfig, SearchField, TableRow,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationRow {
    pub id: u64,
    pub full_name: String,
    pub email: String,
    pub license_number: String,
    pub status: ApplicationStatus,
    pub submitted_at: String,
}

impl From<AgentApplication> for ApplicationRow {
    fn from(a: AgentApplication) -> Self {
        Self {
            id: a.id,
            full_name: a.full_name,
            email: a.email,
            license_number: a.license_number.unwrap_or_else(|| "-".to_string()),
            status: a.status,
            submitted_at: format_datetime(&a.submitted_at),
        }
    }
}

impl TableRow for ApplicationRow {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, field: &str) -> String {
        match field {
            "id" => self.id.to_string(),
            "fullName" => self.full_name.clone(),
            "email" => self.email.clone(),
            "licenseNumber" => self.license_number.clone(),
            "status" => self.status.label().to_string(),
            "submittedAt" => self.submitted_at.clone(),
            _ => String::new(),
        }
    }
}

fn columns() -> Vec<ColumnDef<ApplicationRow>> {
    vec![
        ColumnDef::new("id", "ID").width(80),
        ColumnDef::new("fullName", "Applicant"),
        ColumnDef::new("email", "Email"),
        ColumnDef::new("licenseNumber", "License").width(140).unsortable(),
        ColumnDef::new("status", "Status").width(110).render(|row: &ApplicationRow| {
            let color = match row.status {
                ApplicationStatus::Pending => BadgeColor::Warning,
                ApplicationStatus::Approved => BadgeColor::Success,
                ApplicationStatus::Rejected => BadgeColor::Danger,
            };
            let label = row.status.label();
            view! {
                <Badge appearance=BadgeAppearance::Tint color=color>{label}</Badge>
            }
            .into_any()
        }),
        ColumnDef::new("submittedAt", "Submitted").width(150),
    ]
}

/// Approve / reject, offered while the application is pending
pub fn review_action(decision: ReviewDecision) -> RowAction<AgentApplication> {
    let (label, icon) = match decision {
        ReviewDecision::Approve => ("Approve", "check"),
        ReviewDecision::Reject => ("Reject", "x"),
    };
    RowAction::new(decision.path_segment(), label, icon, move |id, _: &AgentApplication, refresh| {
        let id = id.to_string();
        spawn_local(async move {
            match model::review(&id, decision).await {
                Ok(()) => {
                    log::info!("Application {} {}", id, decision.path_segment());
                    refresh.run();
                }
                Err(e) => log::error!("Review of application {} failed: {}", id, e),
            }
        });
    })
    .enabled_when(|_, application| application.is_pending())
}

pub fn pending_filter() -> FilterClause {
    FilterClause::new("status", FilterOperator::Equals, "pending")
}

#[component]
pub fn AgentApplicationList() -> impl IntoView {
    let refresh_index = RwSignal::new(0u32);
    let never_delete: RowPredicate<AgentApplication> = Arc::new(|_, _| false);

    let search = SearchConfig::new(vec![
        SearchField::new("email", "Email"),
        SearchField::new("fullName", "Applicant"),
        SearchField::new("id", "ID"),
    ]);

    view! {
        <div class="agent-application-list" style="padding: 20px;">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 16px;">
                <h2 style="margin: 0;">"Agent applications"</h2>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| refresh_index.update(|i| *i += 1)
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </Flex>

            <RemoteTable
                columns=Some(columns())
                map_item=Callback::new(ApplicationRow::from)
                data_source=model::data_source()
                namespace=NAMESPACE
                row_actions=vec![
                    review_action(ReviewDecision::Approve),
                    review_action(ReviewDecision::Reject),
                ]
                show_delete=never_delete
                show_lock=true
                search=search
                initial_sort=SortSpec::desc("submittedAt")
                initial_filter=pending_filter()
                refresh_index=refresh_index
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use contracts::shared::permission::{PermissionAction, PermissionGrants};
    use crate::shared::remote_table::row_actions::{MenuEntry, RowActionPolicy, RowMenu};

    fn application(status: ApplicationStatus) -> AgentApplication {
        AgentApplication {
            id: 5,
            user_id: 40,
            full_name: "Ola Nordmann".into(),
            email: "ola@example.com".into(),
            license_number: None,
            status,
            submitted_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap(),
        }
    }

    fn policy() -> RowActionPolicy<AgentApplication> {
        let mut policy = RowActionPolicy::new(NAMESPACE);
        policy.actions = vec![
            review_action(ReviewDecision::Approve),
            review_action(ReviewDecision::Reject),
        ];
        policy.show_edit = Some(Arc::new(|_, _| false));
        policy.show_delete = Some(Arc::new(|_, _| false));
        policy.show_lock = true;
        policy
    }

    #[test]
    fn test_review_actions_only_for_pending() {
        let reviewer = PermissionGrants::default().grant(NAMESPACE, &[PermissionAction::Update]);
        let pending = policy().resolve("5", &application(ApplicationStatus::Pending), &reviewer);
        assert_eq!(
            pending,
            RowMenu::Actions(vec![MenuEntry::Custom(0), MenuEntry::Custom(1)])
        );
        let decided = policy().resolve("5", &application(ApplicationStatus::Approved), &reviewer);
        assert_eq!(decided, RowMenu::Locked);
    }

    #[test]
    fn test_reviewer_without_grants_sees_lock() {
        let viewer = PermissionGrants::default().grant(NAMESPACE, &[PermissionAction::Read]);
        let menu = policy().resolve("5", &application(ApplicationStatus::Pending), &viewer);
        assert_eq!(menu, RowMenu::Locked);
    }

    #[test]
    fn test_row_cells() {
        let row = ApplicationRow::from(application(ApplicationStatus::Pending));
        assert_eq!(row.cell("licenseNumber"), "-");
        assert_eq!(row.cell("status"), "Pending");
        assert_eq!(row.cell("submittedAt"), "01.06.2024 12:30");
    }
}
