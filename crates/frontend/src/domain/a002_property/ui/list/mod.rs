use contracts::domain::a002_property::aggregate::{Property, PropertyStatus, NAMESPACE};
use contracts::shared::permission::{PermissionAction, PermissionExpr};
use leptos::prelude::*;
use thaw::*;

use crate::domain::a002_property::model;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::property_edit_key;
use crate::shared::format::{format_area, format_date, format_price};
use crate::shared::icons::icon;
use crate::shared::remote_table::{ColumnDef, RemoteTable, SearchConfig, SearchField, TableRow};
use crate::system::auth::guard::Can;

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRow {
    pub id: u64,
    pub title: String,
    pub property_type: String,
    pub status: PropertyStatus,
    pub city: String,
    pub price: String,
    pub area: String,
    pub created_at: String,
}

impl From<Property> for PropertyRow {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            title: p.title,
            property_type: p.property_type.label().to_string(),
            status: p.status,
            city: p.location.city,
            price: format_price(p.price, &p.currency),
            area: p.area_sqm.map(format_area).unwrap_or_default(),
            created_at: format_date(&p.created_at),
        }
    }
}

impl TableRow for PropertyRow {
    fn id(&self) -> String {
        self.id.to_string()
    }

    fn cell(&self, field: &str) -> String {
        match field {
            "id" => self.id.to_string(),
            "title" => self.title.clone(),
            "propertyType" => self.property_type.clone(),
            "status" => self.status.label().to_string(),
            "city" => self.city.clone(),
            "price" => self.price.clone(),
            "areaSqm" => self.area.clone(),
            "createdAt" => self.created_at.clone(),
            _ => String::new(),
        }
    }
}

fn status_color(status: PropertyStatus) -> BadgeColor {
    match status {
        PropertyStatus::Draft => BadgeColor::Subtle,
        PropertyStatus::Published => BadgeColor::Success,
        PropertyStatus::Sold => BadgeColor::Brand,
        PropertyStatus::Archived => BadgeColor::Warning,
    }
}

fn columns() -> Vec<ColumnDef<PropertyRow>> {
    vec![
        ColumnDef::new("id", "ID").width(80),
        ColumnDef::new("title", "Title"),
        ColumnDef::new("propertyType", "Type").width(120),
        ColumnDef::new("city", "City").width(140),
        ColumnDef::new("price", "Price").width(140),
        ColumnDef::new("areaSqm", "Area").width(100),
        ColumnDef::new("status", "Status").width(110).render(|row: &PropertyRow| {
            let status = row.status;
            view! {
                <Badge appearance=BadgeAppearance::Tint color=status_color(status)>
                    {status.label()}
                </Badge>
            }
            .into_any()
        }),
        ColumnDef::new("createdAt", "Created").width(110),
    ]
}

#[component]
pub fn PropertyList() -> impl IntoView {
    let tabs_store = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let refresh_index = RwSignal::new(0u32);

    let search = SearchConfig::new(vec![
        SearchField::new("title", "Title"),
        SearchField::new("city", "City"),
        SearchField::new("id", "ID"),
    ]);

    let open_new = move |_| tabs_store.open_tab("a002_property_new", "New property");
    let on_edit = Callback::new(move |id: String| {
        match id.parse::<u64>() {
            Ok(id) => tabs_store.open_tab(&property_edit_key(id), &format!("Property #{}", id)),
            Err(_) => log::warn!("Property id is not numeric: {}", id),
        }
    });

    view! {
        <div class="property-list" style="padding: 20px;">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 16px;">
                <h2 style="margin: 0;">"Properties"</h2>
                <Space>
                    <Can expr=PermissionExpr::leaf(NAMESPACE, PermissionAction::Create)>
                        <Button appearance=ButtonAppearance::Primary on_click=open_new>
                            {icon("plus")}
                            " New property"
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
                map_item=Callback::new(PropertyRow::from)
                data_source=model::data_source()
                namespace=NAMESPACE
                on_edit=on_edit
                show_lock=true
                search=search
                refresh_index=refresh_index
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use contracts::domain::a002_property::aggregate::{PropertyLocation, PropertyType};

    fn property() -> Property {
        Property {
            id: 12,
            title: "Harbour view loft".into(),
            description: None,
            property_type: PropertyType::Apartment,
            status: PropertyStatus::Published,
            price: 450000.0,
            currency: "EUR".into(),
            location: PropertyLocation {
                city: "Bergen".into(),
                address: "Bryggen 3".into(),
                ..Default::default()
            },
            bedrooms: Some(2),
            area_sqm: Some(74.0),
            agent_id: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_row_cells() {
        let row = PropertyRow::from(property());
        assert_eq!(row.id(), "12");
        assert_eq!(row.cell("price"), "450 000 EUR");
        assert_eq!(row.cell("areaSqm"), "74 m²");
        assert_eq!(row.cell("propertyType"), "Apartment");
        assert_eq!(row.cell("createdAt"), "02.05.2024");
        assert_eq!(row.cell("unknown"), "");
    }

    #[test]
    fn test_columns_cover_row_fields() {
        let row = PropertyRow::from(property());
        for column in columns() {
            if column.render.is_none() {
                assert!(!row.cell(&column.field).is_empty(), "{}", column.field);
            }
        }
    }
}
