//! Property wizard steps. Each step writes camelCase keys matching
//! `PropertyDto`, so the aggregated payload deserializes directly.

use contracts::domain::a002_property::aggregate::PropertyType;
use leptos::prelude::*;
use serde_json::{json, Value};
use thaw::*;

use crate::shared::form_stepper::{StepContext, StepDef, StepValidationError};

pub fn basics_payload(
    title: &str,
    description: &str,
    property_type: &str,
) -> Result<Value, StepValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StepValidationError::new("Title is required"));
    }
    let property_type = PropertyType::from_key(property_type)
        .ok_or_else(|| StepValidationError::new("Choose a property type"))?;
    let description = description.trim();

    Ok(json!({
        "title": title,
        "description": (!description.is_empty()).then_some(description),
        "propertyType": property_type.key(),
    }))
}

pub fn location_payload(city: &str, address: &str) -> Result<Value, StepValidationError> {
    let (city, address) = (city.trim(), address.trim());
    if city.is_empty() {
        return Err(StepValidationError::new("City is required"));
    }
    if address.is_empty() {
        return Err(StepValidationError::new("Address is required"));
    }
    Ok(json!({ "city": city, "address": address }))
}

pub fn pricing_payload(
    price: &str,
    currency: &str,
    bedrooms: &str,
    area_sqm: &str,
) -> Result<Value, StepValidationError> {
    let price: f64 = price
        .trim()
        .parse()
        .map_err(|_| StepValidationError::new("Price must be a number"))?;
    if price <= 0.0 {
        return Err(StepValidationError::new("Price must be positive"));
    }
    let currency = currency.trim().to_uppercase();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(StepValidationError::new("Currency must be a 3-letter code"));
    }
    let bedrooms = match bedrooms.trim() {
        "" => None,
        raw => Some(
            raw.parse::<u8>()
                .map_err(|_| StepValidationError::new("Bedrooms must be a whole number"))?,
        ),
    };
    let area_sqm = match area_sqm.trim() {
        "" => None,
        raw => Some(
            raw.parse::<f64>()
                .ok()
                .filter(|a| *a > 0.0)
                .ok_or_else(|| StepValidationError::new("Area must be a positive number"))?,
        ),
    };

    Ok(json!({
        "price": price,
        "currency": currency,
        "bedrooms": bedrooms,
        "areaSqm": area_sqm,
    }))
}

#[component]
fn BasicsStep(ctx: StepContext) -> impl IntoView {
    let title = RwSignal::new(ctx.field("title"));
    let description = RwSignal::new(ctx.field("description"));
    let property_type = RwSignal::new(match ctx.field("propertyType") {
        t if t.is_empty() => PropertyType::default().key().to_string(),
        t => t,
    });

    ctx.register_submit(move || {
        basics_payload(
            &title.get_untracked(),
            &description.get_untracked(),
            &property_type.get_untracked(),
        )
    });

    view! {
        <div class="details-form">
            <div class="form-group">
                <label>"Title"</label>
                <Input value=title placeholder="Bright two-room apartment" />
            </div>
            <div class="form-group">
                <label>"Type"</label>
                <Select value=property_type>
                    {PropertyType::all()
                        .into_iter()
                        .map(|t| view! { <option value=t.key()>{t.label()}</option> })
                        .collect_view()}
                </Select>
            </div>
            <div class="form-group">
                <label>"Description"</label>
                <Textarea value=description placeholder="Optional" />
            </div>
        </div>
    }
}

#[component]
fn LocationStep(ctx: StepContext) -> impl IntoView {
    let city = RwSignal::new(ctx.field("city"));
    let address = RwSignal::new(ctx.field("address"));

    ctx.register_submit(move || location_payload(&city.get_untracked(), &address.get_untracked()));

    view! {
        <div class="details-form">
            <div class="form-group">
                <label>"City"</label>
                <Input value=city />
            </div>
            <div class="form-group">
                <label>"Address"</label>
                <Input value=address placeholder="Street, number" />
            </div>
        </div>
    }
}

#[component]
fn PricingStep(ctx: StepContext) -> impl IntoView {
    let price = RwSignal::new(ctx.field("price"));
    let currency = RwSignal::new(match ctx.field("currency") {
        c if c.is_empty() => "EUR".to_string(),
        c => c,
    });
    let bedrooms = RwSignal::new(ctx.field("bedrooms"));
    let area_sqm = RwSignal::new(ctx.field("areaSqm"));

    ctx.register_submit(move || {
        pricing_payload(
            &price.get_untracked(),
            &currency.get_untracked(),
            &bedrooms.get_untracked(),
            &area_sqm.get_untracked(),
        )
    });

    view! {
        <div class="details-form">
            <div class="form-group">
                <label>"Price"</label>
                <Input value=price input_type=InputType::Number />
            </div>
            <div class="form-group">
                <label>"Currency"</label>
                <Input value=currency />
            </div>
            <div class="form-group">
                <label>"Bedrooms"</label>
                <Input value=bedrooms input_type=InputType::Number placeholder="Optional" />
            </div>
            <div class="form-group">
                <label>"Area, m²"</label>
                <Input value=area_sqm input_type=InputType::Number placeholder="Optional" />
            </div>
        </div>
    }
}

pub fn property_steps() -> Vec<StepDef> {
    vec![
        StepDef::new("basics", "Basics", |ctx| view! { <BasicsStep ctx=ctx /> }.into_any()),
        StepDef::new("location", "Location", |ctx| view! { <LocationStep ctx=ctx /> }.into_any()),
        StepDef::new("pricing", "Pricing", |ctx| view! { <PricingStep ctx=ctx /> }.into_any()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_property::aggregate::PropertyDto;

    #[test]
    fn test_basics_payload() {
        assert_eq!(
            basics_payload("  Loft ", "", "house").unwrap(),
            json!({"title": "Loft", "description": null, "propertyType": "house"})
        );
        assert!(basics_payload(" ", "", "house").is_err());
        assert_eq!(
            basics_payload("Loft", "", "castle").unwrap_err().to_string(),
            "Choose a property type"
        );
    }

    #[test]
    fn test_location_payload() {
        assert!(location_payload("Oslo", "").is_err());
        assert_eq!(
            location_payload(" Oslo", "Storgata 1 ").unwrap(),
            json!({"city": "Oslo", "address": "Storgata 1"})
        );
    }

    #[test]
    fn test_pricing_payload() {
        let payload = pricing_payload("250000", "eur", "", "85.5").unwrap();
        assert_eq!(
            payload,
            json!({"price": 250000.0, "currency": "EUR", "bedrooms": null, "areaSqm": 85.5})
        );
        assert!(pricing_payload("abc", "EUR", "", "").is_err());
        assert!(pricing_payload("-1", "EUR", "", "").is_err());
        assert!(pricing_payload("100", "EURO", "", "").is_err());
        assert!(pricing_payload("100", "EUR", "2.5", "").is_err());
        assert!(pricing_payload("100", "EUR", "", "0").is_err());
    }

    #[test]
    fn test_steps_aggregate_into_dto() {
        let mut merged = serde_json::Map::new();
        for payload in [
            basics_payload("Loft", "Top floor", "apartment").unwrap(),
            location_payload("Oslo", "Storgata 1").unwrap(),
            pricing_payload("250000", "EUR", "2", "").unwrap(),
        ] {
            if let Value::Object(fields) = payload {
                merged.extend(fields);
            }
        }
        let dto: PropertyDto = serde_json::from_value(Value::Object(merged)).unwrap();
        assert_eq!(dto.title, "Loft");
        assert_eq!(dto.description.as_deref(), Some("Top floor"));
        assert_eq!(dto.city, "Oslo");
        assert_eq!(dto.bedrooms, Some(2));
        assert_eq!(dto.area_sqm, None);
    }

    #[test]
    fn test_step_ids() {
        let ids: Vec<String> = property_steps().into_iter().map(|s| s.descriptor.id).collect();
        assert_eq!(ids, vec!["basics", "location", "pricing"]);
    }
}
