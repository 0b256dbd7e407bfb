use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NAMESPACE: &str = "properties";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    #[default]
    Apartment,
    House,
    Land,
    Commercial,
}

impl PropertyType {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Land => "Land",
            PropertyType::Commercial => "Commercial",
        }
    }

    /// Wire value, as serialized
    pub fn key(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Land => "land",
            PropertyType::Commercial => "commercial",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.key() == key)
    }

    pub fn all() -> [PropertyType; 4] {
        [
            PropertyType::Apartment,
            PropertyType::House,
            PropertyType::Land,
            PropertyType::Commercial,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    #[default]
    Draft,
    Published,
    Sold,
    Archived,
}

impl PropertyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyStatus::Draft => "Draft",
            PropertyStatus::Published => "Published",
            PropertyStatus::Sold => "Sold",
            PropertyStatus::Archived => "Archived",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyLocation {
    pub city: String,
    pub address: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub price: f64,
    pub currency: String,
    pub location: PropertyLocation,
    pub bedrooms: Option<u8>,
    pub area_sqm: Option<f64>,
    pub agent_id: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// Payload of the property wizard (`POST /api/properties`, `PUT /api/properties/<id>`).
///
/// Field names match the keys the wizard steps write, so the aggregated step
/// data deserializes straight into this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub bedrooms: Option<u8>,
    #[serde(default)]
    pub area_sqm: Option<f64>,
}

impl From<Property> for PropertyDto {
    fn from(p: Property) -> Self {
        Self {
            title: p.title,
            description: p.description,
            property_type: p.property_type,
            city: p.location.city,
            address: p.location.address,
            price: p.price,
            currency: p.currency,
            bedrooms: p.bedrooms,
            area_sqm: p.area_sqm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_type_keys_match_serde() {
        for t in PropertyType::all() {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.key()));
            assert_eq!(PropertyType::from_key(t.key()), Some(t));
        }
        assert_eq!(PropertyType::from_key("castle"), None);
    }

    #[test]
    fn test_dto_from_wizard_payload() {
        let payload = serde_json::json!({
            "title": "Loft",
            "propertyType": "house",
            "city": "Oslo",
            "address": "Storgata 1",
            "price": 250000.0,
            "currency": "EUR",
            "areaSqm": 85.5
        });
        let dto: PropertyDto = serde_json::from_value(payload).unwrap();
        assert_eq!(dto.property_type, PropertyType::House);
        assert_eq!(dto.area_sqm, Some(85.5));
        assert_eq!(dto.bedrooms, None);
    }
}
