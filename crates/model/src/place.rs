use std::collections::BTreeMap;

use serde::Deserialize;
use uuid::Uuid;

/// A place record as returned by the upstream text-search service.
/// Immutable once fetched; apart from the identity everything is optional,
/// absent nested structures must never make processing fail.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Place {
    pub id: String,
    pub display_name: Option<LocalizedText>,
    pub formatted_address: Option<String>,
    pub international_phone_number: Option<String>,
    pub location: Option<LatLng>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<i32>,
    pub current_opening_hours: Option<OpeningHours>,
    pub restroom: Option<bool>,
    pub accessibility_options: Option<AccessibilityOptions>,
    /// Flag names are camelCase provider keys (`acceptsCreditCards`, …).
    pub payment_options: Option<BTreeMap<String, bool>>,
    pub google_maps_uri: Option<String>,
    pub website_uri: Option<String>,
    pub generative_summary: Option<GenerativeSummary>,
    pub good_for_children: Option<bool>,
    pub types: Vec<String>,
    /// Raw review payload, stored verbatim.
    pub reviews: Option<serde_json::Value>,
    /// Charging-station specifics, kept as raw provider payloads.
    pub fuel_options: Option<serde_json::Value>,
    pub charge_options: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocalizedText {
    pub text: String,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OpeningHours {
    pub weekday_descriptions: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilityOptions {
    pub wheelchair_accessible_parking: Option<bool>,
    pub wheelchair_accessible_restroom: Option<bool>,
    pub wheelchair_accessible_entrance: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerativeSummary {
    pub overview: Option<LocalizedText>,
}

/// The normalized row persisted into one category table.
///
/// `id` is the upstream identity and primary key, `slug` is derived from
/// the display name and unique within its table. `categories` is only
/// populated for tables which accumulate several facets of one place.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub international_phone_number: Option<String>,
    pub address: Option<String>,
    pub opening_hours: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<i32>,
    pub restroom: Option<bool>,
    pub wheelchair_accessible_parking: Option<bool>,
    pub wheelchair_accessible_restroom: Option<bool>,
    pub wheelchair_accessible_entrance: Option<bool>,
    pub google_maps_uri: Option<String>,
    pub website_uri: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: Option<String>,
    pub good_for_children: Option<bool>,
    pub services: Vec<String>,
    pub payment_options: Vec<String>,
    pub reviews: Option<serde_json::Value>,
    pub fuel_options: Option<serde_json::Value>,
    pub charge_options: Option<serde_json::Value>,
    pub categories: Option<Vec<String>>,
    pub city_id: Uuid,
    pub country_id: i32,
}

/// The slice of a stored row the description backfill works with.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<i32>,
    pub services: Vec<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_deserializes_with_absent_nested_structures() {
        let place: Place = serde_json::from_str(
            r#"{ "id": "p1", "displayName": { "text": "Acme" } }"#,
        )
        .unwrap();
        assert_eq!(place.id, "p1");
        assert_eq!(place.display_name.unwrap().text, "Acme");
        assert!(place.accessibility_options.is_none());
        assert!(place.types.is_empty());
    }

    #[test]
    fn charging_payloads_are_kept_verbatim() {
        let place: Place = serde_json::from_str(
            r#"{
                "id": "p1",
                "goodForChildren": true,
                "fuelOptions": { "fuelPrices": [] },
                "chargeOptions": { "connectorCount": 4 }
            }"#,
        )
        .unwrap();
        assert_eq!(place.good_for_children, Some(true));
        assert!(place.fuel_options.is_some());
        assert_eq!(place.charge_options.unwrap()["connectorCount"], 4);
    }

    #[test]
    fn place_without_id_deserializes_to_empty_identity() {
        let place: Place = serde_json::from_str(r#"{ "rating": 4.5 }"#).unwrap();
        assert!(place.id.is_empty());
        assert_eq!(place.rating, Some(4.5));
    }
}
