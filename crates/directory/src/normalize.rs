use log::debug;
use model::{
    place::{Place, PlaceRecord},
    region::{City, Country},
};
use utility::{slug::slugify, text::camel_to_title_case};

use crate::category::CategoryConfig;

/// Upstream types that say nothing about what a place actually offers.
const GENERIC_TYPES: &[&str] = &["point_of_interest", "establishment"];

/// Maps one upstream place into a candidate row for the configured
/// category table.
///
/// Returns `None` when the upstream record carries no id or display name,
/// or when the derived slug comes out empty. Such records are silently
/// skipped, never persisted and never an error. Absent nested upstream
/// structures map to `None` values, never a failure.
pub fn normalize(
    place: &Place,
    config: &CategoryConfig,
    country: &Country,
    city: &City,
) -> Option<PlaceRecord> {
    let name = place
        .display_name
        .as_ref()
        .map(|display_name| display_name.text.trim())
        .unwrap_or_default();
    if place.id.is_empty() || name.is_empty() {
        debug!("skipping upstream record without id or display name");
        return None;
    }

    let slug = slugify(name);
    if slug.is_empty() {
        debug!("skipping '{name}': name normalizes to an empty slug");
        return None;
    }

    let accessibility = place.accessibility_options.as_ref();
    let payment_options = place
        .payment_options
        .as_ref()
        .map(|flags| {
            flags
                .iter()
                .filter(|(_, enabled)| **enabled)
                .map(|(key, _)| camel_to_title_case(key))
                .collect()
        })
        .unwrap_or_default();

    Some(PlaceRecord {
        id: place.id.clone(),
        name: name.to_owned(),
        slug,
        international_phone_number: place.international_phone_number.clone(),
        address: place.formatted_address.clone(),
        opening_hours: place
            .current_opening_hours
            .as_ref()
            .map(|hours| hours.weekday_descriptions.clone()),
        rating: place.rating,
        user_rating_count: place.user_rating_count,
        restroom: place.restroom,
        wheelchair_accessible_parking: accessibility
            .and_then(|options| options.wheelchair_accessible_parking),
        wheelchair_accessible_restroom: accessibility
            .and_then(|options| options.wheelchair_accessible_restroom),
        wheelchair_accessible_entrance: accessibility
            .and_then(|options| options.wheelchair_accessible_entrance),
        google_maps_uri: place.google_maps_uri.clone(),
        website_uri: place.website_uri.clone(),
        latitude: place.location.as_ref().map(|location| location.latitude),
        longitude: place.location.as_ref().map(|location| location.longitude),
        description: place
            .generative_summary
            .as_ref()
            .and_then(|summary| summary.overview.as_ref())
            .map(|overview| overview.text.clone()),
        good_for_children: place.good_for_children,
        services: place
            .types
            .iter()
            .filter(|kind| !GENERIC_TYPES.contains(&kind.as_str()))
            .cloned()
            .collect(),
        payment_options,
        reviews: place.reviews.clone(),
        fuel_options: place.fuel_options.clone(),
        charge_options: place.charge_options.clone(),
        categories: config
            .multi_category
            .then(|| vec![config.slug.to_owned()]),
        city_id: city.id,
        country_id: country.id,
    })
}

#[cfg(test)]
mod tests {
    use model::place::{AccessibilityOptions, LocalizedText};
    use uuid::Uuid;

    use super::*;
    use crate::category;

    fn springfield() -> (Country, City) {
        let city = City {
            id: Uuid::nil(),
            name: "Springfield".to_owned(),
        };
        let country = Country {
            id: 1,
            name: "Testland".to_owned(),
            cities: vec![city.clone()],
        };
        (country, city)
    }

    fn upstream_place(id: &str, name: &str) -> Place {
        Place {
            id: id.to_owned(),
            display_name: Some(LocalizedText {
                text: name.to_owned(),
                language_code: None,
            }),
            ..Place::default()
        }
    }

    fn config() -> &'static CategoryConfig {
        category::find("ev-charging-station").unwrap()
    }

    #[test]
    fn derives_slug_and_seeds_category() {
        let (country, city) = springfield();
        let place = upstream_place("A", "Acme Charging");

        let record = normalize(&place, config(), &country, &city).unwrap();
        assert_eq!(record.id, "A");
        assert_eq!(record.slug, "acme-charging");
        assert_eq!(
            record.categories,
            Some(vec!["ev-charging-station".to_owned()])
        );
        assert_eq!(record.city_id, city.id);
        assert_eq!(record.country_id, 1);
    }

    #[test]
    fn single_category_tables_get_no_category_set() {
        let (country, city) = springfield();
        let place = upstream_place("A", "Blue Lagoon");

        let record =
            normalize(&place, category::find("spa").unwrap(), &country, &city)
                .unwrap();
        assert_eq!(record.categories, None);
    }

    #[test]
    fn skips_records_without_id_or_name() {
        let (country, city) = springfield();

        assert!(normalize(&upstream_place("", "Acme"), config(), &country, &city)
            .is_none());
        assert!(normalize(&upstream_place("A", ""), config(), &country, &city)
            .is_none());
        assert!(normalize(&Place::default(), config(), &country, &city).is_none());
    }

    #[test]
    fn skips_names_that_normalize_to_an_empty_slug() {
        let (country, city) = springfield();
        let place = upstream_place("A", "!!! ***");
        assert!(normalize(&place, config(), &country, &city).is_none());
    }

    #[test]
    fn absent_nested_structures_map_to_none() {
        let (country, city) = springfield();
        let record =
            normalize(&upstream_place("A", "Acme"), config(), &country, &city)
                .unwrap();

        assert_eq!(record.wheelchair_accessible_entrance, None);
        assert_eq!(record.opening_hours, None);
        assert_eq!(record.latitude, None);
        assert!(record.payment_options.is_empty());
        assert_eq!(record.good_for_children, None);
        assert_eq!(record.fuel_options, None);
        assert_eq!(record.charge_options, None);
    }

    #[test]
    fn carries_charging_payloads_through() {
        let (country, city) = springfield();
        let mut place = upstream_place("A", "Acme Charging");
        place.fuel_options = Some(serde_json::json!({ "fuelPrices": [] }));
        place.charge_options = Some(serde_json::json!({ "connectorCount": 4 }));
        place.good_for_children = Some(false);

        let record = normalize(&place, config(), &country, &city).unwrap();
        assert_eq!(record.fuel_options, place.fuel_options);
        assert_eq!(record.charge_options, place.charge_options);
        assert_eq!(record.good_for_children, Some(false));
    }

    #[test]
    fn maps_accessibility_and_payment_flags() {
        let (country, city) = springfield();
        let mut place = upstream_place("A", "Acme");
        place.accessibility_options = Some(AccessibilityOptions {
            wheelchair_accessible_parking: Some(true),
            wheelchair_accessible_restroom: None,
            wheelchair_accessible_entrance: Some(false),
        });
        place.payment_options = Some(
            [
                ("acceptsCreditCards".to_owned(), true),
                ("acceptsCashOnly".to_owned(), false),
                ("acceptsNfc".to_owned(), true),
            ]
            .into_iter()
            .collect(),
        );

        let record = normalize(&place, config(), &country, &city).unwrap();
        assert_eq!(record.wheelchair_accessible_parking, Some(true));
        assert_eq!(record.wheelchair_accessible_restroom, None);
        assert_eq!(record.wheelchair_accessible_entrance, Some(false));
        assert_eq!(
            record.payment_options,
            vec!["Accepts Credit Cards".to_owned(), "Accepts Nfc".to_owned()]
        );
    }

    #[test]
    fn filters_generic_types_from_services() {
        let (country, city) = springfield();
        let mut place = upstream_place("A", "Acme");
        place.types = vec![
            "electric_vehicle_charging_station".to_owned(),
            "point_of_interest".to_owned(),
            "establishment".to_owned(),
        ];

        let record = normalize(&place, config(), &country, &city).unwrap();
        assert_eq!(
            record.services,
            vec!["electric_vehicle_charging_station".to_owned()]
        );
    }
}
