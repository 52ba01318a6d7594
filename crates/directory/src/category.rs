/// Declarative description of one import category.
///
/// The pipeline is the same for every category, only these parameters
/// differ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryConfig {
    /// Url-safe category tag. Keys the web route and is the value appended
    /// to a row's category set on a merge.
    pub slug: &'static str,
    /// Target table in the datastore.
    pub table: &'static str,
    /// Search subject; the pipeline expands it to
    /// `"<query> in <city>, <country>"` per city.
    pub query: &'static str,
    /// Optional upstream type filter.
    pub included_type: Option<&'static str>,
    pub min_rating: Option<f64>,
    pub page_size: u8,
    /// Tables with a category set accumulate tags on rows that show up
    /// under several queries instead of duplicating the place.
    pub multi_category: bool,
    /// Whether a slug collision is resolved by renaming the newcomer.
    /// Categories without it treat the collision as an ordinary failed
    /// record and keep going.
    pub slug_retry: bool,
}

pub const CATEGORIES: &[CategoryConfig] = &[
    CategoryConfig {
        slug: "spa",
        table: "spas",
        query: "spa",
        included_type: None,
        min_rating: Some(3.0),
        page_size: 15,
        multi_category: false,
        slug_retry: true,
    },
    CategoryConfig {
        slug: "car-wash",
        table: "car_washes",
        query: "Car wash",
        included_type: None,
        min_rating: Some(3.0),
        page_size: 15,
        multi_category: false,
        slug_retry: true,
    },
    CategoryConfig {
        slug: "car-detailer",
        table: "car_detailers",
        query: "Car detailer",
        included_type: None,
        min_rating: Some(3.0),
        page_size: 15,
        multi_category: false,
        slug_retry: true,
    },
    CategoryConfig {
        slug: "archery",
        table: "archery_ranges",
        query: "Archery range",
        included_type: None,
        min_rating: Some(3.0),
        page_size: 20,
        multi_category: false,
        slug_retry: true,
    },
    CategoryConfig {
        slug: "ev-charging-station",
        table: "charging_points",
        query: "ev charging station",
        included_type: Some("electric_vehicle_charging_station"),
        min_rating: Some(2.5),
        page_size: 20,
        multi_category: true,
        slug_retry: true,
    },
    CategoryConfig {
        slug: "tummy-tuck",
        table: "clinics",
        query: "Tummy tuck surgery clinic",
        included_type: None,
        min_rating: Some(3.0),
        page_size: 12,
        multi_category: true,
        slug_retry: true,
    },
    CategoryConfig {
        slug: "egg-donation",
        table: "clinics",
        query: "egg donation clinic",
        included_type: None,
        min_rating: Some(3.0),
        page_size: 20,
        multi_category: true,
        slug_retry: true,
    },
    // Lead companies are imported as-is, without rating filter and without
    // the rename dance for colliding slugs.
    CategoryConfig {
        slug: "leads",
        table: "leads",
        query: "Lead generation company",
        included_type: None,
        min_rating: None,
        page_size: 20,
        multi_category: false,
        slug_retry: false,
    },
];

pub fn find(slug: &str) -> Option<&'static CategoryConfig> {
    CATEGORIES.iter().find(|config| config.slug == slug)
}
