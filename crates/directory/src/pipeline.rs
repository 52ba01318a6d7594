use log::info;
use serde::Serialize;

use crate::{
    category::CategoryConfig,
    normalize::normalize,
    reconcile::{reconcile, Outcome},
    search::{PlaceSearch, SearchQuery},
    store::{PlaceStore, RegionStore},
    ImportError,
};

/// Tally of one import run, one terminal outcome per upstream place.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub found: usize,
    pub inserted: usize,
    pub merged: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl ImportReport {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Inserted => self.inserted += 1,
            Outcome::Merged => self.merged += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Runs one batch import for a category over every known country and city.
///
/// The nested country/city loops are flattened into one lazy sequence of
/// city contexts; each city issues a single upstream query and then feeds
/// its places sequentially through normalization and reconciliation.
///
/// Error asymmetry, deliberately kept: a failing search call aborts the
/// whole run, while per-record store failures only show up as `failed`
/// counts in the report.
pub async fn run_import<S, P>(
    store: &mut S,
    search: &P,
    config: &CategoryConfig,
) -> Result<ImportReport, ImportError>
where
    S: PlaceStore + RegionStore + Send,
    P: PlaceSearch + Sync,
{
    let countries = store.countries().await?;
    let mut report = ImportReport::default();

    let cities: Vec<_> = countries
        .iter()
        .flat_map(|country| {
            country.cities.iter().map(move |city| (country, city))
        })
        .collect();

    for (country, city) in cities {
        let query = SearchQuery {
            text_query: format!(
                "{} in {}, {}",
                config.query, city.name, country.name
            ),
            included_type: config.included_type,
            min_rating: config.min_rating,
            page_size: config.page_size,
        };

        let places = search
            .search(&query)
            .await
            .map_err(ImportError::Search)?;
        info!("{} - {} places found", city.name, places.len());
        report.found += places.len();

        for place in &places {
            let outcome = match normalize(place, config, country, city) {
                None => Outcome::Skipped,
                Some(candidate) => {
                    reconcile(store, config, city, candidate).await
                }
            };
            report.record(outcome);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::error;

    use async_trait::async_trait;
    use model::{
        place::{LocalizedText, Place},
        region::{City, Country},
    };
    use uuid::Uuid;

    use super::*;
    use crate::{category, store::testing::MemoryStore};

    struct FakeSearch {
        places: Vec<Place>,
        fail: bool,
    }

    #[async_trait]
    impl PlaceSearch for FakeSearch {
        async fn search(
            &self,
            _query: &SearchQuery,
        ) -> Result<Vec<Place>, Box<dyn error::Error + Send + Sync>> {
            if self.fail {
                return Err("upstream unavailable".into());
            }
            Ok(self.places.clone())
        }
    }

    fn store_with_springfield() -> MemoryStore {
        MemoryStore {
            countries: vec![Country {
                id: 1,
                name: "Testland".to_owned(),
                cities: vec![City {
                    id: Uuid::nil(),
                    name: "Springfield".to_owned(),
                }],
            }],
            ..MemoryStore::default()
        }
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

    #[tokio::test]
    async fn two_places_sharing_a_name_get_distinct_slugs() {
        let mut store = store_with_springfield();
        let search = FakeSearch {
            places: vec![
                upstream_place("A", "Acme Charging"),
                upstream_place("B", "Acme Charging"),
            ],
            fail: false,
        };
        let config = category::find("ev-charging-station").unwrap();

        let report = run_import(&mut store, &search, config).await.unwrap();
        assert_eq!(report.found, 2);
        assert_eq!(report.inserted, 2);

        let rows = store.rows("charging_points");
        assert_eq!(rows[0].id, "A");
        assert_eq!(rows[0].slug, "acme-charging");
        assert_eq!(rows[1].id, "B");
        assert_eq!(rows[1].slug, "acme-charging-1");
        assert_eq!(rows[1].name, "Acme Charging - Springfield-1");
    }

    #[tokio::test]
    async fn rerun_under_a_new_category_merges_instead_of_duplicating() {
        let mut store = store_with_springfield();
        let search = FakeSearch {
            places: vec![upstream_place("A", "Springfield Clinic")],
            fail: false,
        };

        let first = category::find("tummy-tuck").unwrap();
        let second = category::find("egg-donation").unwrap();

        run_import(&mut store, &search, first).await.unwrap();
        let report = run_import(&mut store, &search, second).await.unwrap();

        assert_eq!(report.merged, 1);
        assert_eq!(report.inserted, 0);

        let rows = store.rows("clinics");
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].categories,
            Some(vec!["tummy-tuck".to_owned(), "egg-donation".to_owned()])
        );
    }

    #[tokio::test]
    async fn record_failures_do_not_stop_sibling_records() {
        let mut store = store_with_springfield();
        store.poisoned_ids = vec!["B".to_owned()];
        let search = FakeSearch {
            places: vec![
                upstream_place("A", "First Spa"),
                upstream_place("B", "Second Spa"),
                upstream_place("C", "Third Spa"),
            ],
            fail: false,
        };

        let report = run_import(&mut store, &search, category::find("spa").unwrap())
            .await
            .unwrap();

        assert_eq!(report.inserted, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(store.rows("spas").len(), 2);
    }

    #[tokio::test]
    async fn invalid_upstream_records_are_counted_as_skipped() {
        let mut store = store_with_springfield();
        let search = FakeSearch {
            places: vec![
                upstream_place("", "Nameless Id"),
                upstream_place("A", "Real Spa"),
            ],
            fail: false,
        };

        let report = run_import(&mut store, &search, category::find("spa").unwrap())
            .await
            .unwrap();

        assert_eq!(report.found, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.inserted, 1);
    }

    #[tokio::test]
    async fn search_failure_aborts_the_whole_run() {
        let mut store = store_with_springfield();
        let search = FakeSearch {
            places: vec![],
            fail: true,
        };

        let result =
            run_import(&mut store, &search, category::find("spa").unwrap()).await;

        assert!(matches!(result, Err(ImportError::Search(_))));
        assert!(store.rows("spas").is_empty());
    }
}
