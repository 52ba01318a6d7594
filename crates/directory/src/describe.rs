use std::error;

use async_trait::async_trait;
use log::{error, info};
use model::place::PlaceSummary;
use serde::Serialize;

use crate::{category::CategoryConfig, store::DescriptionStore, ImportError};

/// Generates a free-text description for one stored place.
#[async_trait]
pub trait DescriptionGenerator {
    async fn generate(
        &self,
        place: &PlaceSummary,
    ) -> Result<String, Box<dyn error::Error + Send + Sync>>;
}

/// Tally of one backfill run. `failed` carries the slugs of the records
/// that could not be updated, for operator follow-up.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillReport {
    pub updated: usize,
    pub failed: Vec<String>,
}

/// Fills in missing descriptions for one category table.
///
/// A plain fetch-then-write loop: no retry, no merge. Generation and
/// update failures are collected per record and never abort the run;
/// fetching the work list is the only batch-fatal step.
pub async fn backfill_descriptions<S, G>(
    store: &mut S,
    generator: &G,
    config: &CategoryConfig,
) -> Result<BackfillReport, ImportError>
where
    S: DescriptionStore + Send,
    G: DescriptionGenerator + Sync,
{
    let places = store.places_without_description(config.table).await?;
    info!(
        "{} rows in {} need a description",
        places.len(),
        config.table
    );

    let mut report = BackfillReport::default();
    for place in places {
        let description = match generator.generate(&place).await {
            Ok(text) => text,
            Err(why) => {
                error!("generating description for {} failed: {why}", place.slug);
                report.failed.push(place.slug);
                continue;
            }
        };

        let description = description.trim();
        if description.is_empty() {
            error!("generator returned an empty description for {}", place.slug);
            report.failed.push(place.slug);
            continue;
        }

        match store
            .set_description(config.table, &place.id, description)
            .await
        {
            Ok(()) => report.updated += 1,
            Err(why) => {
                error!("storing description for {} failed: {why}", place.slug);
                report.failed.push(place.slug);
            }
        }
    }

    Ok(report)
}
