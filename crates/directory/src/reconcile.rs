use log::{error, warn};
use model::{place::PlaceRecord, region::City};
use utility::slug::{slugify, MAX_SLUG_LEN};

use crate::{
    category::CategoryConfig,
    store::{PlaceStore, StoreError, UniqueKey},
};

/// Terminal state of one candidate record. Every record ends in exactly
/// one of these; none of them aborts the surrounding batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Inserted,
    Merged,
    Skipped,
    Failed,
}

/// More renames than this means the table is in a pathological state
/// (every numbered slug taken), not an ordinary collision.
const MAX_SLUG_ATTEMPTS: u32 = 20;

/// Decides insert, merge or rename-retry for one candidate row.
///
/// Identity wins over the name-derived slug: a row with the same upstream
/// id is the same physical place and is merged into (multi-category
/// tables) or left alone, while a slug collision only means two distinct
/// places share a display name and is resolved by renaming the newcomer
/// to `"<name> - <city>-<n>"` with slug `"<base-slug>-<n>"`. Categories
/// that opt out of the rename fail the colliding record instead.
pub async fn reconcile<S>(
    store: &mut S,
    config: &CategoryConfig,
    city: &City,
    mut candidate: PlaceRecord,
) -> Outcome
where
    S: PlaceStore + Send,
{
    if config.multi_category {
        match store.find_categories(config.table, &candidate.id).await {
            Ok(Some(existing)) => {
                return merge_into(store, config, &candidate.id, existing).await;
            }
            Ok(None) => {}
            Err(why) => {
                // proceed to the insert, the constraint check there is
                // authoritative anyway
                warn!(
                    "checking {} for existing row {} failed: {why}",
                    config.table, candidate.id
                );
            }
        }
    }

    let base_name = candidate.name.clone();
    let base_slug = candidate.slug.clone();
    let mut attempt: u32 = 0;

    loop {
        match store.insert_place(config.table, &candidate).await {
            Ok(()) => return Outcome::Inserted,
            Err(StoreError::UniqueViolation(UniqueKey::Slug)) => {
                if !config.slug_retry {
                    error!(
                        "slug '{}' already taken in {}, category does not rename",
                        candidate.slug, config.table
                    );
                    return Outcome::Failed;
                }
                attempt += 1;
                if attempt > MAX_SLUG_ATTEMPTS {
                    error!(
                        "giving up on '{base_name}' in {} after {MAX_SLUG_ATTEMPTS} slug collisions",
                        config.table
                    );
                    return Outcome::Failed;
                }
                rename(&mut candidate, &base_name, &base_slug, &city.name, attempt);
            }
            Err(StoreError::UniqueViolation(UniqueKey::Id)) => {
                // already present under the same upstream id
                return if config.multi_category {
                    merge_category(store, config, &candidate.id).await
                } else {
                    warn!(
                        "row {} already exists in {}, leaving it untouched",
                        candidate.id, config.table
                    );
                    Outcome::Skipped
                };
            }
            Err(why) => {
                error!(
                    "inserting '{}' into {} failed: {why}",
                    candidate.name, config.table
                );
                return Outcome::Failed;
            }
        }
    }
}

/// Applies the uniform rename scheme for the n-th slug collision.
fn rename(
    candidate: &mut PlaceRecord,
    base_name: &str,
    base_slug: &str,
    city_name: &str,
    attempt: u32,
) {
    candidate.name = format!("{base_name} - {city_name}-{attempt}");

    // leave room for the suffix so the length cap can not cut it off,
    // which would make every further attempt collide on the same slug
    let suffix = format!("-{attempt}");
    let keep = base_slug.len().min(MAX_SLUG_LEN - suffix.len());
    candidate.slug = slugify(&format!("{}{suffix}", &base_slug[..keep]));
}

/// Appends the configured category to the existing row with the given id.
///
/// Fetches the stored category set first; merging is idempotent and the
/// set only ever grows. An update failure is logged and surfaces as a
/// failed record without aborting the batch.
pub async fn merge_category<S>(
    store: &mut S,
    config: &CategoryConfig,
    id: &str,
) -> Outcome
where
    S: PlaceStore + Send,
{
    let existing = match store.find_categories(config.table, id).await {
        Ok(Some(categories)) => categories,
        Ok(None) => {
            warn!(
                "row {id} vanished from {} before its categories could be merged",
                config.table
            );
            return Outcome::Failed;
        }
        Err(why) => {
            error!(
                "fetching categories of {id} in {} failed: {why}",
                config.table
            );
            return Outcome::Failed;
        }
    };

    merge_into(store, config, id, existing).await
}

async fn merge_into<S>(
    store: &mut S,
    config: &CategoryConfig,
    id: &str,
    existing: Vec<String>,
) -> Outcome
where
    S: PlaceStore + Send,
{
    if existing.iter().any(|category| category == config.slug) {
        return Outcome::Merged;
    }

    let mut categories = existing;
    categories.push(config.slug.to_owned());

    match store.set_categories(config.table, id, &categories).await {
        Ok(()) => Outcome::Merged,
        Err(why) => {
            error!(
                "updating categories of {id} in {} failed: {why}",
                config.table
            );
            Outcome::Failed
        }
    }
}
