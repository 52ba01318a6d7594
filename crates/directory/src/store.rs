use std::{error, fmt, result};

use async_trait::async_trait;
use model::{
    place::{PlaceRecord, PlaceSummary},
    region::Country,
};

/// The unique key an insert ran into.
///
/// `Id` equality means "same physical place" and takes precedence over a
/// name-derived `Slug` collision, so the two must stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    Id,
    Slug,
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UniqueKey::Id => write!(f, "id"),
            UniqueKey::Slug => write!(f, "slug"),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    UniqueViolation(UniqueKey),
    NotFound,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl StoreError {
    pub fn other<E: error::Error + Send + Sync + 'static>(why: E) -> Self {
        Self::Other(Box::new(why))
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::UniqueViolation(key) => {
                write!(f, "unique constraint violation on ({key})")
            }
            StoreError::NotFound => write!(f, "row not found"),
            StoreError::Other(why) => write!(f, "{why}"),
        }
    }
}

impl error::Error for StoreError {}

pub type Result<T> = result::Result<T, StoreError>;

/// Table-oriented access to the category tables. Table names always come
/// from the static category registry, never from request input.
#[async_trait]
pub trait PlaceStore {
    /// Attempts to create the row as-is. Uniqueness violations are reported
    /// with the violated key so the reconciler can pick its transition.
    async fn insert_place(&mut self, table: &str, record: &PlaceRecord) -> Result<()>;

    /// Looks up a row by its upstream id. `None` means no such row; a row
    /// without a category set reports `Some(vec![])`.
    async fn find_categories(
        &mut self,
        table: &str,
        id: &str,
    ) -> Result<Option<Vec<String>>>;

    /// Replaces the category set of one row, keyed by id.
    async fn set_categories(
        &mut self,
        table: &str,
        id: &str,
        categories: &[String],
    ) -> Result<()>;
}

/// Access to the countries and cities driving the import loops.
#[async_trait]
pub trait RegionStore {
    async fn countries(&mut self) -> Result<Vec<Country>>;
}

/// Access used by the description backfill.
#[async_trait]
pub trait DescriptionStore {
    /// Rows whose description is still missing (or too short to be useful).
    async fn places_without_description(
        &mut self,
        table: &str,
    ) -> Result<Vec<PlaceSummary>>;

    async fn set_description(
        &mut self,
        table: &str,
        id: &str,
        description: &str,
    ) -> Result<()>;
}
