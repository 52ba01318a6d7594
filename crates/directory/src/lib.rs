use std::{error, fmt};

use crate::store::StoreError;

pub mod category;
pub mod describe;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod search;
pub mod store;

/// Failure that aborts a whole batch run.
///
/// Everything record-local (normalization skips, handled collisions,
/// isolated write failures) is dealt with inside the pipeline and never
/// surfaces here.
#[derive(Debug)]
pub enum ImportError {
    /// The upstream search call failed. Fail-fast by design: without
    /// upstream data there is nothing left to do for this run.
    Search(Box<dyn error::Error + Send + Sync>),
    /// Reading the countries/cities to import for failed.
    Store(StoreError),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ImportError::Search(why) => write!(f, "upstream search failed: {why}"),
            ImportError::Store(why) => write!(f, "datastore error: {why}"),
        }
    }
}

impl error::Error for ImportError {}

impl From<StoreError> for ImportError {
    fn from(value: StoreError) -> Self {
        ImportError::Store(value)
    }
}
