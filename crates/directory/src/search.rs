use std::error;

use async_trait::async_trait;
use model::place::Place;

/// One text-search query against the upstream places service.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text_query: String,
    pub included_type: Option<&'static str>,
    pub min_rating: Option<f64>,
    pub page_size: u8,
}

/// Seam to the upstream search service. The pipeline only ever sees this
/// trait; the concrete http client lives in its own crate.
#[async_trait]
pub trait PlaceSearch {
    /// Errors here are batch-fatal, the caller aborts the whole run.
    async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<Place>, Box<dyn error::Error + Send + Sync>>;
}
