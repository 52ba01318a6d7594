pub use crate::common::RouteResult;

use std::sync::Arc;

use axum::{extract::FromRef, Router};
use database::PgDatabase;
use google_places::GooglePlacesClient;
use openai::OpenAiClient;
use tokio::net::TcpListener;

pub mod api;
pub mod common;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub database: PgDatabase,
    pub places: Arc<GooglePlacesClient>,
    pub openai: Arc<OpenAiClient>,
}

pub async fn start_web_server(state: WebState) -> std::io::Result<()> {
    let routes = Router::new().nest_service("/api", api::routes(state));

    let listener = TcpListener::bind("0.0.0.0:8080").await?;
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}
