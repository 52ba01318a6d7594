use std::sync::Arc;

use database::{DatabaseConnectionInfo, PgDatabase};
use google_places::{GooglePlacesClient, PlacesApiCredentials};
use openai::{OpenAiClient, OpenAiCredentials};
use web::{start_web_server, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    // database
    let database_connection_info = DatabaseConnectionInfo::from_env()
        .expect("expected database connection info in env.");
    let database = PgDatabase::connect(database_connection_info)
        .await
        .expect("could not connect to database.");

    // upstream clients
    let places = GooglePlacesClient::new(
        PlacesApiCredentials::from_env().expect("expected places api key in env."),
    );
    let openai = OpenAiClient::new(
        OpenAiCredentials::from_env().expect("expected openai api key in env."),
    );

    // web server
    let web_future = start_web_server(WebState {
        database,
        places: Arc::new(places),
        openai: Arc::new(openai),
    });

    let _ = web_future.await;
}
