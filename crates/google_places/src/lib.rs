use std::{env, error, fmt, sync::Arc};

use async_trait::async_trait;
use directory::search::{PlaceSearch, SearchQuery};
use log::debug;
use model::place::Place;
use serde::{Deserialize, Serialize};

pub const PLACES_API_URL: &str =
    "https://places.googleapis.com/v1/places:searchText";

const LANGUAGE_CODE: &str = "en";
const RANK_PREFERENCE: &str = "RELEVANCE";

#[derive(Debug, Clone)]
pub enum ApiError {
    MissingCredentials(&'static str),
    RequestError(Arc<reqwest::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        response: Option<String>,
    },
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::MissingCredentials(variable) => {
                write!(f, "missing environment variable '{variable}'")
            }
            ApiError::RequestError(why) => write!(f, "HTTP request error: {why}"),
            ApiError::InvalidResponse {
                status_code,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({status_code}): {text}")
                }
                None => write!(f, "Invalid Response ({status_code})"),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(why: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(why))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacesApiCredentials {
    pub api_key: String,
}

impl PlacesApiCredentials {
    /// Reads the api key from `GOOGLE_MAPS_API_KEY`. Its absence is fatal
    /// for the whole run, there is no degraded mode without the upstream.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY")
            .map_err(|_| ApiError::MissingCredentials("GOOGLE_MAPS_API_KEY"))?;
        Ok(Self { api_key })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchTextRequest<'a> {
    text_query: &'a str,
    language_code: &'static str,
    rank_preference: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_rating: Option<f64>,
    page_size: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    included_type: Option<&'static str>,
}

impl<'a> SearchTextRequest<'a> {
    fn from_query(query: &'a SearchQuery) -> Self {
        Self {
            text_query: &query.text_query,
            language_code: LANGUAGE_CODE,
            rank_preference: RANK_PREFERENCE,
            min_rating: query.min_rating,
            page_size: query.page_size,
            included_type: query.included_type,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchTextResponse {
    #[serde(default)]
    places: Vec<Place>,
}

pub struct GooglePlacesClient {
    credentials: PlacesApiCredentials,
    client: reqwest::Client,
}

impl GooglePlacesClient {
    pub fn new(credentials: PlacesApiCredentials) -> Self {
        Self {
            credentials,
            client: reqwest::Client::new(),
        }
    }

    /// Runs one text-search query. A non-success status is returned with
    /// the upstream error body attached; callers treat it as batch-fatal.
    pub async fn search_text(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<Place>, ApiError> {
        debug!("searching upstream for '{}'", query.text_query);

        let response = self
            .client
            .post(PLACES_API_URL)
            .header("X-Goog-Api-Key", &self.credentials.api_key)
            .header("X-Goog-FieldMask", "places")
            .json(&SearchTextRequest::from_query(query))
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let body: SearchTextResponse = response.json().await?;
                Ok(body.places)
            }
            other => match response.text().await {
                Ok(text) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    response: Some(text),
                }),
                Err(_) => Err(ApiError::InvalidResponse {
                    status_code: other,
                    response: None,
                }),
            },
        }
    }
}

#[async_trait]
impl PlaceSearch for GooglePlacesClient {
    async fn search(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<Place>, Box<dyn error::Error + Send + Sync>> {
        Ok(self.search_text(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_is_camel_case_and_omits_empty_options() {
        let query = SearchQuery {
            text_query: "spa in Springfield, Testland".to_owned(),
            included_type: None,
            min_rating: Some(3.0),
            page_size: 15,
        };

        let body =
            serde_json::to_value(SearchTextRequest::from_query(&query)).unwrap();
        assert_eq!(body["textQuery"], "spa in Springfield, Testland");
        assert_eq!(body["languageCode"], "en");
        assert_eq!(body["rankPreference"], "RELEVANCE");
        assert_eq!(body["minRating"], 3.0);
        assert_eq!(body["pageSize"], 15);
        assert!(body.get("includedType").is_none());
    }

    #[test]
    fn response_parses_place_records() {
        let response: SearchTextResponse = serde_json::from_str(
            r#"{
                "places": [{
                    "id": "p1",
                    "displayName": { "text": "Acme Charging" },
                    "formattedAddress": "1 Main St, Springfield",
                    "rating": 4.2,
                    "userRatingCount": 17,
                    "types": ["electric_vehicle_charging_station", "establishment"],
                    "paymentOptions": { "acceptsCreditCards": true }
                }]
            }"#,
        )
        .unwrap();

        let place = &response.places[0];
        assert_eq!(place.id, "p1");
        assert_eq!(place.display_name.as_ref().unwrap().text, "Acme Charging");
        assert_eq!(place.rating, Some(4.2));
        assert_eq!(
            place.payment_options.as_ref().unwrap()["acceptsCreditCards"],
            true
        );
    }

    #[test]
    fn empty_response_yields_no_places() {
        let response: SearchTextResponse = serde_json::from_str("{}").unwrap();
        assert!(response.places.is_empty());
    }
}
