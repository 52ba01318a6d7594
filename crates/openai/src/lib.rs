use std::{env, error, fmt, sync::Arc};

use async_trait::async_trait;
use directory::describe::DescriptionGenerator;
use log::debug;
use model::place::PlaceSummary;
use serde::{Deserialize, Serialize};

pub mod prompt;

pub const CHAT_COMPLETIONS_URL: &str =
    "https://api.openai.com/v1/chat/completions";

const MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub enum ApiError {
    MissingCredentials(&'static str),
    RequestError(Arc<reqwest::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        response: Option<String>,
    },
    EmptyCompletion,
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
            ApiError::EmptyCompletion => {
                write!(f, "completion contained no choices")
            }
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
pub struct OpenAiCredentials {
    pub api_key: String,
}

impl OpenAiCredentials {
    /// Reads the api key from `OPENAI_API_KEY`; absence is batch-fatal.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| ApiError::MissingCredentials("OPENAI_API_KEY"))?;
        Ok(Self { api_key })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

pub struct OpenAiClient {
    credentials: OpenAiCredentials,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(credentials: OpenAiCredentials) -> Self {
        Self {
            credentials,
            client: reqwest::Client::new(),
        }
    }

    /// Sends one chat completion and returns the trimmed text of the
    /// first choice.
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
    ) -> Result<String, ApiError> {
        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.credentials.api_key)
            .json(&ChatCompletionRequest {
                model: MODEL,
                messages,
            })
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let body: ChatCompletionResponse = response.json().await?;
                body.choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content.trim().to_owned())
                    .ok_or(ApiError::EmptyCompletion)
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
impl DescriptionGenerator for OpenAiClient {
    async fn generate(
        &self,
        place: &PlaceSummary,
    ) -> Result<String, Box<dyn error::Error + Send + Sync>> {
        debug!("generating description for '{}'", place.slug);
        Ok(self.chat_completion(prompt::description_messages(place)).await?)
    }
}
