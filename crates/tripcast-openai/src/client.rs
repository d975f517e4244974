use std::time::Duration;

use bon::Builder;

use crate::{ChatRequest, ChatResponse, OpenAiRequestError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat completions API client
#[derive(Debug, Clone, Builder)]
pub struct OpenAi {
    /// API key for authentication
    #[builder(into)]
    api_key: String,

    /// Base URL for the API (allows for custom endpoints)
    #[builder(default = DEFAULT_BASE_URL.to_string(), into)]
    base_url: String,

    /// HTTP client for making requests
    #[builder(skip = default_http_client())]
    client: reqwest::Client,
}

fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .expect("Failed to create HTTP client")
}

impl OpenAi {
    /// Create a new client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: default_http_client(),
        }
    }

    /// Create a new client from the `OPENAI_API_KEY` environment variable
    pub fn from_env() -> Result<Self, OpenAiRequestError> {
        let api_key =
            std::env::var("OPENAI_API_KEY").map_err(|_| OpenAiRequestError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a chat request builder
    pub fn chat(&self) -> crate::request::ChatRequestBuilder {
        ChatRequest::builder()
    }

    /// Send a chat request and get a response
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, OpenAiRequestError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json::<ChatResponse>().await?)
        } else {
            let status = response.status();
            let bytes = response.bytes().await?;
            Err(crate::error::parse_error_response(status, bytes))
        }
    }
}
