use std::time::Duration;

use bon::Builder;
use serde::Serialize;

use crate::run::{CreateRunBody, Run, RunInit, new_run_id};
use crate::{TraceEvent, WandbRequestError};

const DEFAULT_BASE_URL: &str = "https://api.wandb.ai";

/// Tracking API client
#[derive(Debug, Clone, Builder)]
pub struct Wandb {
    /// API key for authentication
    #[builder(into)]
    api_key: String,

    /// Base URL for the backend (allows for self-hosted instances)
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

impl Wandb {
    /// Create a new client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: default_http_client(),
        }
    }

    /// Create a new client from the `WANDB_API_KEY` environment variable
    pub fn from_env() -> Result<Self, WandbRequestError> {
        let api_key =
            std::env::var("WANDB_API_KEY").map_err(|_| WandbRequestError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a run and return a handle for logging against it.
    ///
    /// The run id is generated client side, so the handle is usable even
    /// if the backend response carries no body.
    pub async fn init_run(&self, init: RunInit) -> Result<Run, WandbRequestError> {
        let id = new_run_id();
        let body = CreateRunBody {
            id: &id,
            started_at: chrono::Utc::now(),
            init: &init,
        };
        let url = format!("{}/api/runs", self.base_url);
        self.post_json(&url, &body).await?;
        Ok(Run::new(self.clone(), init.entity, init.project, id))
    }

    /// Record one trace event under the given trace project
    pub async fn log_trace(
        &self,
        entity: &str,
        project: &str,
        event: &TraceEvent,
    ) -> Result<(), WandbRequestError> {
        let url = format!("{}/api/traces/{}/{}", self.base_url, entity, project);
        self.post_json(&url, event).await
    }

    pub(crate) async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<(), WandbRequestError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    pub(crate) async fn post_multipart(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
    ) -> Result<(), WandbRequestError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn check_status(response: reqwest::Response) -> Result<(), WandbRequestError> {
        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let bytes = response.bytes().await?;
            Err(crate::error::parse_error_response(status, bytes))
        }
    }
}
