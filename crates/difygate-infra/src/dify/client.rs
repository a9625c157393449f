//! DifyClient -- concrete [`ChatUpstream`] implementation for the Dify API.
//!
//! Sends one blocking `POST {base_url}/chat-messages` per call with bearer
//! authentication and returns the JSON body as-is.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use difygate_core::chat::upstream::ChatUpstream;
use difygate_types::chat::UpstreamChatRequest;
use difygate_types::error::UpstreamError;

/// Dify chat API client.
///
/// Holds an optional key: without one, every call fails with
/// [`UpstreamError::MissingApiKey`] before any network traffic.
pub struct DifyClient {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl DifyClient {
    /// Generous ceiling for long blocking generations.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

    /// Create a new Dify client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Dify app API key, if configured
    /// * `base_url` - API root including the version segment (e.g., "https://api.dify.ai/v1")
    pub fn new(api_key: Option<SecretString>, base_url: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

// No Debug derive: keeps the key out of any formatted output.

impl ChatUpstream for DifyClient {
    async fn send(&self, request: &UpstreamChatRequest) -> Result<serde_json::Value, UpstreamError> {
        let api_key = self.api_key.as_ref().ok_or(UpstreamError::MissingApiKey)?;
        let url = self.url("/chat-messages");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %body, "Dify returned an error status");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}
