//! HTTP client for the gateway service, used by the interactive client.
//!
//! Implements [`GatewayApi`] over `reqwest`. Uses the client's default
//! timeouts; there is no retry.

use reqwest::{Response, StatusCode};
use tracing::debug;

use difygate_core::client::gateway::GatewayApi;
use difygate_types::chat::ChatRequest;
use difygate_types::error::{ClientError, ErrorBody};
use difygate_types::upload::UploadRequest;

/// Talks to a running gateway at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpGatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGatewayClient {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<serde_json::Value, ClientError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        read_json(response).await
    }
}

/// Body on 200, [`ClientError::Status`] otherwise.
async fn read_json(response: Response) -> Result<serde_json::Value, ClientError> {
    let status = response.status();
    if status != StatusCode::OK {
        let message = response.json::<ErrorBody>().await.ok().map(|b| b.error);
        debug!(status = status.as_u16(), message = ?message, "Gateway returned an error status");
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))
}

impl GatewayApi for HttpGatewayClient {
    async fn chat(&self, request: &ChatRequest) -> Result<serde_json::Value, ClientError> {
        self.post_json("/api/chat", request).await
    }

    async fn upload(&self, request: &UploadRequest) -> Result<serde_json::Value, ClientError> {
        self.post_json("/api/git-to-s3", request).await
    }

    async fn health(&self) -> Result<(), ClientError> {
        let response = self
            .client
            .get(self.url("/api/health"))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(ClientError::Status {
                status: status.as_u16(),
                message: None,
            }),
        }
    }
}
