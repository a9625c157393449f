//! Chat service relaying gateway chat requests to the upstream.
//!
//! ChatService turns a [`ChatRequest`] into a single blocking upstream call
//! and maps adapter failures onto the gateway error taxonomy. It keeps no
//! state between calls: the conversation handle travels with each request.

use difygate_types::chat::{ChatRequest, UpstreamChatRequest};
use difygate_types::error::{GatewayError, UpstreamError};
use tracing::{debug, warn};

use crate::chat::upstream::ChatUpstream;

/// Configuration error reported when no upstream key is available.
pub const MISSING_API_KEY_MESSAGE: &str = "Dify API key not configured";

/// Relays chat messages to a [`ChatUpstream`].
///
/// Generic over the upstream so tests can stand in a scripted fake.
pub struct ChatService<U: ChatUpstream> {
    upstream: U,
    user: String,
}

impl<U: ChatUpstream> ChatService<U> {
    /// Create a chat service that identifies itself upstream as `user`.
    pub fn new(upstream: U, user: impl Into<String>) -> Self {
        Self {
            upstream,
            user: user.into(),
        }
    }

    /// Access the upstream adapter.
    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Forward one message and return the upstream body unmodified.
    ///
    /// Single attempt, no retry.
    pub async fn chat(&self, request: ChatRequest) -> Result<serde_json::Value, GatewayError> {
        let query = request.message.unwrap_or_default();
        let upstream_request =
            UpstreamChatRequest::blocking(query, request.conversation_id, self.user.clone());

        debug!(
            new_conversation = upstream_request.conversation_id.is_empty(),
            query_chars = upstream_request.query.chars().count(),
            "Relaying chat message upstream"
        );

        self.upstream
            .send(&upstream_request)
            .await
            .map_err(|err| match err {
                UpstreamError::Status { status } => {
                    warn!(status, "Upstream rejected chat request");
                    GatewayError::Upstream { status }
                }
                UpstreamError::MissingApiKey => {
                    GatewayError::Configuration(MISSING_API_KEY_MESSAGE.to_string())
                }
                other => {
                    warn!(error = %other, "Chat relay failed");
                    GatewayError::Internal(other.to_string())
                }
            })
    }
}
