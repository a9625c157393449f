//! Client session driving the chat, upload, and info views.
//!
//! One call is in flight at a time: every operation takes the session by
//! reference and awaits the gateway before returning. Errors never escape as
//! `Err`; each view turns them into something displayable, the way the user
//! sees them.

use difygate_types::chat::{ChatRequest, ChatTurn};
use difygate_types::config::ConfigStatus;
use difygate_types::error::ClientError;
use difygate_types::upload::UploadRequest;
use tracing::{debug, warn};

use crate::client::gateway::GatewayApi;
use crate::client::state::ConversationState;

/// Assistant text used when a 200 reply carries no `answer`.
pub const NO_RESPONSE_PLACEHOLDER: &str = "Sorry, I could not get a response.";

/// Message shown when the upload form is submitted incomplete.
pub const UPLOAD_FORM_INCOMPLETE: &str = "Please enter the repository URL and bucket name.";

/// Result of submitting the upload form.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Client-side validation failed; nothing was sent.
    Rejected(String),
    /// The gateway accepted the upload; carries its response body.
    Uploaded(serde_json::Value),
    /// The gateway or the connection failed.
    Failed(String),
}

/// What the info view displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoReport {
    pub backend_reachable: bool,
    pub config: ConfigStatus,
}

/// A single user's client session.
pub struct ClientSession<G: GatewayApi> {
    gateway: G,
    state: ConversationState,
}

impl<G: GatewayApi> ClientSession<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: ConversationState::new(),
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Send one chat message and return the assistant turn it produced.
    ///
    /// The user turn is recorded before the call. Failures are recorded as
    /// an assistant turn carrying the error text.
    pub async fn send_chat(&mut self, message: &str) -> &ChatTurn {
        self.state.push_user(message);

        let request = ChatRequest::new(message, self.state.conversation_id().map(str::to_string));
        let reply = match self.gateway.chat(&request).await {
            Ok(body) => {
                if let Some(id) = body.get("conversation_id").and_then(|v| v.as_str()) {
                    self.state.adopt_conversation_id(id);
                }
                body.get("answer")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string())
            }
            Err(err) => {
                warn!(error = %err, "Chat call failed");
                chat_error_text(&err)
            }
        };

        self.state.push_assistant(reply);
        let turns = self.state.turns();
        &turns[turns.len() - 1]
    }

    /// Submit the upload form.
    pub async fn upload(&self, request: UploadRequest) -> UploadOutcome {
        if is_blank(&request.repo_url) || is_blank(&request.bucket_name) {
            return UploadOutcome::Rejected(UPLOAD_FORM_INCOMPLETE.to_string());
        }

        match self.gateway.upload(&request).await {
            Ok(body) => UploadOutcome::Uploaded(body),
            Err(err) => {
                warn!(error = %err, "Upload call failed");
                UploadOutcome::Failed(upload_error_text(&err))
            }
        }
    }

    /// Whether the gateway answered its health check with 200.
    pub async fn backend_reachable(&self) -> bool {
        match self.gateway.health().await {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "Health check failed");
                false
            }
        }
    }

    /// Gather everything the info view shows.
    pub async fn info(&self, config: ConfigStatus) -> InfoReport {
        InfoReport {
            backend_reachable: self.backend_reachable().await,
            config,
        }
    }

    /// Forget the transcript and the conversation handle.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Forget the transcript, keep the conversation handle.
    pub fn clear_history(&mut self) {
        self.state.clear_history();
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Text recorded as the assistant turn when a chat call fails.
pub fn chat_error_text(err: &ClientError) -> String {
    match err {
        ClientError::Status { status, .. } => format!("An error occurred: {status}"),
        ClientError::Transport(msg) => format!("Connection error: {msg}"),
    }
}

/// Text shown in the upload view's error banner.
pub fn upload_error_text(err: &ClientError) -> String {
    match err {
        ClientError::Status {
            status,
            message: Some(message),
        } => format!("{message} (HTTP {status})"),
        ClientError::Status { status, message: None } => format!("An error occurred: {status}"),
        ClientError::Transport(msg) => format!("Connection error: {msg}"),
    }
}
