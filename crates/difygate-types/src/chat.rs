//! Chat types: transcript turns, the gateway chat request, and the payload
//! relayed to the upstream Dify `chat-messages` endpoint.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a single transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One entry in the client-side transcript.
///
/// Turns only ever live in client session memory; the gateway never stores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            at: Utc::now(),
        }
    }
}

/// Body of `POST /api/chat`.
///
/// Both fields are optional on the wire. A missing message is relayed as an
/// empty query; a missing conversation id starts a new upstream conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, conversation_id: Option<String>) -> Self {
        Self {
            message: Some(message.into()),
            conversation_id,
        }
    }
}

/// How the upstream should deliver its answer. Only blocking replies are
/// relayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Single JSON document once the answer is complete.
    Blocking,
}

/// Payload posted to `{base_url}/chat-messages`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamChatRequest {
    /// App input variables. Always empty for this gateway.
    pub inputs: serde_json::Map<String, serde_json::Value>,
    pub query: String,
    pub response_mode: ResponseMode,
    /// Echoed verbatim; empty string asks upstream for a new conversation.
    pub conversation_id: String,
    pub user: String,
}

impl UpstreamChatRequest {
    /// Build a blocking request with no input variables.
    pub fn blocking(query: String, conversation_id: Option<String>, user: String) -> Self {
        Self {
            inputs: serde_json::Map::new(),
            query,
            response_mode: ResponseMode::Blocking,
            conversation_id: conversation_id.unwrap_or_default(),
            user,
        }
    }
}
