//! ChatUpstream trait definition.
//!
//! The seam between the chat relay and the hosted conversational-AI API.
//! Uses RPITIT (native async fn in traits, Rust 2024 edition).

use difygate_types::chat::UpstreamChatRequest;
use difygate_types::error::UpstreamError;

/// A conversational-AI backend that answers one blocking chat request.
///
/// Implementations live in difygate-infra (e.g., `DifyClient`).
pub trait ChatUpstream: Send + Sync {
    /// Send the request and return the upstream's JSON body untouched.
    ///
    /// A non-success HTTP status must be reported as
    /// [`UpstreamError::Status`] so the caller can forward the code.
    fn send(
        &self,
        request: &UpstreamChatRequest,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, UpstreamError>> + Send;
}
