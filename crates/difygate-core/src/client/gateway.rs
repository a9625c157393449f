//! GatewayApi trait: the client's view of the gateway HTTP contract.

use difygate_types::chat::ChatRequest;
use difygate_types::error::ClientError;
use difygate_types::upload::UploadRequest;

/// The three gateway operations as seen from the client.
///
/// Any non-200 answer must surface as [`ClientError::Status`]; connection or
/// decoding failures as [`ClientError::Transport`]. The client does not
/// distinguish further.
pub trait GatewayApi: Send + Sync {
    /// `POST /api/chat`. Returns the response body on 200.
    fn chat(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, ClientError>> + Send;

    /// `POST /api/git-to-s3`. Returns the response body on 200.
    fn upload(
        &self,
        request: &UploadRequest,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, ClientError>> + Send;

    /// `GET /api/health`. `Ok` only on 200.
    fn health(&self) -> impl std::future::Future<Output = Result<(), ClientError>> + Send;
}
