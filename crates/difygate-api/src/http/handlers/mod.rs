//! Route handlers. Each decodes its body, calls one service, and lets
//! [`AppError`](crate::http::error::AppError) render failures.

pub mod chat;
pub mod health;
pub mod upload;

use serde::de::DeserializeOwned;
use tracing::debug;

use difygate_types::error::GatewayError;

/// Decode a JSON body. A blank body reads as `{}`.
///
/// Anything else that fails to decode, a wrong field type included, is an
/// internal error carrying the decoder's message.
pub(crate) fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T, GatewayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|err| {
        debug!(error = %err, "Rejected unreadable JSON body");
        GatewayError::Internal(format!("invalid JSON body: {err}"))
    })
}
