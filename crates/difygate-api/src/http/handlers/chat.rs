//! Chat relay handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use tracing::Instrument;

use difygate_observe::genai_attrs::{
    GEN_AI_CONVERSATION_ID, GEN_AI_OPERATION_NAME, GEN_AI_PROVIDER_NAME, OP_CHAT, PROVIDER_DIFY,
};
use difygate_types::chat::ChatRequest;

use crate::http::error::AppError;
use crate::http::handlers::parse_body;
use crate::state::AppState;

/// POST /api/chat - Relay one message upstream and return its body verbatim.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let request: ChatRequest = parse_body(&body)?;

    let span = tracing::info_span!(
        "chat",
        { GEN_AI_OPERATION_NAME } = OP_CHAT,
        { GEN_AI_PROVIDER_NAME } = PROVIDER_DIFY,
        { GEN_AI_CONVERSATION_ID } = request.conversation_id.as_deref().unwrap_or(""),
    );

    let answer = state.chat_service.chat(request).instrument(span).await?;
    Ok(Json(answer))
}
