//! OpenTelemetry GenAI Semantic Convention attribute names.
//!
//! Used as span field names on the chat relay so exported traces line up
//! with other GenAI instrumentation. Usable in `tracing::info_span!` via
//! `{ CONST } = value` field syntax.

/// The name of the operation being performed (e.g., "chat").
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "dify").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

/// The conversation the request belongs to, when known.
pub const GEN_AI_CONVERSATION_ID: &str = "gen_ai.conversation.id";

/// Standard chat operation.
pub const OP_CHAT: &str = "chat";

/// Dify provider identifier.
pub const PROVIDER_DIFY: &str = "dify";
