//! HTTP layer for the gateway.
//!
//! Three routes under `/api/`, open CORS, and one error edge that turns
//! [`GatewayError`](difygate_types::error::GatewayError) into status codes.

pub mod error;
pub mod handlers;
pub mod router;
