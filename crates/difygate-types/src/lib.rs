//! Shared wire and domain types for difygate.
//!
//! This crate contains the request/response shapes exchanged between the
//! interactive client, the gateway service, and the upstream Dify API, plus
//! the error taxonomy every gateway operation reports through. `analysis`
//! holds the question tree and report shapes of the client-side five-forces
//! analysis.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod analysis;
pub mod chat;
pub mod config;
pub mod error;
pub mod health;
pub mod upload;
