//! Dify chat API adapter.
//!
//! Provides [`DifyClient`], the [`ChatUpstream`](difygate_core::chat::upstream::ChatUpstream)
//! implementation that posts blocking requests to Dify's `chat-messages` endpoint.

pub mod client;

pub use client::DifyClient;
