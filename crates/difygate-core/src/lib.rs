//! Service logic and port trait definitions for difygate.
//!
//! This crate defines the "ports" (upstream chat, repository cloner, object
//! store, gateway API) that the infrastructure layer implements, and the
//! services built on them. It depends only on `difygate-types` -- never on
//! `difygate-infra` or any network/storage SDK.

pub mod chat;
pub mod client;
pub mod upload;
