//! Chat relay: forwards one message to the upstream AI endpoint.

pub mod service;
pub mod upstream;
