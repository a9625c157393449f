//! Infrastructure layer for difygate.
//!
//! Contains implementations of the port traits defined in `difygate-core`:
//! the Dify chat client, the git2 repository cloner, the S3 object store,
//! and the HTTP client the interactive client uses to reach the gateway.
//! Also loads process configuration from the environment.

pub mod config;
pub mod dify;
pub mod gateway;
pub mod git;
pub mod storage;

#[cfg(test)]
pub(crate) mod stub;
