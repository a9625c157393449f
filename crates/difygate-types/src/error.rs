use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error taxonomy for every gateway operation.
///
/// Services return these; the HTTP edge turns them into status codes and
/// [`ErrorBody`] payloads.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required request field is missing. Nothing was attempted.
    #[error("{0}")]
    Validation(String),

    /// A credential the operation needs is not configured.
    #[error("{0}")]
    Configuration(String),

    /// The upstream AI API answered with a non-success status.
    #[error("Dify API error")]
    Upstream { status: u16 },

    /// Anything else: transport failure, clone failure, upload failure.
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Short machine-friendly name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "validation",
            GatewayError::Configuration(_) => "configuration",
            GatewayError::Upstream { .. } => "upstream",
            GatewayError::Internal(_) => "internal",
        }
    }
}

/// Errors from the upstream chat adapter.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream API key not configured")]
    MissingApiKey,

    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    #[error("{0}")]
    Transport(String),

    #[error("invalid upstream response: {0}")]
    Decode(String),
}

/// Errors from cloning a remote repository.
#[derive(Debug, Error)]
pub enum CloneError {
    #[error("failed to clone {url}: {message}")]
    Git { url: String, message: String },

    #[error("clone task failed: {0}")]
    Join(String),
}

/// Errors from object storage writes.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to upload s3://{bucket}/{key}: {message}")]
    Upload {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
}

/// Errors seen by the interactive client when calling the gateway.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The gateway answered with a non-200 status.
    #[error("HTTP {status}")]
    Status {
        status: u16,
        /// The `error` field of the response body, when one could be read.
        message: Option<String>,
    },

    /// The gateway could not be reached or its answer could not be read.
    #[error("{0}")]
    Transport(String),
}

/// Errors from loading or walking a five-forces question tree.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid question tree: {0}")]
    InvalidTree(String),

    #[error("'{0}' is not one of the choices")]
    UnknownChoice(String),

    #[error("choice {index} is out of range ({count} choices)")]
    ChoiceOutOfRange { index: usize, count: usize },

    #[error("analysis is already complete")]
    Finished,
}

/// JSON shape of every gateway failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<&GatewayError> for ErrorBody {
    fn from(err: &GatewayError) -> Self {
        let status = match err {
            GatewayError::Upstream { status } => Some(*status),
            _ => None,
        };
        Self {
            error: err.to_string(),
            status,
        }
    }
}
