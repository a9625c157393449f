//! Repository upload types: the `POST /api/git-to-s3` request, the validated
//! job derived from it, and the success receipt.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Key prefix used when the request does not name one.
pub const DEFAULT_KEY_PREFIX: &str = "git-repo";

/// Message returned in every successful upload receipt.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Repository uploaded to S3 successfully";

/// Validation message for a request missing its repository URL or bucket.
pub const MISSING_FIELDS_MESSAGE: &str = "repo_url and bucket_name are required";

/// Body of `POST /api/git-to-s3`, as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub repo_url: Option<String>,

    #[serde(default)]
    pub bucket_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_key: Option<String>,
}

impl UploadRequest {
    pub fn new(
        repo_url: impl Into<String>,
        bucket_name: impl Into<String>,
        s3_key: Option<String>,
    ) -> Self {
        Self {
            repo_url: Some(repo_url.into()),
            bucket_name: Some(bucket_name.into()),
            s3_key,
        }
    }

    /// Check required fields and produce an [`UploadJob`].
    ///
    /// Blank values count as missing. A blank key prefix falls back to
    /// [`DEFAULT_KEY_PREFIX`].
    pub fn validate(self) -> Result<UploadJob, GatewayError> {
        let repo_url = non_blank(self.repo_url);
        let bucket = non_blank(self.bucket_name);

        let (Some(repo_url), Some(bucket)) = (repo_url, bucket) else {
            return Err(GatewayError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        };

        let key_prefix = non_blank(self.s3_key).unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string());

        Ok(UploadJob {
            repo_url,
            bucket,
            key_prefix,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A validated upload: clone `repo_url`, write every file under
/// `{key_prefix}/` in `bucket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub repo_url: String,
    pub bucket: String,
    pub key_prefix: String,
}

impl UploadJob {
    /// Destination key for a file at `relative_path` inside the clone.
    ///
    /// `relative_path` must already use `/` separators.
    pub fn object_key(&self, relative_path: &str) -> String {
        format!("{}/{}", self.key_prefix, relative_path)
    }

    pub fn receipt(&self) -> UploadReceipt {
        UploadReceipt {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            bucket: self.bucket.clone(),
            s3_key: self.key_prefix.clone(),
        }
    }
}

/// Success payload of `POST /api/git-to-s3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub message: String,
    pub bucket: String,
    pub s3_key: String,
}
