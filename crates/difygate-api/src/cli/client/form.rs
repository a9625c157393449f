//! Upload form for the interactive client.
//!
//! Collects the repository URL, bucket name, and key prefix one prompt at a
//! time. Any field may be left empty; the session decides whether the
//! submission is complete.

use difygate_types::upload::{DEFAULT_KEY_PREFIX, UploadRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    RepoUrl,
    BucketName,
    KeyPrefix,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::RepoUrl => "Git repository URL",
            FormField::BucketName => "S3 bucket name",
            FormField::KeyPrefix => "S3 key prefix",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::RepoUrl => "https://github.com/user/repo.git",
            FormField::BucketName => "my-bucket",
            FormField::KeyPrefix => DEFAULT_KEY_PREFIX,
        }
    }
}

/// In-progress upload form.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadForm {
    field: FormField,
    repo_url: String,
    bucket_name: String,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadForm {
    pub fn new() -> Self {
        Self {
            field: FormField::RepoUrl,
            repo_url: String::new(),
            bucket_name: String::new(),
        }
    }

    /// The field the next line fills.
    pub fn field(&self) -> FormField {
        self.field
    }

    /// Fill the current field. Returns the finished request after the last
    /// field and starts over.
    ///
    /// An empty key prefix means [`DEFAULT_KEY_PREFIX`].
    pub fn accept(&mut self, value: &str) -> Option<UploadRequest> {
        let value = value.trim();
        match self.field {
            FormField::RepoUrl => {
                self.repo_url = value.to_string();
                self.field = FormField::BucketName;
                None
            }
            FormField::BucketName => {
                self.bucket_name = value.to_string();
                self.field = FormField::KeyPrefix;
                None
            }
            FormField::KeyPrefix => {
                let key_prefix = if value.is_empty() {
                    DEFAULT_KEY_PREFIX.to_string()
                } else {
                    value.to_string()
                };
                let request = UploadRequest::new(
                    std::mem::take(&mut self.repo_url),
                    std::mem::take(&mut self.bucket_name),
                    Some(key_prefix),
                );
                *self = Self::new();
                Some(request)
            }
        }
    }
}
