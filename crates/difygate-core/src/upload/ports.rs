//! Port traits for the upload flow.
//!
//! Both traits use RPITIT (native async fn in traits, Rust 2024 edition).
//! Implementations live in difygate-infra.

use std::path::Path;

use difygate_types::error::{CloneError, StorageError};

/// Produces a full local copy of a remote repository.
pub trait RepoCloner: Send + Sync {
    /// Clone `url` into `dest`, which exists and is empty.
    ///
    /// Full clone: no depth limit, default branch only checked out.
    fn clone_repository(
        &self,
        url: &str,
        dest: &Path,
    ) -> impl std::future::Future<Output = Result<(), CloneError>> + Send;
}

/// Bucket + key byte store.
///
/// Must be safe to share across concurrent uploads.
pub trait ObjectStore: Send + Sync {
    /// Stream the file at `path` to `bucket` under `key`, replacing any
    /// existing object. The file is not buffered whole in memory.
    fn put_file(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}
