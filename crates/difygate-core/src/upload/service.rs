//! Upload service: repository clone → object storage copy.
//!
//! Each call owns a fresh scratch directory for its clone. The directory is a
//! [`tempfile::TempDir`], so it is removed when the call returns on any path,
//! including when the request future is dropped mid-flight.
//!
//! Uploads are independent per file. A failure part-way through leaves the
//! objects already written in place; nothing is rolled back.

use std::path::{Path, PathBuf};

use difygate_types::error::GatewayError;
use difygate_types::upload::{UploadJob, UploadReceipt, UploadRequest};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::upload::ports::{ObjectStore, RepoCloner};
use crate::upload::tree::collect_files;

/// Configuration error reported when object storage is disabled.
pub const STORAGE_NOT_CONFIGURED_MESSAGE: &str = "AWS credentials not configured";

const SCRATCH_PREFIX: &str = "difygate-clone-";

/// Clones repositories and copies them into object storage.
///
/// `store` is `None` when no storage credentials were configured; every
/// upload then fails with a configuration error before touching the network.
pub struct UploadService<C: RepoCloner, S: ObjectStore> {
    cloner: C,
    store: Option<S>,
    scratch_root: Option<PathBuf>,
}

impl<C: RepoCloner, S: ObjectStore> UploadService<C, S> {
    /// Create an upload service. Scratch directories go in the OS temp dir.
    pub fn new(cloner: C, store: Option<S>) -> Self {
        Self {
            cloner,
            store,
            scratch_root: None,
        }
    }

    /// Create scratch directories under `root` instead of the OS temp dir.
    pub fn with_scratch_root(mut self, root: PathBuf) -> Self {
        self.scratch_root = Some(root);
        self
    }

    /// Whether object storage is configured.
    pub fn is_enabled(&self) -> bool {
        self.store.is_some()
    }

    /// Access the object store, if configured.
    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    /// Validate, clone, upload every file, then tear down the clone.
    pub async fn upload(&self, request: UploadRequest) -> Result<UploadReceipt, GatewayError> {
        let job = request.validate()?;

        let Some(store) = &self.store else {
            warn!("Upload requested but object storage is not configured");
            return Err(GatewayError::Configuration(
                STORAGE_NOT_CONFIGURED_MESSAGE.to_string(),
            ));
        };

        let scratch = self
            .scratch_dir()
            .map_err(|e| GatewayError::Internal(format!("failed to create scratch directory: {e}")))?;

        let outcome = self.copy_repository(store, &job, scratch.path()).await;

        let scratch_path = scratch.path().to_path_buf();
        match tokio::task::spawn_blocking(move || scratch.close()).await {
            Ok(Ok(())) => debug!(path = %scratch_path.display(), "Removed scratch directory"),
            Ok(Err(e)) => warn!(path = %scratch_path.display(), error = %e, "Failed to remove scratch directory"),
            Err(e) => warn!(path = %scratch_path.display(), error = %e, "Scratch cleanup task failed"),
        }

        outcome
    }

    fn scratch_dir(&self) -> std::io::Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRATCH_PREFIX);
        match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }

    async fn copy_repository(
        &self,
        store: &S,
        job: &UploadJob,
        clone_dir: &Path,
    ) -> Result<UploadReceipt, GatewayError> {
        info!(
            repo = %job.repo_url,
            bucket = %job.bucket,
            prefix = %job.key_prefix,
            "Cloning repository for upload"
        );

        self.cloner
            .clone_repository(&job.repo_url, clone_dir)
            .await
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        let root = clone_dir.to_path_buf();
        let files = tokio::task::spawn_blocking(move || collect_files(&root))
            .await
            .map_err(|e| GatewayError::Internal(format!("tree walk task failed: {e}")))?
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        for file in &files {
            let key = job.object_key(&file.relative);
            store
                .put_file(&job.bucket, &key, &file.path)
                .await
                .map_err(|e| GatewayError::Internal(e.to_string()))?;
            debug!(key = %key, "Uploaded object");
        }

        info!(
            objects = files.len(),
            bucket = %job.bucket,
            prefix = %job.key_prefix,
            "Repository uploaded"
        );

        Ok(job.receipt())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use difygate_types::error::{CloneError, StorageError};

    use super::*;

    /// Cloner fake that materializes a fixed tree and remembers where.
    struct FixtureCloner {
        files: Vec<(&'static str, &'static [u8])>,
        fail: bool,
        calls: AtomicUsize,
        last_dest: Mutex<Option<PathBuf>>,
    }

    impl FixtureCloner {
        fn with_files(files: Vec<(&'static str, &'static [u8])>) -> Self {
            Self {
                files,
                fail: false,
                calls: AtomicUsize::new(0),
                last_dest: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::with_files(Vec::new())
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_dest(&self) -> Option<PathBuf> {
            self.last_dest.lock().unwrap().clone()
        }
    }

    impl RepoCloner for FixtureCloner {
        async fn clone_repository(&self, url: &str, dest: &Path) -> Result<(), CloneError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_dest.lock().unwrap() = Some(dest.to_path_buf());
            assert!(dest.is_dir(), "clone destination must exist");

            if self.fail {
                return Err(CloneError::Git {
                    url: url.to_string(),
                    message: "repository not found".to_string(),
                });
            }

            for (relative, bytes) in &self.files {
                let path = dest.join(relative);
                std::fs::create_dir_all(path.parent().unwrap()).unwrap();
                std::fs::write(path, bytes).unwrap();
            }
            Ok(())
        }
    }

    /// In-memory object store that can be told to fail on one key.
    #[derive(Default)]
    struct MemoryStore {
        objects: Mutex<Vec<(String, String, Vec<u8>)>>,
        fail_on: Option<&'static str>,
    }

    impl MemoryStore {
        fn objects(&self) -> Vec<(String, String, Vec<u8>)> {
            self.objects.lock().unwrap().clone()
        }
    }

    impl ObjectStore for MemoryStore {
        async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError> {
            if self.fail_on == Some(key) {
                return Err(StorageError::Upload {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                    message: "access denied".to_string(),
                });
            }
            let body = tokio::fs::read(path).await.map_err(|e| StorageError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
            self.objects
                .lock()
                .unwrap()
                .push((bucket.to_string(), key.to_string(), body));
            Ok(())
        }
    }

    fn fixture() -> Vec<(&'static str, &'static [u8])> {
        vec![
            ("README.md", &b"# demo\n"[..]),
            ("src/main.rs", &b"fn main() {}\n"[..]),
            (".git/HEAD", &b"ref: refs/heads/main\n"[..]),
            ("assets/logo.bin", &b"\x00\x9f\x92\x96\xff"[..]),
        ]
    }

    fn is_empty_dir(path: &Path) -> bool {
        std::fs::read_dir(path).unwrap().next().is_none()
    }

    #[tokio::test]
    async fn test_upload_writes_every_file_under_prefix() {
        let scratch = tempfile::TempDir::new().unwrap();
        let service = UploadService::new(
            FixtureCloner::with_files(fixture()),
            Some(MemoryStore::default()),
        )
        .with_scratch_root(scratch.path().to_path_buf());

        let receipt = service
            .upload(UploadRequest::new(
                "https://example.com/demo.git",
                "bucket-a",
                Some("snap".to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(receipt.bucket, "bucket-a");
        assert_eq!(receipt.s3_key, "snap");
        assert_eq!(receipt.message, "Repository uploaded to S3 successfully");

        let mut objects = service.store().unwrap().objects();
        objects.sort_by(|a, b| a.1.cmp(&b.1));
        assert_eq!(objects.len(), fixture().len());

        let mut expected = fixture();
        expected.sort_by_key(|(rel, _)| format!("snap/{rel}"));
        for ((bucket, key, body), (rel, bytes)) in objects.iter().zip(expected.iter()) {
            assert_eq!(bucket, "bucket-a");
            assert_eq!(key, &format!("snap/{rel}"));
            assert_eq!(body.as_slice(), *bytes);
        }
    }

    #[tokio::test]
    async fn test_scratch_directory_removed_after_success() {
        let scratch = tempfile::TempDir::new().unwrap();
        let service = UploadService::new(
            FixtureCloner::with_files(fixture()),
            Some(MemoryStore::default()),
        )
        .with_scratch_root(scratch.path().to_path_buf());

        service
            .upload(UploadRequest::new("u", "b", None))
            .await
            .unwrap();

        let dest = service.cloner.last_dest().unwrap();
        assert!(dest.starts_with(scratch.path()));
        assert!(!dest.exists());
        assert!(is_empty_dir(scratch.path()));
    }

    #[tokio::test]
    async fn test_clone_failure_is_internal_and_cleans_up() {
        let scratch = tempfile::TempDir::new().unwrap();
        let service = UploadService::new(FixtureCloner::failing(), Some(MemoryStore::default()))
            .with_scratch_root(scratch.path().to_path_buf());

        let err = service
            .upload(UploadRequest::new("https://example.com/missing.git", "b", None))
            .await
            .unwrap_err();

        match err {
            GatewayError::Internal(msg) => assert!(msg.contains("repository not found")),
            other => panic!("expected internal error, got {other:?}"),
        }
        assert!(!service.cloner.last_dest().unwrap().exists());
        assert!(is_empty_dir(scratch.path()));
        assert!(service.store().unwrap().objects().is_empty());
    }

    #[tokio::test]
    async fn test_upload_failure_leaves_partial_prefix_and_cleans_up() {
        let scratch = tempfile::TempDir::new().unwrap();
        let store = MemoryStore {
            fail_on: Some("git-repo/src/main.rs"),
            ..MemoryStore::default()
        };
        let service = UploadService::new(FixtureCloner::with_files(fixture()), Some(store))
            .with_scratch_root(scratch.path().to_path_buf());

        let err = service
            .upload(UploadRequest::new("u", "b", None))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Internal(ref m) if m.contains("access denied")));
        // Files sorted before the failing key were already written.
        let keys: Vec<String> = service
            .store()
            .unwrap()
            .objects()
            .into_iter()
            .map(|(_, key, _)| key)
            .collect();
        assert!(!keys.is_empty());
        assert!(!keys.contains(&"git-repo/src/main.rs".to_string()));
        assert!(is_empty_dir(scratch.path()));
    }

    #[tokio::test]
    async fn test_missing_fields_do_nothing() {
        let scratch = tempfile::TempDir::new().unwrap();
        let service = UploadService::new(
            FixtureCloner::with_files(fixture()),
            Some(MemoryStore::default()),
        )
        .with_scratch_root(scratch.path().to_path_buf());

        let no_url = UploadRequest {
            bucket_name: Some("b".to_string()),
            ..UploadRequest::default()
        };
        let no_bucket = UploadRequest {
            repo_url: Some("u".to_string()),
            ..UploadRequest::default()
        };

        for request in [no_url, no_bucket, UploadRequest::default()] {
            let err = service.upload(request).await.unwrap_err();
            assert!(matches!(err, GatewayError::Validation(_)));
        }

        assert_eq!(service.cloner.calls(), 0);
        assert!(service.store().unwrap().objects().is_empty());
        assert!(is_empty_dir(scratch.path()));
    }

    #[tokio::test]
    async fn test_unconfigured_storage_never_clones() {
        let scratch = tempfile::TempDir::new().unwrap();
        let service: UploadService<FixtureCloner, MemoryStore> =
            UploadService::new(FixtureCloner::with_files(fixture()), None)
                .with_scratch_root(scratch.path().to_path_buf());

        assert!(!service.is_enabled());
        let err = service
            .upload(UploadRequest::new("u", "b", None))
            .await
            .unwrap_err();

        assert!(
            matches!(err, GatewayError::Configuration(ref m) if m == STORAGE_NOT_CONFIGURED_MESSAGE)
        );
        assert_eq!(service.cloner.calls(), 0);
        assert!(is_empty_dir(scratch.path()));
    }

    #[tokio::test]
    async fn test_validation_checked_before_configuration() {
        let service: UploadService<FixtureCloner, MemoryStore> =
            UploadService::new(FixtureCloner::with_files(Vec::new()), None);

        let err = service.upload(UploadRequest::default()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation(_)));
    }
}
