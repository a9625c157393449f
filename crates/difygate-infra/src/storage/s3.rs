//! S3ObjectStore -- concrete [`ObjectStore`] implementation for AWS S3.
//!
//! Built from static credentials loaded at startup. The SDK client is
//! cheap to clone and safe to share between concurrent uploads; each
//! request signs with the same read-only credentials.

use std::path::Path;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use secrecy::ExposeSecret;

use difygate_core::upload::ports::ObjectStore;
use difygate_types::error::StorageError;

use crate::config::StorageCredentials;

/// Provider name attached to the static credentials.
const CREDENTIALS_PROVIDER: &str = "difygate-env";

/// S3 (or S3-compatible) object store.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(credentials: &StorageCredentials) -> Self {
        let static_credentials = Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.expose_secret(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(credentials.region.clone()))
            .credentials_provider(static_credentials);

        if let Some(endpoint) = &credentials.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: aws_sdk_s3::Client::from_conf(builder.build()),
        }
    }
}

impl ObjectStore for S3ObjectStore {
    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| StorageError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| StorageError::Upload {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Bytes;
    use axum::extract::State;
    use axum::http::{Method, StatusCode, Uri};
    use secrecy::SecretString;

    use super::*;
    use crate::stub;

    type Seen = Arc<Mutex<Vec<(Method, String, Vec<u8>)>>>;

    fn credentials(endpoint: String) -> StorageCredentials {
        StorageCredentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: SecretString::from("wJalrXUtnFEMI/K7MDENG".to_string()),
            region: "ap-northeast-1".to_string(),
            endpoint_url: Some(endpoint),
        }
    }

    async fn accept(State(seen): State<Seen>, method: Method, uri: Uri, body: Bytes) -> StatusCode {
        seen.lock()
            .unwrap()
            .push((method, uri.path().to_string(), body.to_vec()));
        StatusCode::OK
    }

    fn source_file(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_put_file_uses_path_style_key() {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let base = stub::serve(Router::new().fallback(accept).with_state(seen.clone())).await;
        let store = S3ObjectStore::new(&credentials(base));
        let file = source_file(b"fn main() {}\n");

        store
            .put_file("bucket-a", "git-repo/src/main.rs", file.path())
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        let (method, path, body) = seen.last().unwrap();
        assert_eq!(*method, Method::PUT);
        assert_eq!(path, "/bucket-a/git-repo/src/main.rs");
        let body = String::from_utf8_lossy(body);
        assert!(body.contains("fn main() {}"));
    }

    #[tokio::test]
    async fn test_put_file_rejection_is_upload_error() {
        let router = Router::new().fallback(|| async {
            (
                StatusCode::FORBIDDEN,
                [("content-type", "application/xml")],
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
                 <Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>",
            )
        });
        let base = stub::serve(router).await;
        let store = S3ObjectStore::new(&credentials(base));
        let file = source_file(b"hi");

        let err = store
            .put_file("bucket-a", "git-repo/README.md", file.path())
            .await
            .unwrap_err();

        match err {
            StorageError::Upload { bucket, key, message } => {
                assert_eq!(bucket, "bucket-a");
                assert_eq!(key, "git-repo/README.md");
                assert!(message.contains("AccessDenied"));
            }
            other => panic!("expected upload error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_put_file_missing_source_is_read_error() {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let base = stub::serve(Router::new().fallback(accept).with_state(seen.clone())).await;
        let store = S3ObjectStore::new(&credentials(base));
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("gone.txt");

        let err = store
            .put_file("bucket-a", "git-repo/gone.txt", &missing)
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Read { ref path, .. } if path.ends_with("gone.txt")));
        assert!(seen.lock().unwrap().is_empty());
    }
}
