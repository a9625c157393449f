//! Process configuration loaded from the environment.
//!
//! Settings are read once at startup (after an optional `.env` file is
//! applied) into immutable values. Blank variables count as unset.
//! Nothing here is reloaded while the process runs.

use std::path::PathBuf;

use difygate_types::config::ConfigStatus;
use secrecy::SecretString;

pub const DEFAULT_DIFY_BASE_URL: &str = "https://api.dify.ai/v1";
pub const DEFAULT_DIFY_USER: &str = "user";
pub const DEFAULT_AWS_REGION: &str = "ap-northeast-1";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Apply a `.env` file from the working directory (or a parent), if any.
///
/// Variables already present in the environment win.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(err) if err.not_found() => tracing::debug!("No .env file found"),
        Err(err) => tracing::warn!(error = %err, "Failed to load .env file"),
    }
}

/// Upstream Dify API settings.
#[derive(Debug)]
pub struct DifySettings {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    /// End-user identifier sent with every chat request.
    pub user: String,
}

/// Object storage credentials. Present only when both keys are set.
#[derive(Debug)]
pub struct StorageCredentials {
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    pub region: String,
    /// Override for S3-compatible stores; enables path-style addressing.
    pub endpoint_url: Option<String>,
}

/// Everything the gateway service needs at startup.
#[derive(Debug)]
pub struct GatewaySettings {
    pub dify: DifySettings,
    /// `None` disables the upload operation.
    pub storage: Option<StorageCredentials>,
    /// Where per-upload clone directories are created. OS temp dir if unset.
    pub scratch_dir: Option<PathBuf>,
}

impl GatewaySettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let dify = DifySettings {
            api_key: var("DIFY_API_KEY").map(SecretString::from),
            base_url: var("DIFY_BASE_URL").unwrap_or_else(|| DEFAULT_DIFY_BASE_URL.to_string()),
            user: var("DIFY_USER").unwrap_or_else(|| DEFAULT_DIFY_USER.to_string()),
        };

        let storage = match (var("AWS_ACCESS_KEY_ID"), var("AWS_SECRET_ACCESS_KEY")) {
            (Some(access_key_id), Some(secret)) => Some(StorageCredentials {
                access_key_id,
                secret_access_key: SecretString::from(secret),
                region: var("AWS_REGION").unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
                endpoint_url: var("AWS_ENDPOINT_URL"),
            }),
            _ => None,
        };

        Self {
            dify,
            storage,
            scratch_dir: var("DIFYGATE_SCRATCH_DIR").map(PathBuf::from),
        }
    }
}

/// Configuration presence as seen from the client's environment.
pub fn config_status(backend_url: &str) -> ConfigStatus {
    config_status_from_lookup(backend_url, |key| std::env::var(key).ok())
}

pub fn config_status_from_lookup(
    backend_url: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> ConfigStatus {
    let set = |key: &str| lookup(key).is_some_and(|v| !v.trim().is_empty());

    ConfigStatus {
        backend_url: backend_url.to_string(),
        dify_api_key: set("DIFY_API_KEY"),
        aws_access_key_id: set("AWS_ACCESS_KEY_ID"),
        aws_secret_access_key: set("AWS_SECRET_ACCESS_KEY"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = GatewaySettings::from_lookup(lookup(&[]));
        assert!(settings.dify.api_key.is_none());
        assert_eq!(settings.dify.base_url, DEFAULT_DIFY_BASE_URL);
        assert_eq!(settings.dify.user, "user");
        assert!(settings.storage.is_none());
        assert!(settings.scratch_dir.is_none());
    }

    #[test]
    fn test_storage_requires_both_keys() {
        let only_id = GatewaySettings::from_lookup(lookup(&[("AWS_ACCESS_KEY_ID", "AKIA")]));
        assert!(only_id.storage.is_none());

        let blank_secret = GatewaySettings::from_lookup(lookup(&[
            ("AWS_ACCESS_KEY_ID", "AKIA"),
            ("AWS_SECRET_ACCESS_KEY", "   "),
        ]));
        assert!(blank_secret.storage.is_none());

        let both = GatewaySettings::from_lookup(lookup(&[
            ("AWS_ACCESS_KEY_ID", "AKIA"),
            ("AWS_SECRET_ACCESS_KEY", "shh"),
        ]));
        let storage = both.storage.unwrap();
        assert_eq!(storage.access_key_id, "AKIA");
        assert_eq!(storage.secret_access_key.expose_secret(), "shh");
        assert_eq!(storage.region, DEFAULT_AWS_REGION);
        assert!(storage.endpoint_url.is_none());
    }

    #[test]
    fn test_overrides() {
        let settings = GatewaySettings::from_lookup(lookup(&[
            ("DIFY_API_KEY", "app-123"),
            ("DIFY_BASE_URL", "http://dify.internal/v1"),
            ("DIFY_USER", "gateway"),
            ("AWS_ACCESS_KEY_ID", "AKIA"),
            ("AWS_SECRET_ACCESS_KEY", "shh"),
            ("AWS_REGION", "us-east-1"),
            ("AWS_ENDPOINT_URL", "http://localhost:9000"),
            ("DIFYGATE_SCRATCH_DIR", "/var/tmp/difygate"),
        ]));

        assert_eq!(settings.dify.api_key.unwrap().expose_secret(), "app-123");
        assert_eq!(settings.dify.base_url, "http://dify.internal/v1");
        assert_eq!(settings.dify.user, "gateway");
        let storage = settings.storage.unwrap();
        assert_eq!(storage.region, "us-east-1");
        assert_eq!(storage.endpoint_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(settings.scratch_dir, Some(PathBuf::from("/var/tmp/difygate")));
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let settings = GatewaySettings::from_lookup(lookup(&[
            ("DIFY_API_KEY", "app-very-secret"),
            ("AWS_ACCESS_KEY_ID", "AKIA"),
            ("AWS_SECRET_ACCESS_KEY", "aws-very-secret"),
        ]));
        let debug = format!("{settings:?}");
        assert!(!debug.contains("app-very-secret"));
        assert!(!debug.contains("aws-very-secret"));
    }

    #[test]
    fn test_config_status_reports_presence_only() {
        let status = config_status_from_lookup(
            "http://localhost:5000",
            lookup(&[("DIFY_API_KEY", "app-123"), ("AWS_ACCESS_KEY_ID", "")]),
        );
        assert!(status.dify_api_key);
        assert!(!status.aws_access_key_id);
        assert!(!status.aws_secret_access_key);
        assert_eq!(status.backend_url, "http://localhost:5000");
    }
}
