//! Application state wiring the gateway services together.
//!
//! Services are generic over their port traits; AppState pins them to the
//! concrete infra implementations. Built once from the startup settings and
//! shared (immutably) by every request handler.

use std::sync::Arc;

use tracing::{info, warn};

use difygate_core::chat::service::ChatService;
use difygate_core::upload::service::UploadService;
use difygate_infra::config::GatewaySettings;
use difygate_infra::dify::DifyClient;
use difygate_infra::git::Git2Cloner;
use difygate_infra::storage::S3ObjectStore;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<DifyClient>;

pub type ConcreteUploadService = UploadService<Git2Cloner, S3ObjectStore>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub upload_service: Arc<ConcreteUploadService>,
}

impl AppState {
    /// Wire services from the startup settings.
    pub fn from_settings(settings: GatewaySettings) -> anyhow::Result<Self> {
        let GatewaySettings {
            dify,
            storage,
            scratch_dir,
        } = settings;

        let dify_client = DifyClient::new(dify.api_key, dify.base_url.clone())?;
        if !dify_client.has_api_key() {
            warn!("DIFY_API_KEY is not set; chat requests will fail");
        }
        let chat_service = ChatService::new(dify_client, dify.user);

        let store = storage.as_ref().map(S3ObjectStore::new);
        if store.is_none() {
            warn!("AWS credentials are not set; repository upload is disabled");
        }
        let mut upload_service = UploadService::new(Git2Cloner::new(), store);
        if let Some(root) = scratch_dir {
            upload_service = upload_service.with_scratch_root(root);
        }

        info!(
            dify_base_url = %dify.base_url,
            upload_enabled = upload_service.is_enabled(),
            region = storage.as_ref().map(|s| s.region.as_str()).unwrap_or("-"),
            "Gateway configured"
        );

        Ok(Self {
            chat_service: Arc::new(chat_service),
            upload_service: Arc::new(upload_service),
        })
    }
}
