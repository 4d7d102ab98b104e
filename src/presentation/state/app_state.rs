use std::sync::Arc;

use crate::application::ports::UploadStore;
use crate::application::services::LipSyncService;
use crate::domain::Seed;
use crate::presentation::middleware::BasicAuthCredentials;

#[derive(Clone)]
pub struct AppState {
    pub lipsync_service: Arc<LipSyncService>,
    pub upload_store: Arc<dyn UploadStore>,
    pub credentials: Arc<BasicAuthCredentials>,
    pub default_seed: Seed,
    pub max_upload_bytes: usize,
}
