use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use lipsync::application::services::LipSyncService;
use lipsync::domain::Seed;
use lipsync::infrastructure::inference::{InferenceBackend, InferenceRunnerFactory};
use lipsync::infrastructure::observability::{TracingConfig, init_tracing};
use lipsync::infrastructure::storage::LocalUploadStore;
use lipsync::presentation::{
    AppState, BasicAuthCredentials, Environment, Settings, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;
    let addr = settings.server.socket_addr()?;

    let tracing_config = TracingConfig {
        environment: environment.to_string(),
        json_format: settings.logging.enable_json,
        default_filter: settings.logging.level.clone(),
    };
    init_tracing(&tracing_config, addr);

    let backend = settings.inference_backend();
    if matches!(backend, InferenceBackend::Mock { .. }) {
        tracing::warn!("Scaffold mode enabled: inference is mocked");
    }
    let runner = InferenceRunnerFactory::create(backend);

    let lipsync_service = Arc::new(LipSyncService::new(
        runner,
        settings.inference_options(),
        PathBuf::from(&settings.storage.output_dir),
    ));

    let upload_store = Arc::new(
        LocalUploadStore::new(PathBuf::from(&settings.storage.upload_dir))
            .context("Failed to prepare upload directory")?,
    );

    std::fs::create_dir_all(&settings.storage.output_dir)
        .context("Failed to prepare output directory")?;

    let state = AppState {
        lipsync_service,
        upload_store,
        credentials: Arc::new(BasicAuthCredentials::new(
            settings.auth.username.clone(),
            settings.auth.password.clone(),
        )),
        default_seed: Seed::new(settings.inference.default_seed),
        max_upload_bytes: settings.server.max_upload_bytes(),
    };

    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
