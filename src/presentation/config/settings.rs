use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;
use crate::application::services::InferenceOptions;
use crate::infrastructure::inference::InferenceBackend;
use crate::infrastructure::observability::TracingConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub inference: InferenceSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Clone, Deserialize)]
pub struct AuthSettings {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// `mock` (scaffold mode) echoes the input video instead of running the model, for UI work
/// without a GPU or checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Python,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceSettings {
    pub backend: BackendKind,
    pub mock_delay_ms: u64,
    pub python: String,
    pub module: String,
    pub working_dir: Option<String>,
    pub unet_config_path: String,
    pub checkpoint_path: String,
    pub temp_dir: String,
    pub enable_deepcache: bool,
    pub default_seed: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub upload_dir: String,
    pub output_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid server address: {0}")]
    InvalidAddress(String),
    #[error("auth.password must be set (APP_AUTH__PASSWORD)")]
    MissingPassword,
}

impl Settings {
    /// Layers built-in defaults, `appsettings.{environment}` (optional) and `APP_*` variables.
    ///
    /// Nested keys use a double underscore: `APP_AUTH__PASSWORD`, `APP_SERVER__PORT`.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let builder = Self::defaults(Config::builder())?
            .add_source(File::with_name(&environment.settings_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let options = InferenceOptions::default();
        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 7860)?
            .set_default("server.max_upload_mb", 1024)?
            .set_default("auth.username", "admin")?
            .set_default("auth.password", "")?
            .set_default("inference.backend", "python")?
            .set_default("inference.mock_delay_ms", 0)?
            .set_default("inference.python", "python")?
            .set_default("inference.module", "scripts.inference")?
            .set_default(
                "inference.unet_config_path",
                options.unet_config_path.to_string_lossy().into_owned(),
            )?
            .set_default(
                "inference.checkpoint_path",
                options.checkpoint_path.to_string_lossy().into_owned(),
            )?
            .set_default("inference.temp_dir", options.temp_dir)?
            .set_default("inference.enable_deepcache", options.enable_deepcache)?
            .set_default("inference.default_seed", crate::domain::Seed::DEFAULT as i64)?
            .set_default("storage.upload_dir", "./uploads")?
            .set_default("storage.output_dir", "./temp")?
            .set_default("logging.level", TracingConfig::DEFAULT_FILTER)?
            .set_default("logging.enable_json", false)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.auth.password.is_empty() {
            return Err(SettingsError::MissingPassword);
        }
        self.server.socket_addr().map(|_| ())
    }

    pub fn inference_backend(&self) -> InferenceBackend {
        match self.inference.backend {
            BackendKind::Mock => InferenceBackend::Mock {
                delay: Duration::from_millis(self.inference.mock_delay_ms),
            },
            BackendKind::Python => InferenceBackend::Python {
                python: self.inference.python.clone(),
                module: self.inference.module.clone(),
                working_dir: self.inference.working_dir.as_ref().map(PathBuf::from),
            },
        }
    }

    pub fn inference_options(&self) -> InferenceOptions {
        InferenceOptions {
            unet_config_path: PathBuf::from(&self.inference.unet_config_path),
            checkpoint_path: PathBuf::from(&self.inference.checkpoint_path),
            temp_dir: self.inference.temp_dir.clone(),
            enable_deepcache: self.inference.enable_deepcache,
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| SettingsError::InvalidAddress(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
