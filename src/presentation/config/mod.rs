mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AuthSettings, BackendKind, InferenceSettings, LoggingSettings, ServerSettings, Settings, SettingsError,
    StorageSettings,
};
