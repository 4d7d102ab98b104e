pub mod config;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod ui;

pub use config::{Environment, Settings, SettingsError};
pub use middleware::BasicAuthCredentials;
pub use router::create_router;
pub use state::AppState;
