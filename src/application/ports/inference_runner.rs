use async_trait::async_trait;

use crate::application::services::InferenceArgs;

/// Runs the external lip-sync inference routine to completion.
#[async_trait]
pub trait InferenceRunner: Send + Sync {
    async fn run(&self, args: &InferenceArgs) -> Result<(), InferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("failed to start inference process: {0}")]
    Spawn(String),
    #[error("inference failed ({status}): {stderr}")]
    Failed { status: String, stderr: String },
    #[error("inference finished but produced no output at {0}")]
    MissingOutput(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
