use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{InferenceError, InferenceRunner};
use crate::application::services::InferenceArgs;

/// Stand-in for the model: copies the input video to the output path.
pub struct MockInferenceRunner {
    delay: Duration,
    failure: Option<String>,
}

impl MockInferenceRunner {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl InferenceRunner for MockInferenceRunner {
    async fn run(&self, args: &InferenceArgs) -> Result<(), InferenceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(message) = &self.failure {
            return Err(InferenceError::Failed {
                status: "exit status: 1".to_string(),
                stderr: message.clone(),
            });
        }

        tokio::fs::copy(&args.video_path, &args.video_out_path).await?;
        tracing::debug!(output = %args.video_out_path, "Mock inference wrote output");
        Ok(())
    }
}
