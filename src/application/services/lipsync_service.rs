use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;

use crate::application::ports::{InferenceError, InferenceRunner};
use crate::application::services::inference_args::{InferenceOptions, create_args};
use crate::domain::{InferenceParams, MediaPath, OutputFileName};

pub struct LipSyncService {
    runner: Arc<dyn InferenceRunner>,
    options: InferenceOptions,
    output_dir: PathBuf,
    gate: Mutex<()>,
}

impl LipSyncService {
    pub fn new(
        runner: Arc<dyn InferenceRunner>,
        options: InferenceOptions,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            runner,
            options,
            output_dir,
            gate: Mutex::new(()),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs lip-sync on `video_path` driven by `audio_path` and returns the generated video's path.
    ///
    /// Only one run is in flight at a time; concurrent callers wait their turn.
    #[tracing::instrument(skip(self), fields(video = %video_path.display(), audio = %audio_path.display()))]
    pub async fn process_video(
        &self,
        video_path: &Path,
        audio_path: &Path,
        params: InferenceParams,
    ) -> Result<PathBuf, LipSyncError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;

        ensure_exists(video_path).await?;
        ensure_exists(audio_path).await?;

        let video = MediaPath::resolve(video_path)?;
        let audio = MediaPath::resolve(audio_path)?;

        let _turn = self.gate.lock().await;

        let file_name = OutputFileName::new(video_path, Local::now().naive_local());
        let output = MediaPath::resolve(self.unused_output_path(&file_name).await?)?;

        let args = create_args(
            &self.options,
            &video,
            &audio,
            &output,
            params.inference_steps,
            params.guidance_scale,
            params.seed,
        )?;

        tracing::debug!(args = ?args.to_cli_args(), "Starting inference");

        match self.runner.run(&args).await {
            Ok(()) => {
                tracing::info!(output_path = %output, "Processing completed successfully.");
                Ok(output.as_path().to_path_buf())
            }
            Err(e) => {
                tracing::error!(error = %e, "Error during processing");
                Err(LipSyncError::Processing(e))
            }
        }
    }

    /// Called with the gate held, so no other run can claim the same name meanwhile.
    async fn unused_output_path(
        &self,
        file_name: &OutputFileName,
    ) -> Result<PathBuf, LipSyncError> {
        let mut candidate = self.output_dir.join(file_name.as_str());
        let mut n = 1;
        while tokio::fs::try_exists(&candidate).await? {
            candidate = self.output_dir.join(file_name.numbered(n).as_str());
            n += 1;
        }
        Ok(candidate)
    }
}

async fn ensure_exists(path: &Path) -> Result<(), LipSyncError> {
    match tokio::fs::try_exists(path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(LipSyncError::MissingInput(path.display().to_string())),
        Err(e) => Err(LipSyncError::Io(e)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LipSyncError {
    #[error("input file not found: {0}")]
    MissingInput(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error during processing: {0}")]
    Processing(InferenceError),
}
