use std::io;
use std::path::PathBuf;

use crate::domain::{GuidanceScale, InferenceSteps, MediaPath, Seed};

/// Fixed inputs of the inference routine that do not come from the user.
#[derive(Debug, Clone)]
pub struct InferenceOptions {
    pub unet_config_path: PathBuf,
    pub checkpoint_path: PathBuf,
    pub temp_dir: String,
    pub enable_deepcache: bool,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            unet_config_path: PathBuf::from("configs/unet/stage2_512.yaml"),
            checkpoint_path: PathBuf::from("checkpoints/latentsync_unet.pt"),
            temp_dir: "temp".to_string(),
            enable_deepcache: true,
        }
    }
}

/// Arguments of one invocation of the inference entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceArgs {
    pub unet_config_path: String,
    pub inference_ckpt_path: String,
    pub video_path: String,
    pub audio_path: String,
    pub video_out_path: String,
    pub inference_steps: InferenceSteps,
    pub guidance_scale: GuidanceScale,
    pub seed: Seed,
    pub temp_dir: String,
    pub enable_deepcache: bool,
}

impl InferenceArgs {
    /// Command-line form accepted by `scripts.inference`.
    pub fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec![
            "--unet_config_path".to_string(),
            self.unet_config_path.clone(),
            "--inference_ckpt_path".to_string(),
            self.inference_ckpt_path.clone(),
            "--video_path".to_string(),
            self.video_path.clone(),
            "--audio_path".to_string(),
            self.audio_path.clone(),
            "--video_out_path".to_string(),
            self.video_out_path.clone(),
            "--inference_steps".to_string(),
            self.inference_steps.to_string(),
            "--guidance_scale".to_string(),
            self.guidance_scale.to_string(),
            "--seed".to_string(),
            self.seed.to_string(),
            "--temp_dir".to_string(),
            self.temp_dir.clone(),
        ];
        if self.enable_deepcache {
            args.push("--enable_deepcache".to_string());
        }
        args
    }
}

/// Builds the argument set for one run. The checkpoint and config paths are made absolute.
pub fn create_args(
    options: &InferenceOptions,
    video_path: &MediaPath,
    audio_path: &MediaPath,
    output_path: &MediaPath,
    inference_steps: InferenceSteps,
    guidance_scale: GuidanceScale,
    seed: Seed,
) -> io::Result<InferenceArgs> {
    let checkpoint = MediaPath::resolve(&options.checkpoint_path)?;
    let unet_config = MediaPath::resolve(&options.unet_config_path)?;

    Ok(InferenceArgs {
        unet_config_path: unet_config.as_posix().to_string(),
        inference_ckpt_path: checkpoint.as_posix().to_string(),
        video_path: video_path.as_posix().to_string(),
        audio_path: audio_path.as_posix().to_string(),
        video_out_path: output_path.as_posix().to_string(),
        inference_steps,
        guidance_scale,
        seed,
        temp_dir: options.temp_dir.clone(),
        enable_deepcache: options.enable_deepcache,
    })
}
