mod inference_args;
mod lipsync_service;

pub use inference_args::{InferenceArgs, InferenceOptions, create_args};
pub use lipsync_service::{LipSyncError, LipSyncService};
