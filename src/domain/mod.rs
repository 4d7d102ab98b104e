mod guidance_scale;
mod inference_params;
mod inference_steps;
mod media_kind;
mod media_path;
mod output_file_name;
mod param_error;
mod seed;
mod upload_path;

pub use guidance_scale::GuidanceScale;
pub use inference_params::InferenceParams;
pub use inference_steps::InferenceSteps;
pub use media_kind::MediaKind;
pub use media_path::MediaPath;
pub use output_file_name::OutputFileName;
pub use param_error::ParamError;
pub use seed::Seed;
pub use upload_path::UploadPath;
