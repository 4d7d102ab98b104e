mod inference_runner;
mod upload_store;

pub use inference_runner::{InferenceError, InferenceRunner};
pub use upload_store::{UploadStore, UploadStoreError};
