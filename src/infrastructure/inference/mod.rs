mod inference_runner_factory;
mod mock_inference_runner;
mod python_inference_runner;

pub use inference_runner_factory::{InferenceBackend, InferenceRunnerFactory};
pub use mock_inference_runner::MockInferenceRunner;
pub use python_inference_runner::PythonInferenceRunner;
