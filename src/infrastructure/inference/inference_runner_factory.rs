use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::InferenceRunner;

use super::mock_inference_runner::MockInferenceRunner;
use super::python_inference_runner::PythonInferenceRunner;

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceBackend {
    Python {
        python: String,
        module: String,
        working_dir: Option<PathBuf>,
    },
    Mock {
        delay: Duration,
    },
}

pub struct InferenceRunnerFactory;

impl InferenceRunnerFactory {
    pub fn create(backend: InferenceBackend) -> Arc<dyn InferenceRunner> {
        match backend {
            InferenceBackend::Python {
                python,
                module,
                working_dir,
            } => Arc::new(PythonInferenceRunner::new(python, module, working_dir)),
            InferenceBackend::Mock { delay } => Arc::new(MockInferenceRunner::new(delay)),
        }
    }
}
