use super::{GuidanceScale, InferenceSteps, Seed};

/// User-tunable hyperparameters for one lip-sync run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InferenceParams {
    pub guidance_scale: GuidanceScale,
    pub inference_steps: InferenceSteps,
    pub seed: Seed,
}

impl InferenceParams {
    pub fn new(guidance_scale: GuidanceScale, inference_steps: InferenceSteps, seed: Seed) -> Self {
        Self {
            guidance_scale,
            inference_steps,
            seed,
        }
    }
}
