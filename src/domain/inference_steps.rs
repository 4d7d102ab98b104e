use std::fmt;
use std::str::FromStr;

use super::ParamError;

/// Number of denoising steps. More steps trade speed for quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InferenceSteps(u32);

impl InferenceSteps {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 50;
    pub const STEP: u32 = 1;
    pub const DEFAULT: u32 = 20;

    pub fn new(value: u32) -> Result<Self, ParamError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ParamError::OutOfRange {
                name: "inference_steps",
                min: Self::MIN.to_string(),
                max: Self::MAX.to_string(),
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for InferenceSteps {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl FromStr for InferenceSteps {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // Sliders post integral floats such as "20.0".
        let value = match trimmed.parse::<u32>() {
            Ok(v) => v,
            Err(_) => {
                let float: f64 = trimmed.parse().map_err(|_| ParamError::NotANumber {
                    name: "inference_steps",
                    value: s.to_string(),
                })?;
                if float.fract() != 0.0 || float < 0.0 || float > u32::MAX as f64 {
                    return Err(ParamError::NotANumber {
                        name: "inference_steps",
                        value: s.to_string(),
                    });
                }
                float as u32
            }
        };
        Self::new(value)
    }
}

impl fmt::Display for InferenceSteps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
