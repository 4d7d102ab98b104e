use std::fmt;
use std::str::FromStr;

use super::ParamError;

/// How strongly the generator follows the audio conditioning.
///
/// Higher values tighten lip alignment but can introduce distortion or jitter.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct GuidanceScale(f64);

impl GuidanceScale {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 3.0;
    pub const STEP: f64 = 0.1;
    pub const DEFAULT: f64 = 1.5;

    pub fn new(value: f64) -> Result<Self, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NotANumber {
                name: "guidance_scale",
                value: value.to_string(),
            });
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ParamError::OutOfRange {
                name: "guidance_scale",
                min: Self::MIN.to_string(),
                max: Self::MAX.to_string(),
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for GuidanceScale {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl FromStr for GuidanceScale {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| ParamError::NotANumber {
            name: "guidance_scale",
            value: s.to_string(),
        })?;
        Self::new(value)
    }
}

/// Renders the way the inference script's argument parser expects floats:
/// integral values keep a trailing `.0`.
impl fmt::Display for GuidanceScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.0.to_string();
        if rendered.contains('.') {
            f.write_str(&rendered)
        } else {
            write!(f, "{}.0", rendered)
        }
    }
}
