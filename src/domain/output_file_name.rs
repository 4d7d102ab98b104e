use std::fmt;
use std::path::Path;

use chrono::NaiveDateTime;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const FALLBACK_STEM: &str = "video";
const EXTENSION: &str = ".mp4";

/// File name of a generated video: `{video_stem}_{YYYYmmdd_HHMMSS}.mp4`, or
/// `{video_stem}_{YYYYmmdd_HHMMSS}_{n}.mp4` when that name is already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFileName(String);

impl OutputFileName {
    pub fn new(video_path: &Path, timestamp: NaiveDateTime) -> Self {
        let stem = video_path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| FALLBACK_STEM.into());

        Self(format!("{}_{}.mp4", stem, timestamp.format(TIMESTAMP_FORMAT)))
    }

    /// The `n`-th alternative to this name, for when the plain one already exists.
    pub fn numbered(&self, n: u32) -> Self {
        let base = self.0.strip_suffix(EXTENSION).unwrap_or(&self.0);
        Self(format!("{}_{}{}", base, n, EXTENSION))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OutputFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
