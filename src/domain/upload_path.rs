use std::fmt;
use std::path::Path;

use uuid::Uuid;

use super::MediaKind;

const FALLBACK_NAME: &str = "upload";

/// Key of an uploaded file inside the upload store: `{upload_id}/{kind}/{file_name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPath(String);

impl UploadPath {
    /// Only the final component of `file_name` is kept, with characters outside
    /// `[alnum - _ .]` replaced by `_`. The media kind gets its own directory so a video and
    /// an audio file with the same name never share a key.
    pub fn new(upload_id: Uuid, kind: MediaKind, file_name: &str) -> Self {
        let name = Path::new(file_name)
            .file_name()
            .map(|n| sanitize(&n.to_string_lossy()))
            .filter(|n| !n.trim_matches('.').is_empty())
            .unwrap_or_else(|| FALLBACK_NAME.to_string());
        Self(format!("{}/{}/{}", upload_id, kind.as_str(), name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
