use std::path::Path;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "m4v"];
const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "m4a", "aac", "ogg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            m if m.starts_with("video/") => Some(Self::Video),
            m if m.starts_with("audio/") => Some(Self::Audio),
            _ => None,
        }
    }

    pub fn from_extension(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name)
            .extension()?
            .to_string_lossy()
            .to_lowercase();
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Audio)
        } else {
            None
        }
    }

    /// Browsers often send `application/octet-stream`; fall back to the file extension then.
    pub fn detect(mime: Option<&str>, file_name: &str) -> Option<Self> {
        mime.and_then(Self::from_mime)
            .or_else(|| Self::from_extension(file_name))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}
