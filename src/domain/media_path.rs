use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// An absolute path rendered with forward slashes, as handed to the inference process.
///
/// Relative paths are resolved against the current directory. Symlinks are left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPath {
    path: PathBuf,
    posix: String,
}

impl MediaPath {
    pub fn resolve(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = std::path::absolute(path.as_ref())?;
        let posix = to_posix(&path);
        Ok(Self { path, posix })
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn as_posix(&self) -> &str {
        &self.posix
    }
}

impl fmt::Display for MediaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.posix)
    }
}

fn to_posix(path: &Path) -> String {
    let rendered = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '\\' {
        rendered.replace('\\', "/")
    } else {
        rendered.into_owned()
    }
}
