//! Build file loading

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SymdumpError};

/// A build file read fully into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
}

impl SourceFile {
    /// Read a build file, failing if it is missing or not UTF-8
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => SymdumpError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => SymdumpError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        })?;

        let mut text = String::from_utf8(bytes).map_err(|err| SymdumpError::Parse {
            path: path.to_path_buf(),
            reason: format!("not valid UTF-8 text ({})", err.utf8_error()),
        })?;
        if text.starts_with('\u{feff}') {
            text.replace_range(..'\u{feff}'.len_utf8(), "");
        }

        debug!(path = %path.display(), bytes = text.len(), "read build file");
        Ok(Self::from_text(path, text))
    }

    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Directory that local include references are resolved against
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}
