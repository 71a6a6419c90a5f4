use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SymdumpError>;

#[derive(Error, Debug)]
pub enum SymdumpError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("unknown cell `{cell}` in include reference `{reference}`")]
    UnknownCell { cell: String, reference: String },

    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid cell root `{0}`: expected NAME=PATH")]
    InvalidCellRoot(String),
}
