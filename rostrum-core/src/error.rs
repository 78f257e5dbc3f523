use rostrum_scanner::ScanError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Required input file {} does not exist", .0.display())]
    MissingInput(PathBuf),

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", .path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize JSON for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} uses schema version {found}, newest supported is {supported}", .path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: u32,
        supported: u32,
    },
}

/// Errors that end a pipeline stage.
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl StageError {
    pub fn is_missing_input(&self) -> bool {
        matches!(self, StageError::Data(DataError::MissingInput(_)))
    }
}

pub type Result<T> = std::result::Result<T, StageError>;
