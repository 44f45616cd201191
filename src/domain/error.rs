use std::path::PathBuf;
use thiserror::Error;

/// DataProbe unified error type
#[derive(Error, Debug)]
pub enum DataProbeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input directory {} is not readable: {source}", path.display())]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} doesn't exist!", path.display())]
    MissingInput { path: PathBuf },

    #[error("Failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("Invalid filter: {0}")]
    Filter(String),

    #[error("Analysis error: {message}")]
    Analysis { message: String },

    #[error("Output error: {0}")]
    Output(String),

    #[error("Logging error: {0}")]
    Logging(String),
}

pub type DataProbeResult<T> = Result<T, DataProbeError>;
