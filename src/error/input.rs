use std::path::PathBuf;

use super::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Couldn't read targets file '{path}': {source}")]
    ReadTargets {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Targets file '{path}' was empty.")]
    TargetsEmpty { path: PathBuf },
    #[error("Invalid URL: {value}")]
    InvalidTarget { value: String },
    #[error("Can't find wordlist '{path}': {source}")]
    ReadWordlist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Wordlist '{path}' was empty.")]
    WordlistEmpty { path: PathBuf },
    #[error("Can't find file with headers '{path}': {source}")]
    ReadHeaders {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid header in '{origin}': {source}")]
    InvalidHeader {
        origin: String,
        #[source]
        source: ValidationError,
    },
}
