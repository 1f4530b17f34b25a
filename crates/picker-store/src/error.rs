//! Error types for persistence operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("data node \"{0}\" not found")]
    NodeNotFound(String),

    #[error("data node \"{0}\" is referenced and can not be modified")]
    ReferenceLocked(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("file \"{0}\" is invalid and is missing the data delimiters")]
    InvalidFile(String),

    #[error("file not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
