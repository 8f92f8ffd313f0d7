use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("json decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not a character or account document: {0}")]
    UnrecognizedDocument(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("none of the {0} configured directories could be read")]
    NoUsableDirectories(usize),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
