use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElementError {
    #[error("element path not found: {0}")]
    PathNotFound(String),
    #[error("element file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("unsupported element format: {0}")]
    UnsupportedFormat(String),
    #[error("invalid element record in {file}: {message}")]
    InvalidRecord { file: String, message: String },
}
