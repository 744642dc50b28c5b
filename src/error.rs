use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocmapError>;

#[derive(Error, Debug)]
pub enum LocmapError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}
