use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlatexError {
    #[error("no nil values allowed")]
    EmptyInput,

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
