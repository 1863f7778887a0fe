use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurseMetaError {
    #[error("Too many addon ids in one request: {0} (at most {1} are allowed)")]
    TooManyIds(usize, usize),

    #[error("Addon id and file id lists differ in length: {0} addons, {1} files")]
    MismatchedBatchLengths(usize, usize),

    #[error("Request to {0} failed with status: {1}")]
    RequestFailed(String, reqwest::StatusCode),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("File {0} has no download URL")]
    MissingDownloadUrl(u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Date parse error: {0}")]
    DateParseError(#[from] chrono::ParseError),
}

impl CurseMetaError {
    /// Whether this error is a caller contract violation, raised before any
    /// request is sent.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::TooManyIds(..) | Self::MismatchedBatchLengths(..)
        )
    }
}
