use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a round trip to the remote task collection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Service unreachable, connection dropped, or an undecodable body.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("request rejected with status {0}")]
    Rejected(StatusCode),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    #[error("Please enter a task!")]
    EmptyTask,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid TODO_API_URL {value:?}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("TODO_API_URL must be an http(s) base URL, got {0}")]
    UnsupportedUrl(String),
}
