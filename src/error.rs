// File: ./src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The upstream API could not be reached (or the URL could not be built).
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The response body was not the expected JSON shape.
    #[error("failed to decode {what}: {reason}")]
    Decode { what: &'static str, reason: String },

    #[error("failed to parse duration {0:?}")]
    Format(String),

    /// A slot starts or ends outside the range a calendar time can represent.
    #[error("slot timestamp {0} is out of range")]
    Timestamp(i64),

    #[error("range added out of order: start {start} is before last start {last_start}")]
    OutOfOrder { start: i64, last_start: i64 },

    #[error("background task failed: {0}")]
    Task(String),

    /// First failure observed while aggregating; no partial data is kept.
    #[error("aggregation failed: {0}")]
    Aggregate(Box<Error>),
}

impl Error {
    pub(crate) fn decode(what: &'static str, err: impl std::fmt::Display) -> Self {
        Error::Decode {
            what,
            reason: err.to_string(),
        }
    }

    pub(crate) fn aggregate(self) -> Self {
        match self {
            Error::Aggregate(_) => self,
            other => Error::Aggregate(Box::new(other)),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}
