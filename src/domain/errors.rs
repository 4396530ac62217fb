use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connection,
    InvalidBody,
    Http,
}

impl TransportErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "Request timed out with error",
            TransportErrorKind::Connection => "Server connection error",
            TransportErrorKind::InvalidBody => "Invalid remote data",
            TransportErrorKind::Http => "Generic HTTP error",
        }
    }
}

/// A failed request to the remote API. Never retried.
#[derive(Debug, Clone, Error)]
#[error("{}. Error: {message}", .kind.as_str())]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connection, message)
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::InvalidBody, message)
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Http, message)
    }
}

#[derive(Debug, Error)]
pub enum StatsError {
    /// The first page reported more pages than the configured cap allows.
    #[error("Dangerous remote data. Max page count is {max_pages} but got {total_pages}.")]
    RemoteDataTooLarge { max_pages: u64, total_pages: u64 },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl StatsError {
    pub fn is_too_large(&self) -> bool {
        matches!(self, StatsError::RemoteDataTooLarge { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date {input:?}: expected YYYYMMDD HH:MM:SS")]
pub struct DateError {
    pub input: String,
}
