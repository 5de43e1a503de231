use crate::failure::ApiFailure;

pub type CoreResult<T> = Result<T, Error>;

/// Every failure a caller can observe is one of these kinds.
///
/// `Configuration` is raised at client construction, never at call time.
/// `Usage` is raised synchronously at the point of misuse, never deferred
/// into a network round trip. The remaining kinds surface from a single
/// request/response exchange.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("decode error: {detail} (body: {excerpt:?})")]
    Decode { detail: String, excerpt: String },

    #[error("{0}")]
    Api(ApiFailure),

    #[error("usage error: {0}")]
    Usage(String),
}

impl Error {
    /// HTTP status carried by the error, if it originated from a service
    /// response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(failure) => Some(failure.status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The parsed service failure, if this is an `Api` error.
    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            Error::Api(failure) => Some(failure),
            _ => None,
        }
    }
}
