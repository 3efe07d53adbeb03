//! Error types for resource calls and client construction.
//!
//! [`Error`] is the single failure channel of every `run` variant on
//! [`Client`](crate::Client). Its `Display` output is stable and meant to be
//! matched verbatim in logs and tests.

/// A boxed error coming from a [`Transport`](crate::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error returned by a resource call.
///
/// # Examples
///
/// ```
/// use resourceful::Error;
///
/// assert_eq!(Error::BadStatus(404).to_string(), "Bad status 404.");
/// assert_eq!(Error::NoData.to_string(), "No data.");
/// assert_eq!(Error::CouldNotDecode.to_string(), "Failed to decode object.");
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The server answered with a status outside `200..300`.
    #[error("Bad status {0}.")]
    BadStatus(u16),

    /// Decoding was requested but the response carried no payload.
    #[error("No data.")]
    NoData,

    /// The payload is not JSON of the requested shape.
    ///
    /// The underlying serde error is intentionally not kept.
    #[error("Failed to decode object.")]
    CouldNotDecode,

    /// Any transport-level failure (connection refused, DNS, TLS, timeout...).
    ///
    /// Displays as the wrapped error.
    #[error("{0}")]
    Other(#[source] BoxError),
}

impl Error {
    /// Wraps an arbitrary error as [`Error::Other`].
    pub fn other(error: impl Into<BoxError>) -> Self {
        Error::Other(error.into())
    }

    /// Returns the HTTP status code for [`Error::BadStatus`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BadStatus(code) => Some(*code),
            _ => None,
        }
    }
}

/// Errors raised while building a [`Client`](crate::Client).
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// `ClientBuilder::build` was called without a base URL.
    #[error("Base URL is required")]
    MissingBaseUrl,

    /// The base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot have path segments appended (e.g. `mailto:`).
    #[error("Base URL cannot be a base: {0}")]
    CannotBeABase(url::Url),

    /// A default header name or value was rejected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The default `reqwest` transport could not be created.
    #[error("Failed to build HTTP client: {0}")]
    Transport(#[from] reqwest::Error),
}

/// A specialized `Result` type for resource calls.
pub type Result<T> = std::result::Result<T, Error>;
