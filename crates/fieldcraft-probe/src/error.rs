use std::time::Duration;

use thiserror::Error;

/// Why a link could not be confirmed as reachable.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The prefixed text does not parse as a URL.
    #[error("invalid URL {text:?}: {source}")]
    InvalidUrl {
        text: String,
        #[source]
        source: url::ParseError,
    },
    /// Only `http` and `https` links can be opened.
    #[error("unsupported URL scheme {0:?}")]
    UnsupportedScheme(String),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request failed before a response arrived.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server answered {0}")]
    Status(u16),
    /// No answer within the probe timeout.
    #[error("no answer within {0:?}")]
    TimedOut(Duration),
}
