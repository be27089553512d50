//! Error types for artifactory-http.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("relative path {0} requires an endpoint")]
    NoEndpoint(String),

    #[cfg(feature = "reqwest")]
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
