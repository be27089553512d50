//! Error types for artifactory.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("malformed {context}: {source}")]
    MalformedResponse {
        context: String,
        #[source]
        source:  BoxError,
    },

    #[error("local destination must be set")]
    MissingDestination,

    #[error("remote path must be given")]
    MissingSource,

    #[error("artifact has no API path")]
    MissingApiPath,

    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn transport<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
        Error::Transport(Box::new(e))
    }

    pub(crate) fn malformed<E: std::error::Error + Send + Sync + 'static>(
        context: impl Into<String>,
        source: E,
    ) -> Self {
        Error::MalformedResponse {
            context: context.into(),
            source:  Box::new(source),
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
