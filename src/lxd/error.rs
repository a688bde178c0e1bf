use std::path::PathBuf;

use crate::container;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to connect to socket `{path}`: {source}")]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP handshake failed: {0}")]
    Handshake(#[source] hyper::Error),
    #[error("failed to send request for `{path}`: {source}")]
    Request {
        path: String,
        #[source]
        source: hyper::Error,
    },
    #[error("failed to read response body for `{path}`: {source}")]
    Body {
        path: String,
        #[source]
        source: hyper::Error,
    },
    #[error("invalid request for `{path}`: {source}")]
    InvalidRequest {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("unexpected HTTP status {status} for `{path}`")]
    Status { path: String, status: u16 },
    #[error("failed to decode response for `{path}`: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid container reference `{reference}`: {source}")]
    InvalidContainerReference {
        reference: String,
        #[source]
        source: container::Error,
    },
}

impl Error {
    /// Returns `true` if the API itself could not be reached or talked to, as opposed to a
    /// single request being rejected or answered with unexpected content.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Connect { .. } | Error::Handshake(_) | Error::Request { .. } | Error::Body { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
