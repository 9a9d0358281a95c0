//! Error types for hivec

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Connection, DNS or timeout failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The daemon answered with JSON we could not make sense of.
    #[error("malformed API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Error reported by the daemon inside a response envelope.
    #[error("{0}")]
    Api(String),

    #[error("No such container")]
    NoSuchContainer,

    /// Refused with 409; carries the daemon's reason.
    #[error("{0}")]
    Conflict(String),

    /// A status code the operation defines no outcome for.
    #[error("unexpected status code {0}")]
    UnexpectedStatus(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
