use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the dispatcher and the record operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required option was left empty.
    #[error("{0} flag has to be specified")]
    MissingFlag(&'static str),

    #[error("Operation {0} not allowed!")]
    OperationNotAllowed(String),

    /// The `item` payload handed to `add` is not a valid user record.
    #[error("invalid item payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("failed to serialize records: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("{op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io<P: Into<PathBuf>>(op: &'static str, path: P, source: std::io::Error) -> Self {
        StoreError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
