use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the exo.MAST client library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when the target name is empty after trimming whitespace.
    #[error("target name must not be empty")]
    EmptyTargetName,

    /// Raised when the caller-supplied timeout had already expired, before
    /// any request is issued.
    #[error("request timeout had already expired")]
    ExpiredTimeout,

    /// Raised when the archive does not recognize the requested target.
    #[error("target '{name}' was not found in the exo.MAST archive")]
    TargetNotFound { name: String },

    /// Raised when a response body is not valid structured data or is
    /// missing required fields.
    #[error("malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    /// Raised when data-validation products are requested for a target
    /// outside the Kepler and TESS input catalogs.
    #[error("target '{name}' is not addressable as a Kepler or TESS catalog object")]
    UnsupportedCollection { name: String },

    /// Raised when a requested entry index is past the end of a response list.
    #[error("record index {index} is out of range for a response with {len} entries")]
    RecordIndexOutOfRange { index: usize, len: usize },

    /// No suitable project directories could be resolved for the lookup store.
    #[error("failed to resolve project directories for the lookup store")]
    ProjectDirsUnavailable,

    /// Raised when a previously saved lookup file exists but cannot be parsed.
    #[error("saved lookup at {path} could not be parsed: {message}")]
    SavedLookupCorrupt { path: PathBuf, message: String },

    /// Wrapper for transport-level failures (DNS, connection, TLS, timeout,
    /// or a non-success status from the archive).
    #[error("transport failure while querying exo.MAST")]
    Transport(#[source] reqwest::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures of the transport class, including timeouts that
    /// expired before the request could be issued.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::ExpiredTimeout)
    }
}
