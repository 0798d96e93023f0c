//! Error types for folio-core.
//!
//! Every failure the mapping engine can surface is a variant of [`FolioError`].
//! Variants carry a human-readable message; `code()` returns a stable,
//! machine-readable identifier for CLI/API consumers.
//!
//! Propagation policy:
//! - sequencing and lookup failures are raised where they are detected
//! - full-text probe failures are never raised by the mapping functions; they
//!   exist so host collaborators can report them before degrading to "unknown"
//! - nothing in the core retries

use thiserror::Error;

/// Result alias used throughout folio-core.
pub type FolioResult<T> = Result<T, FolioError>;

#[derive(Debug, Error)]
pub enum FolioError {
    /// Malformed web-resource sequence graph (duplicate id, dangling next
    /// reference, intertwined chains, surviving cycle).
    #[error("data inconsistent: {0}")]
    DataInconsistent(String),

    /// The record source has no record with the requested id.
    #[error("record not found: {0}")]
    RecordNotFound(String),

    /// The record source rejected the supplied credentials.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Any other failure while retrieving the record.
    #[error("record retrieve failure: {0}")]
    RecordRetrieveFailure(String),

    /// The full-text existence probe could not be completed.
    #[error("full-text probe failure: {0}")]
    FullTextProbeFailure(String),

    #[error("serialization failure: {0}")]
    SerializationFailure(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl FolioError {
    pub fn data_inconsistent(msg: impl Into<String>) -> Self {
        Self::DataInconsistent(msg.into())
    }

    pub fn record_not_found(msg: impl Into<String>) -> Self {
        Self::RecordNotFound(msg.into())
    }

    pub fn invalid_credentials(msg: impl Into<String>) -> Self {
        Self::InvalidCredentials(msg.into())
    }

    pub fn record_retrieve(msg: impl Into<String>) -> Self {
        Self::RecordRetrieveFailure(msg.into())
    }

    pub fn fulltext_probe(msg: impl Into<String>) -> Self {
        Self::FullTextProbeFailure(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationFailure(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DataInconsistent(_) => "data.inconsistent",
            Self::RecordNotFound(_) => "record.not_found",
            Self::InvalidCredentials(_) => "record.invalid_credentials",
            Self::RecordRetrieveFailure(_) => "record.retrieve_failure",
            Self::FullTextProbeFailure(_) => "fulltext.probe_failure",
            Self::SerializationFailure(_) => "serialization.failure",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationFailure(e.to_string())
    }
}
