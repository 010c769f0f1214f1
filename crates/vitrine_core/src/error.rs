//! Error types shared by every Vitrine crate

use thiserror::Error;

/// Errors raised by page hosts and persistence backends.
///
/// Controllers never surface these to the user: persistence failures fall
/// back to defaults, missing elements degrade to no-ops. Only the contact
/// form reports `Network` failures, through a notification.
#[derive(Error, Debug)]
pub enum VitrineError {
    /// The persistence medium is missing or disabled
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The persistence medium rejected a write (quota, privacy mode)
    #[error("storage write rejected for `{key}`: {reason}")]
    StorageWrite { key: String, reason: String },

    /// A value could not be encoded or decoded
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    /// A network request failed before producing a status
    #[error("network error: {0}")]
    Network(String),

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for Vitrine operations
pub type Result<T> = std::result::Result<T, VitrineError>;
