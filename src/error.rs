//! Error types returned by host services

use thiserror::Error;

/// Failure of a host service call (storage, wake-ups, messaging)
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode {what}: {source}")]
    Serde {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("host state lock poisoned: {0}")]
    Poisoned(String),

    #[error("messaging buffer of {0} bytes exceeds the host maximum")]
    BufferTooLarge(usize),
}

/// Result of adding a slice to a glance reload session
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GlanceError {
    #[error("glance slice subtitle exceeds {0} bytes")]
    LengthExceeded(usize),

    #[error("glance session already holds its limit of {0} slices")]
    SliceCapacityExceeded(usize),

    #[error("glance slice expires in the past")]
    ExpiresInPast,
}

impl<T> From<std::sync::PoisonError<T>> for HostError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HostError::Poisoned(e.to_string())
    }
}
