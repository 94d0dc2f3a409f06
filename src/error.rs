//! Error types for storage backends and duration input

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a key-value store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store key {0:?}")]
    InvalidKey(String),

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove {path}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store lock poisoned")]
    Poisoned,
}

/// Rejections of a user-supplied countdown duration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("duration is empty")]
    Empty,

    #[error("cannot parse duration {0:?}")]
    Unparsable(String),

    #[error("duration must be greater than zero")]
    Zero,

    #[error("duration is too large")]
    TooLarge,
}
