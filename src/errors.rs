//! Unified error types for the garden core.
//!
//! Store operations surface these synchronously; the aggregation layer never produces them.
//! [`Error::kind`] collapses the variants into the categories the presentation layer reacts to.

use crate::core::model::{ActivityId, CropId};
use thiserror::Error;

/// Errors produced by the store, persistence and configuration layers.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Crop not found: {id}")]
    CropNotFound { id: CropId },

    #[error("Activity not found: {id}")]
    ActivityNotFound { id: ActivityId },

    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Coarse error category, stable across variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected input: empty name, malformed reorder list, bad quantity or colour.
    Validation,
    /// The operation targeted an id the store does not hold.
    NotFound,
    /// Storage failed; in-memory state may be ahead of durable state.
    Persistence,
    /// Configuration or environment problem.
    Config,
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::CropNotFound { .. } | Self::ActivityNotFound { .. } => ErrorKind::NotFound,
            Self::Persistence { .. } | Self::Database(_) | Self::Io(_) => ErrorKind::Persistence,
            Self::Config { .. } | Self::EnvVar(_) => ErrorKind::Config,
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
