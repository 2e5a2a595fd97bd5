//! Unified application error type.
//! All modules (store, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::core::session::TransitionError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // State document
    // ---------------------------
    #[error("Corrupt state file {path}: {reason}")]
    CorruptState { path: String, reason: String },

    #[error("Failed to save state to {path}: {source}")]
    Persistence {
        path: String,
        #[source]
        source: io::Error,
    },

    // ---------------------------
    // Session logic
    // ---------------------------
    #[error("{0}")]
    Transition(#[from] TransitionError),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::CorruptState {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the error is a guard rejection rather than a failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, AppError::Transition(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
