use thiserror::Error;

use crate::errors::domain::DomainError;

/// Top-level error returned by session construction and the game loop.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Domain(DomainError::IllegalAction(..)) => "ILLEGAL_ACTION",
            AppError::Domain(DomainError::Parse(_)) => "PARSE_ERROR",
            AppError::Domain(DomainError::InvalidConfig(_)) => "INVALID_CONFIG",
            AppError::Config { .. } => "CONFIG_ERROR",
            AppError::Internal { .. } => "INTERNAL",
        }
    }
}
