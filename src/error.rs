//! Unified error handling for the mergington crate
//!
//! Domain modules define their own error enums. This module gathers them
//! into a single [`Error`] so callers crossing module boundaries can use
//! one `Result` type.

use thiserror::Error;

pub use crate::config::ConfigError;
pub use crate::registry::{RegistryError, SeedError};
pub use crate::server::ServerError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Caller referenced something that does not exist or is in the wrong state
    Client,
    /// Configuration and seed data problems
    Config,
    /// Socket and serving failures
    Server,
    /// Filesystem and other I/O
    Io,
}

/// Unified error type for the mergington crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Registry(_) => ErrorCategory::Client,
            Self::Seed(_) | Self::Config(_) => ErrorCategory::Config,
            Self::Server(_) => ErrorCategory::Server,
            Self::Io(_) => ErrorCategory::Io,
        }
    }

    /// Registry errors are the caller's to fix; everything else stops startup
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Client
    }
}

/// Result type alias using the unified error
pub type Result<T> = std::result::Result<T, Error>;
