//! Framework error type.
//!
//! Sub-crates define their own error enums (`AgentError`, `SimError`, …) and
//! wrap `PsError` as one variant where they need it.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `ps-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum PsError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `ps-*` crates.
pub type PsResult<T> = Result<T, PsError>;
