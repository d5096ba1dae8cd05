//! Errors reported by chat actions.
//!
//! None of these are fatal: the store records their message in its error slot
//! and the session prints it.

use thiserror::Error;

use crate::capability::CapabilityKind;

#[derive(Debug, Error)]
pub enum ChatError {
    /// The user's input was rejected before any capability was called.
    #[error("{0}")]
    Validation(String),

    #[error("{} is not available: no provider is configured for the {kind}", .kind.action())]
    CapabilityUnavailable { kind: CapabilityKind },

    #[error("{} failed: {cause:#}", .kind.action())]
    CapabilityFailure {
        kind: CapabilityKind,
        cause: anyhow::Error,
    },
}

impl ChatError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub const fn unavailable(kind: CapabilityKind) -> Self {
        Self::CapabilityUnavailable { kind }
    }

    pub const fn failure(kind: CapabilityKind, cause: anyhow::Error) -> Self {
        Self::CapabilityFailure { kind, cause }
    }
}
