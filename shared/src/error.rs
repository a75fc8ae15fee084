//! Error types for the catalog engine
//!
//! Failures surface as values at the operation that produced them; they are
//! never thrown across the store/controller boundary. `Clone` so a single
//! fetch outcome can be fanned out to every concurrent waiter.

use thiserror::Error;

/// Fallback message when a network failure carries no detail
pub const GENERIC_NETWORK_ERROR: &str = "An unknown error occurred";

/// Unified error type for catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A fetch against the remote catalog failed. The message is surfaced
    /// verbatim to the user-facing error state.
    #[error("Network error: {0}")]
    Network(String),

    /// A toggle referenced an item or category that does not exist.
    /// Logged and ignored; store state stays unchanged.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CatalogError {
    /// Network error from any displayable source, with a generic fallback
    /// for empty messages
    pub fn network(source: impl std::fmt::Display) -> Self {
        let msg = source.to_string();
        if msg.is_empty() {
            Self::Network(GENERIC_NETWORK_ERROR.to_string())
        } else {
            Self::Network(msg)
        }
    }

    /// Message suitable for screen-local error state
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(msg) => msg.clone(),
            Self::NotFound(msg) => msg.clone(),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
