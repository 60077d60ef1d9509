//! Error types for session checks, browser storage, and configuration.
//!
//! ERROR HANDLING
//! ==============
//! Every session failure collapses into "not authenticated" at the guard, and
//! storage failures are demoted to warnings. These enums exist so the collapse
//! happens in one place with a readable reason in the console log.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use thiserror::Error;

/// Why the current-user check did not yield a usable user record.
///
/// `Clone` because the result is shared by every awaiter of the session
/// resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The request never produced a response (offline, CORS, DNS, ...).
    #[error("session request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("session rejected: status {0}")]
    Status(u16),

    /// The body was not JSON, or not a JSON object.
    #[error("session response malformed: {0}")]
    MalformedBody(String),

    /// The body was an object but carried no non-empty user name.
    #[error("session response has no user name")]
    MissingName,

    /// No browser environment to issue the request from.
    #[error("session check not available outside the browser")]
    Unavailable,
}

impl SessionError {
    /// True when the server explicitly refused the session, as opposed to the
    /// check failing for transport or parsing reasons.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Status(401 | 403) | Self::MissingName)
    }
}

/// Failures when writing to `sessionStorage` / `localStorage`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Storage is disabled or the window has none (private mode, sandboxed iframe).
    #[error("storage unavailable")]
    Unavailable,

    /// The browser refused the write (quota exceeded, security error).
    #[error("storage write failed for {key}: {reason}")]
    Write { key: String, reason: String },

    /// The value could not be serialized before writing.
    #[error("storage value encode failed: {0}")]
    Encode(String),
}

/// Invalid site configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid API base URL: {0}")]
    InvalidApiBase(String),

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}
