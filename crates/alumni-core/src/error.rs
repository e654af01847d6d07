//! Error types for the alumni client.
//!
//! A single error type covers transport, authentication, protocol and input
//! validation failures. [`Error::kind`] collapses the variants into the
//! handful of cases a presentation layer actually branches on.

use std::fmt;
use thiserror::Error;

/// The unified error type for alumni client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, body decoding).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (invalid credentials, missing session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-2xx responses from the API.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A detail lookup returned 404.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: String, id: String },

    /// An identical mutation is already in flight.
    #[error("'{key}' is already in progress")]
    InFlight { key: String },

    /// Input validation errors (bad URL, empty id, page size of zero).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request failed, timed out, or returned a non-2xx status.
    Network,
    /// The caller is not (or no longer) authenticated.
    Auth,
    /// The requested entity does not exist.
    NotFound,
    /// The request duplicates one that is still in flight.
    Conflict,
    /// The caller supplied invalid input.
    InvalidInput,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Network,
            Error::Auth(_) => ErrorKind::Auth,
            Error::Protocol(e) if e.is_auth_error() => ErrorKind::Auth,
            Error::Protocol(e) if e.status == 404 => ErrorKind::NotFound,
            Error::Protocol(e) if e.status == 409 => ErrorKind::Conflict,
            Error::Protocol(_) => ErrorKind::Network,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::InFlight { .. } => ErrorKind::Conflict,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Returns true if this error means the entity does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The response body could not be decoded.
    #[error("invalid response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials provided.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The stored token was rejected.
    #[error("session expired")]
    SessionExpired,

    /// An operation needs a signed-in member.
    #[error("not signed in")]
    NotSignedIn,
}

/// Non-2xx API responses.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if present).
    pub error: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid entity id.
    #[error("invalid id '{value}': {reason}")]
    EntityId { value: String, reason: String },

    /// Page size must be at least one.
    #[error("page size must be at least 1")]
    PageSize,

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
