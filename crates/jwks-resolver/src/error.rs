//! Errors for jwks-resolver

use std::fmt;
use thiserror::Error;

/// Why a request failed before any HTTP response arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Name resolution or TCP/TLS connect failed
    Connect,
    /// The request timed out
    Timeout,
    /// Anything else (request building, reading the body)
    Other,
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Other => "other",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// jwks-resolver Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Remote Errors
    // ============================================================================
    #[error("Transport error ({kind}): {message}")]
    Transport {
        kind: TransportErrorKind,
        message: String,
    },

    #[error("Remote server error: HTTP status {status}")]
    RemoteServer { status: u16 },

    #[error("Remote URL too long: {length} characters (maximum: {max} characters)")]
    RemoteUrlTooLong { length: usize, max: usize },

    #[error("Remote response too large: {size} bytes (maximum: {max} bytes)")]
    RemoteResponseTooLarge { size: usize, max: usize },

    #[error("Remote JWK set too large: {key_count} keys (maximum: {max} keys)")]
    RemoteJwkSetTooLarge { key_count: usize, max: usize },

    // ============================================================================
    // Document Errors
    // ============================================================================
    #[error("Invalid JWKS document: {0}")]
    InvalidJwks(String),

    #[error("Unable to find a signing key that matches '{kid}'")]
    KeyNotFound { kid: String },

    #[error("The JWKS endpoint did not contain any signing keys")]
    NoSigningKeys,

    #[error("Multiple signing keys found with kid '{kid}' ({count} matches)")]
    MultipleKeysFound { kid: String, count: usize },

    #[error("Signing key '{kid}' has unusable key material: {reason}")]
    InvalidKey { kid: String, reason: String },

    #[error("JWK field '{field}' too large: {size} bytes (maximum: {max} bytes)")]
    JwkFieldTooLarge {
        field: String,
        size: usize,
        max: usize,
    },

    // ============================================================================
    // Caller Errors
    // ============================================================================
    #[error("Invalid key ID: {0}")]
    InvalidKeyId(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl Error {
    /// The endpoint could not be reached at all
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// The endpoint answered with a non-success status
    pub fn is_remote_server(&self) -> bool {
        matches!(self, Error::RemoteServer { .. })
    }

    /// The document was fetched but holds no signing key for the requested kid
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound { .. })
    }

    /// HTTP status of a `RemoteServer` error
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteServer { status } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for jwks-resolver operations
pub type Result<T> = std::result::Result<T, Error>;
