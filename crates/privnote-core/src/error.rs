//! Error types for note operations.
//!
//! Every failure a caller may want to branch on has its own variant:
//! a wrong secret, a note that is already gone, an identifier the service
//! never knew, and a response the client does not understand are all kept
//! apart. The CLI layer maps these to user-facing messages and exit codes.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for note operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Core error type for note operations.
#[derive(Debug, Error)]
pub enum NoteError {
    /// An encrypt or decrypt was attempted before a secret was established
    #[error("No secret set, this note requires a secret")]
    SecretRequired,

    /// The cipher rejected the secret while decrypting
    #[error("Incorrect secret for note {}", display_id(.note_id))]
    IncorrectSecret { note_id: Option<String> },

    /// The cipher refused the secret while encrypting
    #[error("Secret cannot be used for encryption: {0}")]
    BadSecret(String),

    /// Ciphertext is not in a shape the cipher understands
    #[error("Malformed ciphertext: {0}")]
    Crypto(String),

    /// The service does not recognize the identifier
    #[error("Note {note_id} not found")]
    NotFound { note_id: String },

    /// The note was read (or expired) before this request
    #[error("Note {note_id} was already destroyed at {destroyed}")]
    AlreadyDestroyed {
        note_id: String,
        destroyed: NaiveDateTime,
    },

    /// Creation options failed validation
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// A link could not be parsed into an identifier
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    /// The service responded with an unrecognized shape
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A lifecycle operation was called out of order
    #[error("Cannot {operation} a note in state {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// The request executor failed (timeout, connection error, ...)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl NoteError {
    /// Whether retrying `decrypt` with a different secret could succeed.
    pub fn is_incorrect_secret(&self) -> bool {
        matches!(self, NoteError::IncorrectSecret { .. })
    }
}

fn display_id(note_id: &Option<String>) -> &str {
    note_id.as_deref().unwrap_or("<unknown>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incorrect_secret_message() {
        let err = NoteError::IncorrectSecret {
            note_id: Some("abc123".to_string()),
        };
        assert_eq!(err.to_string(), "Incorrect secret for note abc123");
        assert!(err.is_incorrect_secret());

        let err = NoteError::IncorrectSecret { note_id: None };
        assert!(err.to_string().contains("<unknown>"));
    }

    #[test]
    fn test_destroyed_message_carries_timestamp() {
        let destroyed = NaiveDateTime::parse_from_str(
            "2024-01-01T00:00:00.000000",
            "%Y-%m-%dT%H:%M:%S%.f",
        )
        .unwrap();
        let err = NoteError::AlreadyDestroyed {
            note_id: "abc123".to_string(),
            destroyed,
        };
        let message = err.to_string();
        assert!(message.contains("abc123"));
        assert!(message.contains("2024-01-01"));
        assert!(!err.is_incorrect_secret());
    }
}
