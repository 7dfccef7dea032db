//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use privnote_core::NoteError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// The service does not know the note
    NotFound { message: String, hint: String },

    /// Password missing or incorrect
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// The note was already read or expired
    Destroyed(String),

    /// Invalid user input
    InvalidInput(String),

    /// Unrecognized service response
    Protocol(String),

    /// Request did not complete
    Transport(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => {
                write!(f, "{}\n{}", message, hint)
            }
            CliError::AuthFailed { message, hint } => {
                if let Some(h) = hint {
                    write!(f, "{}\n{}", message, h)
                } else {
                    write!(f, "{}", message)
                }
            }
            CliError::Destroyed(message)
            | CliError::InvalidInput(message)
            | CliError::Protocol(message)
            | CliError::Transport(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error with message and optional hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::Destroyed(_) => exit_codes::DESTROYED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Protocol(_) => exit_codes::PROTOCOL,
            CliError::Transport(_) => exit_codes::TRANSPORT,
        }
    }

    /// Print error message to stderr and exit with appropriate code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);
        std::process::exit(self.exit_code())
    }
}

impl From<&NoteError> for CliError {
    fn from(err: &NoteError) -> Self {
        match err {
            NoteError::NotFound { .. } => CliError::not_found(
                err.to_string(),
                "Hint: Check the link; the identifier is the part after the last '/'.",
            ),
            NoteError::AlreadyDestroyed { .. } => CliError::Destroyed(err.to_string()),
            NoteError::SecretRequired => CliError::auth_failed_with_hint(
                err.to_string(),
                "Hint: Pass --password or set PRIVNOTE_PASSWORD.",
            ),
            NoteError::IncorrectSecret { .. } => CliError::auth_failed(err.to_string()),
            NoteError::InvalidOptions(_)
            | NoteError::InvalidLink(_)
            | NoteError::BadSecret(_) => CliError::invalid_input(err.to_string()),
            NoteError::Protocol(_) | NoteError::Crypto(_) | NoteError::InvalidState { .. } => {
                CliError::Protocol(err.to_string())
            }
            NoteError::Transport(_) => CliError::Transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::exit_codes;

    #[test]
    fn test_note_errors_map_to_distinct_exit_codes() {
        let not_found = CliError::from(&NoteError::NotFound {
            note_id: "abc".to_string(),
        });
        let wrong = CliError::from(&NoteError::IncorrectSecret { note_id: None });
        let invalid = CliError::from(&NoteError::InvalidOptions("x".to_string()));
        let protocol = CliError::from(&NoteError::Protocol("x".to_string()));

        assert_eq!(not_found.exit_code(), exit_codes::NOT_FOUND);
        assert_eq!(wrong.exit_code(), exit_codes::AUTH_FAILED);
        assert_eq!(invalid.exit_code(), exit_codes::INVALID_INPUT);
        assert_eq!(protocol.exit_code(), exit_codes::PROTOCOL);
    }

    #[test]
    fn test_not_found_display_includes_hint() {
        let err = CliError::not_found("Note abc not found", "Hint: check it");
        assert_eq!(err.to_string(), "Note abc not found\nHint: check it");
    }
}
