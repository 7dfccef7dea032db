//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// Note identifier unknown to the service.
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input, options or link.
    pub const INVALID_INPUT: i32 = 4;

    /// Missing or incorrect password.
    pub const AUTH_FAILED: i32 = 5;

    /// Note was already read or expired.
    pub const DESTROYED: i32 = 6;

    /// The service answered with something we do not understand.
    pub const PROTOCOL: i32 = 7;

    /// The request never completed (timeout, connection error).
    pub const TRANSPORT: i32 = 8;
}

/// Environment variable holding a note password for `read`.
pub const PASSWORD_ENV: &str = "PRIVNOTE_PASSWORD";

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "PRIVNOTE_LOG";

/// Wrong passwords accepted interactively before giving up.
pub const MAX_PASSWORD_ATTEMPTS: usize = 3;
