//! Input helper functions for the CLI.

use std::io::{self, IsTerminal, Read};

use dialoguer::Password;

use crate::constants::PASSWORD_ENV;

/// Read the note body from the argument, or from stdin when piped.
pub fn read_note_body(text: Option<String>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(anyhow::anyhow!(
            "No note text provided. Pass it as an argument or pipe it on stdin."
        ));
    }

    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read note from stdin: {}", e))?;
    Ok(buffer)
}

/// Password from PRIVNOTE_PASSWORD, if set and non-blank.
pub fn env_password() -> Option<String> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Prompt for a note password.
pub fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}
