use privnote_core::{HttpTransport, Note, NoteError, SaltedAesCipher};

use crate::app::AppContext;
use crate::cli::ReadArgs;
use crate::constants::MAX_PASSWORD_ATTEMPTS;
use crate::errors::CliError;
use crate::helpers::{env_password, prompt_password};
use crate::output::{print_json, read_note_json};

pub fn handle_read(ctx: &AppContext, args: &ReadArgs) -> anyhow::Result<()> {
    let interactive = ctx.interactive(args.no_input);
    let privnote = ctx.privnote()?;
    let mut note = privnote.open_link(&args.link)?;

    if note.secret().is_none() {
        let supplied = args.password.clone().or_else(env_password);
        let secret = match supplied {
            Some(secret) => secret,
            // Ask before fetching: the read destroys the note.
            None if interactive => prompt_password("Note password")?,
            None => {
                return Err(CliError::auth_failed_with_hint(
                    "This link does not carry a password",
                    "Hint: Pass --password or set PRIVNOTE_PASSWORD.",
                )
                .into())
            }
        };
        note.set_secret(secret)?;
    }

    note.fetch_and_destroy()?;
    decrypt_with_retry(&mut note, interactive, ctx.quiet())?;

    if args.json {
        return print_json(&read_note_json(&note));
    }

    print!("{}", note.plaintext().unwrap_or_default());
    if !ctx.quiet() {
        println!();
        eprintln!("This note has been destroyed on the server.");
    }
    Ok(())
}

/// Decrypt, re-prompting on a wrong password without fetching again.
fn decrypt_with_retry(
    note: &mut Note<'_, HttpTransport, SaltedAesCipher>,
    interactive: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut attempts = 0;
    loop {
        match note.decrypt() {
            Ok(()) => return Ok(()),
            Err(err @ NoteError::IncorrectSecret { .. }) => {
                attempts += 1;
                if !interactive || attempts >= MAX_PASSWORD_ATTEMPTS {
                    return Err(err.into());
                }
                if !quiet {
                    eprintln!("Incorrect password, try again.");
                }
                note.set_secret(prompt_password("Note password")?)?;
            }
            Err(err) => return Err(err.into()),
        }
    }
}
