//! Output formatting helpers for the CLI.

use privnote_core::link::ParsedLink;
use privnote_core::{Note, NoteCipher, NoteTransport};

/// JSON view of a sent note.
pub fn sent_note_json<T: NoteTransport, C: NoteCipher>(note: &Note<'_, T, C>) -> serde_json::Value {
    let settings = note.settings();
    serde_json::json!({
        "identifier": note.identifier(),
        "link": note.link(),
        "has_manual_pass": note.has_manual_pass(),
        "duration_hours": settings.map(|s| s.duration_hours()),
        "ask_confirm": settings.map(|s| s.ask_confirm()),
        "notify_email": settings.and_then(|s| s.notify()).map(|n| n.email.clone()),
    })
}

/// JSON view of a read note.
pub fn read_note_json<T: NoteTransport, C: NoteCipher>(note: &Note<'_, T, C>) -> serde_json::Value {
    serde_json::json!({
        "identifier": note.identifier(),
        "plaintext": note.plaintext(),
    })
}

/// JSON view of a parsed link. The secret itself is never printed.
pub fn parsed_link_json(parsed: &ParsedLink, url: &str) -> serde_json::Value {
    serde_json::json!({
        "identifier": parsed.identifier,
        "url": url,
        "has_secret": parsed.secret.is_some(),
    })
}

/// Print a JSON value, pretty.
pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
