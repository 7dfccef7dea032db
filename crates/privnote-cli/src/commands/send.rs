use privnote_core::NoteOptions;
use tracing::info;

use crate::app::AppContext;
use crate::cli::SendArgs;
use crate::helpers::read_note_body;
use crate::output::{print_json, sent_note_json};

pub fn handle_send(ctx: &AppContext, args: &SendArgs) -> anyhow::Result<()> {
    let defaults = &ctx.config()?.defaults;

    let options = NoteOptions {
        secret: args.password.clone().map(Into::into),
        duration_hours: args.duration.or(Some(defaults.duration_hours)),
        ask_confirm: defaults.ask_confirm && !args.no_confirm,
        notify_email: args
            .notify_email
            .clone()
            .or_else(|| defaults.notify_email.clone()),
        notify_ref: args
            .notify_ref
            .clone()
            .or_else(|| defaults.notify_ref.clone())
            .unwrap_or_default(),
    };

    // Reject bad options before reading stdin.
    options.validate()?;
    let privnote = ctx.privnote()?;
    let body = read_note_body(args.text.clone())?;
    let mut note = privnote.compose(body, options)?;
    note.encrypt()?;
    note.send()?;

    info!(identifier = note.identifier(), "note created");

    if args.json {
        return print_json(&sent_note_json(&note));
    }

    let link = note
        .link()
        .ok_or_else(|| anyhow::anyhow!("Service did not return a link"))?;
    println!("{}", link);
    if !ctx.quiet() && note.has_manual_pass() {
        eprintln!("The password is not part of the link; share it separately.");
    }
    Ok(())
}
