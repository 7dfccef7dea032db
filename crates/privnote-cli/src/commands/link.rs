use privnote_core::link;

use crate::app::AppContext;
use crate::cli::LinkArgs;
use crate::output::{parsed_link_json, print_json};

pub fn handle_link(ctx: &AppContext, args: &LinkArgs) -> anyhow::Result<()> {
    let service = ctx.service_config()?;
    let parsed = link::parse(&service.origin, &args.link)?;
    let url = link::note_url(&service.origin, &parsed.identifier);

    if args.json {
        return print_json(&parsed_link_json(&parsed, &url));
    }

    println!("Identifier: {}", parsed.identifier);
    println!("URL: {}", url);
    println!(
        "Password: {}",
        if parsed.secret.is_some() {
            "embedded in link"
        } else {
            "not in link (needed separately)"
        }
    );
    Ok(())
}
