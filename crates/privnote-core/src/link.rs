//! Public note links.
//!
//! A link is `<origin>/<identifier>` optionally followed by `#<secret>`.
//! The fragment is present only when the secret was generated locally: a
//! manual secret is assumed to be known to the recipient already, while a
//! generated one would be lost if it did not travel with the link.
//!
//! Fragments are never sent to the server, so the secret stays on the client.
//! The fragment is percent-encoded, so byte secrets and secrets with
//! whitespace survive a render/parse round trip; alphanumeric generated
//! secrets render unchanged.

use percent_encoding::{percent_decode_str, percent_encode, AsciiSet, CONTROLS};
use url::Url;

use crate::error::{NoteError, Result};
use crate::secret::Secret;

/// The service's canonical origin.
pub const DEFAULT_ORIGIN: &str = "https://privnote.com";

/// The URL fragment set plus `%` and `#`, which must stay unambiguous.
const FRAGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'%');

/// Identifier and (optional) secret recovered from a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLink {
    pub identifier: String,
    pub secret: Option<Secret>,
}

/// Split a link into identifier and secret fragment.
///
/// Accepts `https://host/id#secret`, `host/id#secret` (no scheme) and a bare
/// `id#secret`. The link must point at `origin`'s host. An empty fragment
/// counts as no secret. Surrounding whitespace is ignored; whitespace inside
/// a secret must be percent-encoded, as [`render`] does.
pub fn parse(origin: &Url, link: &str) -> Result<ParsedLink> {
    let trimmed = link.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);

    let (path, fragment) = match without_scheme.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (without_scheme, None),
    };

    let authority = origin_authority(origin)?;
    let identifier = match path.split_once('/') {
        Some((host, rest)) if host.eq_ignore_ascii_case(&authority) => rest,
        Some((host, _)) => {
            return Err(NoteError::InvalidLink(format!(
                "Link points at {}, expected {}",
                host, authority
            )))
        }
        None if path.eq_ignore_ascii_case(&authority) => "",
        None => path,
    };

    validate_identifier(identifier)?;

    let secret = fragment
        .filter(|value| !value.is_empty())
        .map(|value| Secret::from(percent_decode_str(value).collect::<Vec<u8>>()));

    Ok(ParsedLink {
        identifier: identifier.to_string(),
        secret,
    })
}

/// Render the public link for `identifier`.
///
/// The secret is appended as a fragment only when `has_manual_pass` is false.
pub fn render(
    origin: &Url,
    identifier: &str,
    secret: Option<&Secret>,
    has_manual_pass: bool,
) -> String {
    let base = note_url(origin, identifier);
    match secret {
        Some(secret) if !has_manual_pass && !secret.is_empty() => {
            format!("{}#{}", base, percent_encode(secret.as_bytes(), FRAGMENT))
        }
        _ => base,
    }
}

/// The fragment-free URL of a note, as used on the wire.
pub fn note_url(origin: &Url, identifier: &str) -> String {
    format!("{}/{}", origin.as_str().trim_end_matches('/'), identifier)
}

fn origin_authority(origin: &Url) -> Result<String> {
    let host = origin
        .host_str()
        .ok_or_else(|| NoteError::InvalidLink(format!("Origin {} has no host", origin)))?;
    Ok(match origin.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn validate_identifier(identifier: &str) -> Result<()> {
    if identifier.is_empty() {
        return Err(NoteError::InvalidLink(
            "Link has no note identifier".to_string(),
        ));
    }
    if !identifier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(NoteError::InvalidLink(format!(
            "Note identifier contains invalid characters: {}",
            identifier
        )));
    }
    Ok(())
}
