//! The note lifecycle.
//!
//! A [`Note`] is driven through one of two paths:
//!
//! ```text
//! write:  Draft ──encrypt──▶ Encrypted ──send──▶ Sent
//! read:   Addressed ──fetch_and_destroy──▶ Fetched ──decrypt──▶ Decrypted
//! ```
//!
//! [`Privnote`] owns the collaborators (service configuration, request
//! executor, cipher) and hands out notes that borrow it. Nothing is retried
//! here: a destructive read succeeds at most once on the server, so a failed
//! `decrypt` must be retried with a new secret rather than a new fetch.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::cipher::{CipherError, NoteCipher, SaltedAesCipher};
use crate::config::ServiceConfig;
use crate::error::{NoteError, Result};
use crate::link::{self, ParsedLink};
use crate::secret::{self, Secret, SecretOrigin};
use crate::settings::{NoteOptions, NoteSettings};
use crate::transport::{HttpTransport, NoteTransport};
use crate::wire::{self, CreateResponse, DestroyResponse};

/// Where a note is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteState {
    /// Plaintext and settings set, not yet encrypted
    Draft,
    /// Ciphertext set, not yet sent
    Encrypted,
    /// Accepted by the service; identifier and link known
    Sent,
    /// Identifier known from a link, nothing fetched
    Addressed,
    /// Ciphertext received; the server copy is gone
    Fetched,
    /// Plaintext recovered
    Decrypted,
}

impl NoteState {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteState::Draft => "draft",
            NoteState::Encrypted => "encrypted",
            NoteState::Sent => "sent",
            NoteState::Addressed => "addressed",
            NoteState::Fetched => "fetched",
            NoteState::Decrypted => "decrypted",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, NoteState::Sent | NoteState::Decrypted)
    }
}

impl std::fmt::Display for NoteState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client for one note service.
pub struct Privnote<T, C = SaltedAesCipher> {
    config: ServiceConfig,
    transport: T,
    cipher: C,
}

impl Privnote<HttpTransport, SaltedAesCipher> {
    /// HTTP transport and the service's cipher against `config.origin`.
    pub fn connect(config: ServiceConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(config, transport, SaltedAesCipher))
    }
}

impl<T: NoteTransport, C: NoteCipher> Privnote<T, C> {
    pub fn new(config: ServiceConfig, transport: T, cipher: C) -> Self {
        Self {
            config,
            transport,
            cipher,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Start a note for sending.
    ///
    /// Resolves the secret (generating one if none was supplied), then
    /// validates the settings. The note is returned in `Draft`.
    pub fn compose(
        &self,
        plaintext: impl Into<String>,
        mut options: NoteOptions,
    ) -> Result<Note<'_, T, C>> {
        let (secret, secret_origin) = secret::resolve(options.secret.take())?;
        let settings = options
            .settings_builder(secret_origin.is_manual())
            .build()?;

        debug!(
            manual_secret = secret_origin.is_manual(),
            duration_hours = settings.duration_hours(),
            "note composed"
        );

        let mut note = Note::empty(self, NoteState::Draft);
        note.plaintext = Some(plaintext.into());
        note.secret = Some(secret);
        note.secret_origin = Some(secret_origin);
        note.settings = Some(settings);
        Ok(note)
    }

    /// Address an existing note by its link.
    ///
    /// The secret comes from the link fragment when present; otherwise it
    /// must be supplied with [`Note::set_secret`] before decrypting.
    pub fn open_link(&self, link: &str) -> Result<Note<'_, T, C>> {
        let ParsedLink { identifier, secret } = link::parse(&self.config.origin, link)?;

        let mut note = Note::empty(self, NoteState::Addressed);
        note.secret_origin = secret.as_ref().map(|_| SecretOrigin::Generated);
        note.secret = secret;
        note.identifier = Some(identifier);
        note.refresh_link();

        debug!(
            identifier = note.identifier(),
            has_secret = note.secret.is_some(),
            "note addressed"
        );
        Ok(note)
    }

    /// Address an existing note by identifier, with an out-of-band secret.
    pub fn open_id(&self, identifier: &str, secret: Option<Secret>) -> Result<Note<'_, T, C>> {
        let mut note = Note::empty(self, NoteState::Addressed);
        note.set_identifier(identifier)?;
        if let Some(secret) = secret {
            note.set_secret(secret)?;
        }
        Ok(note)
    }

    /// Compose, encrypt and send a note in one go.
    pub fn create(
        &self,
        plaintext: impl Into<String>,
        options: NoteOptions,
    ) -> Result<Note<'_, T, C>> {
        let mut note = self.compose(plaintext, options)?;
        note.encrypt()?;
        note.send()?;
        Ok(note)
    }

    /// Address a note by link and perform the destructive read.
    ///
    /// The returned note is `Fetched`; call [`Note::decrypt`] (possibly more
    /// than once, with different secrets) to recover the plaintext.
    pub fn fetch(&self, link: &str) -> Result<Note<'_, T, C>> {
        let mut note = self.open_link(link)?;
        note.fetch_and_destroy()?;
        Ok(note)
    }

    /// Fetch and decrypt a note whose link carries its secret.
    ///
    /// A wrong secret here is final: the server copy is already gone. Use
    /// [`Privnote::fetch`] to keep the ciphertext around for another attempt.
    pub fn read(&self, link: &str) -> Result<String> {
        let mut note = self.fetch(link)?;
        note.decrypt()?;
        Ok(note.plaintext.take().unwrap_or_default())
    }
}

/// A single note and its lifecycle state.
pub struct Note<'p, T, C> {
    service: &'p Privnote<T, C>,
    state: NoteState,
    identifier: Option<String>,
    link: Option<String>,
    secret: Option<Secret>,
    secret_origin: Option<SecretOrigin>,
    plaintext: Option<String>,
    ciphertext: Option<Vec<u8>>,
    settings: Option<NoteSettings>,
    server_response: Option<Map<String, Value>>,
}

impl<'p, T: NoteTransport, C: NoteCipher> Note<'p, T, C> {
    fn empty(service: &'p Privnote<T, C>, state: NoteState) -> Self {
        Self {
            service,
            state,
            identifier: None,
            link: None,
            secret: None,
            secret_origin: None,
            plaintext: None,
            ciphertext: None,
            settings: None,
            server_response: None,
        }
    }

    // --- Accessors ---

    pub fn state(&self) -> NoteState {
        self.state
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// The public link, with the secret as fragment unless it was manual.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn secret(&self) -> Option<&Secret> {
        self.secret.as_ref()
    }

    /// Whether the secret was chosen by the caller (and so stays out of the link).
    ///
    /// After `send` this is the service's own view of the flag.
    pub fn has_manual_pass(&self) -> bool {
        self.server_response
            .as_ref()
            .and_then(|response| response.get("has_manual_pass"))
            .and_then(Value::as_bool)
            .or_else(|| self.secret_origin.map(SecretOrigin::is_manual))
            .unwrap_or(false)
    }

    pub fn plaintext(&self) -> Option<&str> {
        self.plaintext.as_deref()
    }

    pub fn ciphertext(&self) -> Option<&[u8]> {
        self.ciphertext.as_deref()
    }

    pub fn settings(&self) -> Option<&NoteSettings> {
        self.settings.as_ref()
    }

    /// The last raw response from the service.
    pub fn server_response(&self) -> Option<&Map<String, Value>> {
        self.server_response.as_ref()
    }

    // --- Mutators ---

    /// Set the identifier; the link is re-derived from it.
    pub fn set_identifier(&mut self, identifier: &str) -> Result<()> {
        self.require_state("set the identifier of", &[NoteState::Addressed])?;
        let parsed = link::parse(&self.service.config.origin, identifier)?;
        if parsed.secret.is_some() {
            return Err(NoteError::InvalidLink(
                "Expected an identifier, got a link with a secret".to_string(),
            ));
        }
        self.identifier = Some(parsed.identifier);
        self.refresh_link();
        Ok(())
    }

    /// Supply an out-of-band secret for a note being read.
    ///
    /// Allowed before fetching and after it, so a rejected secret can be
    /// replaced without another (impossible) fetch.
    pub fn set_secret(&mut self, secret: impl Into<Secret>) -> Result<()> {
        self.require_state(
            "set the secret of",
            &[NoteState::Addressed, NoteState::Fetched],
        )?;
        self.secret = Some(secret.into());
        self.secret_origin = Some(SecretOrigin::Manual);
        self.refresh_link();
        Ok(())
    }

    // --- Write path ---

    /// Encrypt the plaintext with the note's secret.
    pub fn encrypt(&mut self) -> Result<()> {
        self.require_state("encrypt", &[NoteState::Draft])?;
        let secret = self.secret.as_ref().ok_or(NoteError::SecretRequired)?;
        let plaintext = self.plaintext.as_deref().unwrap_or_default();

        let ciphertext = self
            .service
            .cipher
            .encrypt(plaintext, secret.as_bytes())
            .map_err(|e| match e {
                CipherError::InvalidKey(message) | CipherError::Malformed(message) => {
                    NoteError::BadSecret(message)
                }
                CipherError::IncorrectSecret => {
                    NoteError::BadSecret("cipher rejected the secret".to_string())
                }
            })?;

        self.ciphertext = Some(ciphertext);
        self.state = NoteState::Encrypted;
        debug!("note encrypted");
        Ok(())
    }

    /// Send the ciphertext and settings to the service.
    ///
    /// The identifier and link are derived from the response, using the
    /// response's own manual-pass flag.
    pub fn send(&mut self) -> Result<()> {
        self.require_state("send", &[NoteState::Encrypted])?;
        let settings = self
            .settings
            .as_ref()
            .ok_or_else(|| NoteError::InvalidOptions("Note has no settings".to_string()))?;
        let data = STANDARD.encode(self.ciphertext.as_deref().unwrap_or_default());

        let body = {
            let request = settings.to_request(&data);
            self.service
                .transport
                .create(&self.service.config.create_url(), &request)?
        };

        let object = wire::parse_object(&body).ok_or_else(|| {
            NoteError::Protocol("Create response is not a JSON object".to_string())
        })?;
        let response: CreateResponse = serde_json::from_value(Value::Object(object.clone()))
            .map_err(|e| NoteError::Protocol(format!("Unexpected create response: {}", e)))?;
        let parsed = link::parse(&self.service.config.origin, &response.note_link)
            .map_err(|e| NoteError::Protocol(format!("Unexpected note_link: {}", e)))?;

        self.server_response = Some(object);
        self.identifier = Some(parsed.identifier);
        self.state = NoteState::Sent;
        self.refresh_link();

        debug!(
            identifier = self.identifier(),
            has_manual_pass = response.has_manual_pass,
            "note sent"
        );
        Ok(())
    }

    // --- Read path ---

    /// Fetch the ciphertext, destroying the server copy.
    ///
    /// # Errors
    ///
    /// - `NoteError::AlreadyDestroyed` if the service reports the note gone
    /// - `NoteError::NotFound` if the response is not a JSON object
    /// - `NoteError::Protocol` for any other response without data
    pub fn fetch_and_destroy(&mut self) -> Result<()> {
        self.require_state("fetch", &[NoteState::Addressed])?;
        let note_id = self
            .identifier
            .clone()
            .ok_or_else(|| NoteError::InvalidLink("Note has no identifier".to_string()))?;

        let url = link::note_url(&self.service.config.origin, &note_id);
        let body = self.service.transport.destroy(&url)?;

        let Some(object) = wire::parse_object(&body) else {
            warn!(identifier = %note_id, "destructive read returned no JSON object");
            return Err(NoteError::NotFound { note_id });
        };
        self.server_response = Some(object.clone());

        let response: DestroyResponse = serde_json::from_value(Value::Object(object))
            .map_err(|e| NoteError::Protocol(format!("Unexpected read response: {}", e)))?;

        let data = match response.data.filter(|data| !data.is_empty()) {
            Some(data) => data,
            None => {
                return Err(match response.destroyed {
                    Some(destroyed) => match wire::parse_destroyed(&destroyed) {
                        Some(destroyed) => {
                            warn!(identifier = %note_id, %destroyed, "note already destroyed");
                            NoteError::AlreadyDestroyed { note_id, destroyed }
                        }
                        None => NoteError::Protocol(format!(
                            "Unrecognized destroyed timestamp: {}",
                            destroyed
                        )),
                    },
                    None => NoteError::Protocol("No data in response".to_string()),
                })
            }
        };

        // Tolerate line-wrapped base64 (`openssl enc -a` wraps at 64 columns).
        let compact: String = data.split_ascii_whitespace().collect();
        let ciphertext = STANDARD
            .decode(compact)
            .map_err(|e| NoteError::Protocol(format!("Note data is not base64: {}", e)))?;

        self.ciphertext = Some(ciphertext);
        self.state = NoteState::Fetched;
        debug!(identifier = %note_id, "note fetched and destroyed");
        Ok(())
    }

    /// Decrypt the fetched ciphertext.
    ///
    /// On `IncorrectSecret` the note stays `Fetched`; supply another secret
    /// with [`Note::set_secret`] and call again.
    pub fn decrypt(&mut self) -> Result<()> {
        self.require_state("decrypt", &[NoteState::Fetched])?;
        let secret = self.secret.as_ref().ok_or(NoteError::SecretRequired)?;
        let ciphertext = self.ciphertext.as_deref().unwrap_or_default();

        let plaintext = self
            .service
            .cipher
            .decrypt(ciphertext, secret.as_bytes())
            .map_err(|e| match e {
                CipherError::IncorrectSecret | CipherError::InvalidKey(_) => {
                    NoteError::IncorrectSecret {
                        note_id: self.identifier.clone(),
                    }
                }
                CipherError::Malformed(message) => NoteError::Crypto(message),
            })?;

        self.plaintext = Some(plaintext);
        self.state = NoteState::Decrypted;
        debug!(identifier = self.identifier(), "note decrypted");
        Ok(())
    }

    fn require_state(&self, operation: &'static str, allowed: &[NoteState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(NoteError::InvalidState {
                operation,
                state: self.state.as_str(),
            })
        }
    }

    /// Identifier and link are two views of one fact; keep them in step.
    fn refresh_link(&mut self) {
        let has_manual_pass = self.has_manual_pass();
        self.link = self.identifier.as_deref().map(|identifier| {
            link::render(
                &self.service.config.origin,
                identifier,
                self.secret.as_ref(),
                has_manual_pass,
            )
        });
    }
}

impl<T, C> std::fmt::Debug for Note<'_, T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Note")
            .field("state", &self.state)
            .field("identifier", &self.identifier)
            .field("has_secret", &self.secret.is_some())
            .field("secret_origin", &self.secret_origin)
            .field("has_plaintext", &self.plaintext.is_some())
            .field("ciphertext_len", &self.ciphertext.as_ref().map(Vec::len))
            .field("settings", &self.settings)
            .finish()
    }
}
