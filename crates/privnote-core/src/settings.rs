//! Note creation settings.
//!
//! `SettingsBuilder` validates the caller's options and produces the
//! `NoteSettings` that are merged with the ciphertext into a create request.

use crate::error::{NoteError, Result};
use crate::secret::Secret;
use crate::validate::is_email;
use crate::wire::CreateRequest;

/// Longest retention the service accepts (30 days).
pub const MAX_DURATION_HOURS: u32 = 720;

/// The service's marker for a text note.
pub const DATA_TYPE_TEXT: &str = "T";

/// Who to tell when the note is destroyed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub email: String,
    pub reference: String,
}

/// Validated creation parameters for a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSettings {
    has_manual_pass: bool,
    duration_hours: u32,
    ask_confirm: bool,
    notify: Option<Notification>,
}

impl NoteSettings {
    pub fn data_type(&self) -> &'static str {
        DATA_TYPE_TEXT
    }

    pub fn has_manual_pass(&self) -> bool {
        self.has_manual_pass
    }

    /// Hours the note lives unread; 0 means it is destroyed on first read.
    pub fn duration_hours(&self) -> u32 {
        self.duration_hours
    }

    pub fn ask_confirm(&self) -> bool {
        self.ask_confirm
    }

    pub fn notify(&self) -> Option<&Notification> {
        self.notify.as_ref()
    }

    /// Merge these settings with transmissible ciphertext into a create request.
    pub fn to_request<'a>(&'a self, data: &'a str) -> CreateRequest<'a> {
        let (notify_email, notify_ref) = match &self.notify {
            Some(notification) => (
                notification.email.as_str(),
                notification.reference.as_str(),
            ),
            None => ("", ""),
        };

        CreateRequest {
            data_type: DATA_TYPE_TEXT,
            has_manual_pass: if self.has_manual_pass { "true" } else { "false" },
            duration_hours: self.duration_hours,
            dont_ask: if self.ask_confirm { "False" } else { "True" },
            notify_email,
            notify_ref,
            data,
        }
    }
}

/// Builder for [`NoteSettings`].
#[derive(Debug, Clone)]
pub struct SettingsBuilder {
    manual_secret: bool,
    duration_hours: Option<u32>,
    ask_confirm: bool,
    notify_email: Option<String>,
    notify_ref: String,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self {
            manual_secret: false,
            duration_hours: None,
            ask_confirm: true,
            notify_email: None,
            notify_ref: String::new(),
        }
    }
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether the secret was chosen by the caller.
    pub fn manual_secret(mut self, manual: bool) -> Self {
        self.manual_secret = manual;
        self
    }

    pub fn duration_hours(mut self, hours: Option<u32>) -> Self {
        self.duration_hours = hours;
        self
    }

    pub fn ask_confirm(mut self, ask: bool) -> Self {
        self.ask_confirm = ask;
        self
    }

    /// Ask the service to email `email` when the note is destroyed.
    ///
    /// `reference` is a free-form name included in that email.
    pub fn notify(mut self, email: Option<String>, reference: impl Into<String>) -> Self {
        self.notify_email = email;
        self.notify_ref = reference.into();
        self
    }

    /// Validate and assemble the settings.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::InvalidOptions` if:
    /// - `duration_hours` exceeds 720
    /// - a notification email is given but is not well-formed
    pub fn build(self) -> Result<NoteSettings> {
        let duration_hours = self.duration_hours.unwrap_or(0);
        if duration_hours > MAX_DURATION_HOURS {
            return Err(NoteError::InvalidOptions(format!(
                "Duration hours cannot exceed {} (got {})",
                MAX_DURATION_HOURS, duration_hours
            )));
        }

        let notify = match self.notify_email.filter(|email| !email.trim().is_empty()) {
            Some(email) => {
                let email = email.trim().to_string();
                if !is_email(&email) {
                    return Err(NoteError::InvalidOptions(format!(
                        "Notify email is incorrect: {}",
                        email
                    )));
                }
                Some(Notification {
                    email,
                    reference: self.notify_ref,
                })
            }
            None => None,
        };

        Ok(NoteSettings {
            has_manual_pass: self.manual_secret,
            duration_hours,
            ask_confirm: self.ask_confirm,
            notify,
        })
    }
}

/// Everything a caller chooses when composing a note.
#[derive(Debug, Clone)]
pub struct NoteOptions {
    /// Caller-chosen secret; `None` means one is generated.
    pub secret: Option<Secret>,
    pub duration_hours: Option<u32>,
    pub ask_confirm: bool,
    pub notify_email: Option<String>,
    pub notify_ref: String,
}

impl Default for NoteOptions {
    fn default() -> Self {
        Self {
            secret: None,
            duration_hours: None,
            ask_confirm: true,
            notify_email: None,
            notify_ref: String::new(),
        }
    }
}

impl NoteOptions {
    /// Check the options without composing a note.
    pub fn validate(&self) -> Result<()> {
        self.settings_builder(self.secret.is_some())
            .build()
            .map(|_| ())
    }

    /// A settings builder carrying these options.
    pub(crate) fn settings_builder(&self, manual_secret: bool) -> SettingsBuilder {
        SettingsBuilder::new()
            .manual_secret(manual_secret)
            .duration_hours(self.duration_hours)
            .ask_confirm(self.ask_confirm)
            .notify(self.notify_email.clone(), self.notify_ref.clone())
    }
}
