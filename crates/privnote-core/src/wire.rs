//! Request and response shapes exchanged with the service.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Timestamp format of the `destroyed` marker, e.g. `2024-01-01T00:00:00.000000`.
pub const DESTROYED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Form body of a create request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRequest<'a> {
    pub data_type: &'static str,
    pub has_manual_pass: &'static str,
    pub duration_hours: u32,
    pub dont_ask: &'static str,
    pub notify_email: &'a str,
    pub notify_ref: &'a str,
    /// Ciphertext in transmissible (base64) form
    pub data: &'a str,
}

/// Fields the client relies on in a create response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResponse {
    pub note_link: String,
    #[serde(default)]
    pub has_manual_pass: bool,
}

/// Fields of a destructive-read response.
///
/// On success `data` holds the ciphertext. A consumed note carries
/// `destroyed` instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DestroyResponse {
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub destroyed: Option<String>,
}

/// Parse a response body into a JSON object.
///
/// Returns `None` when the body is not JSON or not an object.
pub fn parse_object(body: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Parse the service's `destroyed` timestamp.
pub fn parse_destroyed(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DESTROYED_FORMAT).ok()
}
