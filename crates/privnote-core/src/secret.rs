//! Note secrets: caller-chosen or generated.
//!
//! A secret is the key material handed to the cipher. When the caller does
//! not supply one, a short alphanumeric secret is generated from the OS
//! random source. Generated secrets travel in the link fragment; manual ones
//! are expected to reach the recipient some other way.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{NoteError, Result};

/// Length of a generated secret, in characters.
pub const GENERATED_SECRET_LEN: usize = 9;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Largest multiple of the alphabet size that fits in a byte; bytes at or
/// above it are rejected so every symbol is equally likely.
const REJECTION_LIMIT: u8 = (256 / ALPHABET.len() * ALPHABET.len()) as u8;

/// Symmetric key material for a single note.
///
/// The bytes are zeroized on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct Secret {
    bytes: Vec<u8>,
}

impl Secret {
    /// Wrap raw bytes without any normalization.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Generate a fresh alphanumeric secret.
    pub fn generate() -> Result<Self> {
        let mut out = Vec::with_capacity(GENERATED_SECRET_LEN);
        let mut pool = [0u8; 32];

        while out.len() < GENERATED_SECRET_LEN {
            getrandom::getrandom(&mut pool)
                .map_err(|e| NoteError::BadSecret(format!("Random source failed: {}", e)))?;
            for byte in pool.iter().copied() {
                if byte >= REJECTION_LIMIT {
                    continue;
                }
                out.push(ALPHABET[usize::from(byte) % ALPHABET.len()]);
                if out.len() == GENERATED_SECRET_LEN {
                    break;
                }
            }
        }
        pool.zeroize();

        Ok(Self { bytes: out })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The secret as text, if it is valid UTF-8.
    ///
    /// Byte secrets that are not UTF-8 are accepted by the cipher but cannot
    /// be typed into the service's own web page.
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::from_bytes(value.as_bytes())
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::from_bytes(value.into_bytes())
    }
}

impl From<&[u8]> for Secret {
    fn from(value: &[u8]) -> Self {
        Self::from_bytes(value)
    }
}

impl From<Vec<u8>> for Secret {
    fn from(value: Vec<u8>) -> Self {
        Self::from_bytes(value)
    }
}

/// Where a note's secret came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretOrigin {
    /// Supplied by the caller; kept out of the link.
    Manual,
    /// Generated locally; carried in the link fragment.
    Generated,
}

impl SecretOrigin {
    pub fn is_manual(self) -> bool {
        matches!(self, SecretOrigin::Manual)
    }
}

/// Accept the caller's secret or generate one.
///
/// Text is canonicalized to UTF-8 bytes by the `From` conversions; bytes pass
/// through unchanged. An empty supplied secret counts as "not supplied".
pub fn resolve(supplied: Option<Secret>) -> Result<(Secret, SecretOrigin)> {
    match supplied {
        Some(secret) if !secret.is_empty() => Ok((secret, SecretOrigin::Manual)),
        _ => Ok((Secret::generate()?, SecretOrigin::Generated)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_secret_shape() {
        let secret = Secret::generate().unwrap();
        let text = secret.as_text().expect("generated secrets are text");
        assert_eq!(text.len(), GENERATED_SECRET_LEN);
        assert!(text.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_secrets_differ() {
        let first = Secret::generate().unwrap();
        let second = Secret::generate().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_resolve_keeps_manual_text() {
        let (secret, origin) = resolve(Some("hunter22".into())).unwrap();
        assert_eq!(secret.as_bytes(), b"hunter22");
        assert_eq!(origin, SecretOrigin::Manual);
    }

    #[test]
    fn test_resolve_passes_bytes_through() {
        let raw = vec![0xff, 0x00, 0x10];
        let (secret, origin) = resolve(Some(raw.clone().into())).unwrap();
        assert_eq!(secret.as_bytes(), raw.as_slice());
        assert!(secret.as_text().is_none());
        assert!(origin.is_manual());
    }

    #[test]
    fn test_resolve_generates_when_absent_or_empty() {
        let (_, origin) = resolve(None).unwrap();
        assert_eq!(origin, SecretOrigin::Generated);

        let (secret, origin) = resolve(Some("".into())).unwrap();
        assert_eq!(origin, SecretOrigin::Generated);
        assert_eq!(secret.as_bytes().len(), GENERATED_SECRET_LEN);
    }

    #[test]
    fn test_debug_redacts() {
        let secret = Secret::from("topsecret");
        let debug_output = format!("{:?}", secret);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("topsecret"));
    }
}
