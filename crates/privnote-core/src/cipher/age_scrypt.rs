//! Age passphrase encryption (`age` feature).
//!
//! Not readable by the service's web client; only useful between callers
//! that both use this cipher.

use age::secrecy::SecretString;
use age::{scrypt, DecryptError};

use super::{CipherError, NoteCipher};

/// Age scrypt-recipient cipher.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeCipher;

fn passphrase(secret: &[u8]) -> Option<SecretString> {
    match std::str::from_utf8(secret) {
        Ok(text) if !text.is_empty() => Some(SecretString::from(text.to_string())),
        _ => None,
    }
}

impl NoteCipher for AgeCipher {
    fn encrypt(&self, plaintext: &str, secret: &[u8]) -> Result<Vec<u8>, CipherError> {
        let passphrase = passphrase(secret).ok_or_else(|| {
            CipherError::InvalidKey("age needs a non-empty UTF-8 passphrase".to_string())
        })?;
        age::encrypt(&scrypt::Recipient::new(passphrase), plaintext.as_bytes())
            .map_err(|e| CipherError::InvalidKey(e.to_string()))
    }

    fn decrypt(&self, ciphertext: &[u8], secret: &[u8]) -> Result<String, CipherError> {
        let passphrase = passphrase(secret).ok_or(CipherError::IncorrectSecret)?;
        let bytes = age::decrypt(&scrypt::Identity::new(passphrase), ciphertext).map_err(
            |e| match e {
                DecryptError::NoMatchingKeys
                | DecryptError::DecryptionFailed
                | DecryptError::KeyDecryptionFailed => CipherError::IncorrectSecret,
                other => CipherError::Malformed(other.to_string()),
            },
        )?;
        String::from_utf8(bytes).map_err(|_| CipherError::Malformed("plaintext is not UTF-8".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_wrong_secret() {
        let sealed = AgeCipher.encrypt("meet at noon", b"Ab3dE6gH9").unwrap();
        assert!(sealed.starts_with(b"age-encryption.org/v1"));
        assert_eq!(AgeCipher.decrypt(&sealed, b"Ab3dE6gH9").unwrap(), "meet at noon");
        assert_eq!(
            AgeCipher.decrypt(&sealed, b"not-it"),
            Err(CipherError::IncorrectSecret)
        );
    }

    #[test]
    fn test_salted_ciphertext_is_malformed_here() {
        let result = AgeCipher.decrypt(b"Salted__12345678abcdefghabcdefgh", b"k");
        assert!(matches!(result, Err(CipherError::Malformed(_))));
    }

    #[test]
    fn test_byte_secrets_are_unusable() {
        assert!(matches!(
            AgeCipher.encrypt("x", &[0xff, 0xfe]),
            Err(CipherError::InvalidKey(_))
        ));
        assert_eq!(
            AgeCipher.decrypt(b"anything", &[0xff]),
            Err(CipherError::IncorrectSecret)
        );
    }
}
