//! OpenSSL-compatible passphrase encryption.
//!
//! This is the format the service's own web client reads and writes
//! (CryptoJS `AES.encrypt(text, passphrase)`, `openssl enc -aes-256-cbc -md md5`):
//!
//! ```text
//! "Salted__" | salt (8 bytes) | AES-256-CBC(PKCS#7) ciphertext
//! ```
//!
//! Key and IV come from `EVP_BytesToKey` with MD5, one iteration. The
//! lifecycle base64-encodes the whole thing for the wire.

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use md5::{Digest, Md5};
use zeroize::Zeroizing;

use super::{CipherError, NoteCipher};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Header that opens every salted ciphertext.
pub const SALTED_MAGIC: &[u8; 8] = b"Salted__";

const SALT_LEN: usize = 8;
const KEY_LEN: usize = 32;
const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;

/// AES-256-CBC with an `EVP_BytesToKey` (MD5) derived key.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaltedAesCipher;

impl SaltedAesCipher {
    /// Encrypt with a caller-chosen salt.
    pub fn encrypt_with_salt(
        &self,
        plaintext: &str,
        secret: &[u8],
        salt: [u8; SALT_LEN],
    ) -> Result<Vec<u8>, CipherError> {
        if secret.is_empty() {
            return Err(CipherError::InvalidKey("secret is empty".to_string()));
        }
        let material = derive_key_iv(secret, &salt);
        let encryptor =
            Aes256CbcEnc::new_from_slices(&material[..KEY_LEN], &material[KEY_LEN..])
                .map_err(|e| CipherError::InvalidKey(e.to_string()))?;
        let body = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        let mut out = Vec::with_capacity(SALTED_MAGIC.len() + SALT_LEN + body.len());
        out.extend_from_slice(SALTED_MAGIC);
        out.extend_from_slice(&salt);
        out.extend_from_slice(&body);
        Ok(out)
    }
}

impl NoteCipher for SaltedAesCipher {
    fn encrypt(&self, plaintext: &str, secret: &[u8]) -> Result<Vec<u8>, CipherError> {
        let mut salt = [0u8; SALT_LEN];
        getrandom::getrandom(&mut salt)
            .map_err(|e| CipherError::InvalidKey(format!("No randomness for salt: {}", e)))?;
        self.encrypt_with_salt(plaintext, secret, salt)
    }

    fn decrypt(&self, ciphertext: &[u8], secret: &[u8]) -> Result<String, CipherError> {
        let rest = ciphertext
            .strip_prefix(SALTED_MAGIC.as_slice())
            .ok_or_else(|| CipherError::Malformed("missing Salted__ header".to_string()))?;
        if rest.len() < SALT_LEN + BLOCK_LEN || (rest.len() - SALT_LEN) % BLOCK_LEN != 0 {
            return Err(CipherError::Malformed(format!(
                "ciphertext body has invalid length {}",
                rest.len().saturating_sub(SALT_LEN)
            )));
        }
        if secret.is_empty() {
            return Err(CipherError::IncorrectSecret);
        }

        let (salt, body) = rest.split_at(SALT_LEN);
        let material = derive_key_iv(secret, salt);
        let decryptor =
            Aes256CbcDec::new_from_slices(&material[..KEY_LEN], &material[KEY_LEN..])
                .map_err(|e| CipherError::Malformed(e.to_string()))?;

        // With a wrong key the padding (or, rarely, the text) comes out garbled.
        let plaintext = decryptor
            .decrypt_padded_vec_mut::<Pkcs7>(body)
            .map_err(|_| CipherError::IncorrectSecret)?;
        String::from_utf8(plaintext).map_err(|_| CipherError::IncorrectSecret)
    }
}

/// `EVP_BytesToKey(MD5, count = 1)`: key followed by IV.
fn derive_key_iv(secret: &[u8], salt: &[u8]) -> Zeroizing<Vec<u8>> {
    let mut material = Zeroizing::new(Vec::with_capacity(KEY_LEN + IV_LEN + 16));
    let mut previous: Vec<u8> = Vec::new();
    while material.len() < KEY_LEN + IV_LEN {
        let mut hasher = Md5::new();
        hasher.update(&previous);
        hasher.update(secret);
        hasher.update(salt);
        previous = hasher.finalize().to_vec();
        material.extend_from_slice(&previous);
    }
    material.truncate(KEY_LEN + IV_LEN);
    material
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    use super::*;

    // printf hello | openssl enc -aes-256-cbc -md md5 -k mysecret -a
    const OPENSSL_HELLO: &str = "U2FsdGVkX191qVIx7N/HIgMTYDOl8vOVdgDHQKFAsyI=";

    // Multi-block, non-ASCII text with a generated-style secret.
    const OPENSSL_MULTIBLOCK: &str =
        "U2FsdGVkX19BSAAztmz07EBDJHqjj6+XPEjx+kPNQRgc4aXlAPtc2f8fPvAvgxp1jS5EaT6nSmDPORitw3sHxA==";

    fn decode(text: &str) -> Vec<u8> {
        STANDARD.decode(text).unwrap()
    }

    #[test]
    fn test_decrypts_openssl_output() {
        let plaintext = SaltedAesCipher
            .decrypt(&decode(OPENSSL_HELLO), b"mysecret")
            .unwrap();
        assert_eq!(plaintext, "hello");

        let plaintext = SaltedAesCipher
            .decrypt(&decode(OPENSSL_MULTIBLOCK), b"Ab3dE6gH9")
            .unwrap();
        assert_eq!(plaintext, "Grüße, meet at the usual place at noon.");
    }

    #[test]
    fn test_encrypt_matches_openssl_for_same_salt() {
        let fixture = decode(OPENSSL_HELLO);
        let mut salt = [0u8; SALT_LEN];
        salt.copy_from_slice(&fixture[8..16]);

        let ours = SaltedAesCipher
            .encrypt_with_salt("hello", b"mysecret", salt)
            .unwrap();
        assert_eq!(ours, fixture);
        assert_eq!(STANDARD.encode(&ours), OPENSSL_HELLO);
    }

    #[test]
    fn test_round_trip_with_random_salt() {
        let first = SaltedAesCipher.encrypt("same text", b"pw").unwrap();
        let second = SaltedAesCipher.encrypt("same text", b"pw").unwrap();
        assert!(first.starts_with(SALTED_MAGIC));
        assert_ne!(first, second);
        assert_eq!(SaltedAesCipher.decrypt(&first, b"pw").unwrap(), "same text");
    }

    #[test]
    fn test_byte_secret_round_trip() {
        let secret = [0xff, 0x00, 0x41];
        let ciphertext = SaltedAesCipher.encrypt("", &secret).unwrap();
        assert_eq!(ciphertext.len(), 8 + SALT_LEN + BLOCK_LEN);
        assert_eq!(SaltedAesCipher.decrypt(&ciphertext, &secret).unwrap(), "");
    }

    #[test]
    fn test_wrong_secret_is_incorrect_secret() {
        let result = SaltedAesCipher.decrypt(&decode(OPENSSL_HELLO), b"wrongsecret");
        assert_eq!(result, Err(CipherError::IncorrectSecret));

        let result = SaltedAesCipher.decrypt(&decode(OPENSSL_HELLO), b"");
        assert_eq!(result, Err(CipherError::IncorrectSecret));
    }

    #[test]
    fn test_bad_framing_is_malformed() {
        let no_header = SaltedAesCipher.decrypt(b"age-encryption.org/v1", b"k");
        assert!(matches!(no_header, Err(CipherError::Malformed(_))));

        let mut truncated = decode(OPENSSL_HELLO);
        truncated.pop();
        let result = SaltedAesCipher.decrypt(&truncated, b"mysecret");
        assert!(matches!(result, Err(CipherError::Malformed(_))));

        let header_only = SaltedAesCipher.decrypt(b"Salted__12345678", b"k");
        assert!(matches!(header_only, Err(CipherError::Malformed(_))));
    }

    #[test]
    fn test_empty_secret_rejected_on_encrypt() {
        assert!(matches!(
            SaltedAesCipher.encrypt("x", b""),
            Err(CipherError::InvalidKey(_))
        ));
    }
}
