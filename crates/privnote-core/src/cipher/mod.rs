//! The symmetric cipher seam.
//!
//! The note lifecycle treats the cipher as an opaque primitive: plaintext and
//! secret go in, ciphertext bytes come out, and the inverse reports whether
//! the secret was wrong or the ciphertext was damaged.
//!
//! `SaltedAesCipher` speaks the service's own format and is the default.
//! With the `age` feature, `AgeCipher` is available for callers that only
//! exchange notes with other clients of this crate.

#[cfg(feature = "age")]
pub mod age_scrypt;
pub mod salted_aes;

use thiserror::Error;

#[cfg(feature = "age")]
pub use age_scrypt::AgeCipher;
pub use salted_aes::SaltedAesCipher;

/// Failure reported by a cipher.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// The secret does not open this ciphertext
    #[error("incorrect secret")]
    IncorrectSecret,

    /// The secret cannot be used as a key at all
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The ciphertext is not in the expected format
    #[error("malformed ciphertext: {0}")]
    Malformed(String),
}

/// Encrypts note bodies before they leave the client.
pub trait NoteCipher {
    fn encrypt(&self, plaintext: &str, secret: &[u8]) -> Result<Vec<u8>, CipherError>;

    fn decrypt(&self, ciphertext: &[u8], secret: &[u8]) -> Result<String, CipherError>;
}

impl<C: NoteCipher + ?Sized> NoteCipher for &C {
    fn encrypt(&self, plaintext: &str, secret: &[u8]) -> Result<Vec<u8>, CipherError> {
        (**self).encrypt(plaintext, secret)
    }

    fn decrypt(&self, ciphertext: &[u8], secret: &[u8]) -> Result<String, CipherError> {
        (**self).decrypt(ciphertext, secret)
    }
}
