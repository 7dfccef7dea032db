//! # Privnote Core
//!
//! Client-side model for self-destructing encrypted notes. Note bodies are
//! encrypted locally before they are sent, so the service only ever stores
//! ciphertext. The secret travels out-of-band: either chosen by the sender,
//! or generated and carried in the link fragment, which browsers and HTTP
//! clients never send to the server.
//!
//! ## Architecture
//!
//! - **secret**: Secret resolution and generation
//! - **link**: Parsing and rendering public note links
//! - **settings**: Validated creation settings
//! - **cipher**: Cipher seam and the service-compatible AES cipher
//! - **transport**: Request executor seam and the default HTTP transport
//! - **note**: The note lifecycle (`Privnote`, `Note`)
//!
//! ## Example
//!
//! ```no_run
//! use privnote_core::{NoteOptions, Privnote, ServiceConfig};
//!
//! let privnote = Privnote::connect(ServiceConfig::default())?;
//! let note = privnote.create("meet at noon", NoteOptions::default())?;
//! println!("{}", note.link().unwrap_or_default());
//! # Ok::<(), privnote_core::NoteError>(())
//! ```

pub mod cipher;
pub mod config;
pub mod error;
pub mod link;
pub mod note;
pub mod secret;
pub mod settings;
pub mod transport;
pub mod validate;
pub mod wire;

#[cfg(feature = "age")]
pub use cipher::AgeCipher;
pub use cipher::{CipherError, NoteCipher, SaltedAesCipher};
pub use config::ServiceConfig;
pub use error::{NoteError, Result};
pub use note::{Note, NoteState, Privnote};
pub use secret::{Secret, SecretOrigin};
pub use settings::{NoteOptions, NoteSettings, SettingsBuilder};
pub use transport::{HttpTransport, NoteTransport, TransportError};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
