//! The request executor seam.
//!
//! The lifecycle hands fully-formed URLs and form bodies to a
//! `NoteTransport` and gets the raw response body back. Interpreting that
//! body (including "this is not JSON at all") is the lifecycle's job, so the
//! transport never guesses at note semantics. `HttpTransport` is the default
//! implementation; tests substitute their own.

pub mod http;

use thiserror::Error;

use crate::wire::CreateRequest;

pub use http::HttpTransport;

/// Failure to complete a request.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

/// Executes the two requests a note ever needs.
///
/// Neither call is retried by the caller: `destroy` is at-most-once on the
/// server and `create` retry policy belongs to whoever drives the note.
pub trait NoteTransport {
    /// POST the create form to `url` and return the response body.
    fn create(&self, url: &str, request: &CreateRequest<'_>) -> Result<String, TransportError>;

    /// Issue the destructive read against `url` and return the response body.
    fn destroy(&self, url: &str) -> Result<String, TransportError>;
}

impl<T: NoteTransport + ?Sized> NoteTransport for &T {
    fn create(&self, url: &str, request: &CreateRequest<'_>) -> Result<String, TransportError> {
        (**self).create(url, request)
    }

    fn destroy(&self, url: &str) -> Result<String, TransportError> {
        (**self).destroy(url)
    }
}
