//! Service endpoint configuration.

use std::time::Duration;

use url::Url;

use crate::error::{NoteError, Result};
use crate::link::DEFAULT_ORIGIN;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Browser-like agent string; the service rejects obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Path of the creation endpoint, relative to the origin.
const CREATE_PATH: &str = "legacy/";

/// Where notes live and how to talk to the service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub origin: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            origin: Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL"),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ServiceConfig {
    /// Default configuration pointed at another origin.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::InvalidOptions` if `origin` is not an absolute
    /// http(s) URL without a path.
    pub fn with_origin(origin: &str) -> Result<Self> {
        let parsed = Url::parse(origin)
            .map_err(|e| NoteError::InvalidOptions(format!("Invalid origin {}: {}", origin, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(NoteError::InvalidOptions(format!(
                "Origin must be an http(s) URL with a host: {}",
                origin
            )));
        }
        if parsed.path() != "/" {
            return Err(NoteError::InvalidOptions(format!(
                "Origin must not carry a path: {}",
                origin
            )));
        }
        Ok(Self {
            origin: parsed,
            ..Self::default()
        })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of the creation endpoint.
    pub fn create_url(&self) -> String {
        format!("{}/{}", self.origin.as_str().trim_end_matches('/'), CREATE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = ServiceConfig::default();
        assert_eq!(config.create_url(), "https://privnote.com/legacy/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_with_origin() {
        let config = ServiceConfig::with_origin("http://127.0.0.1:8080").unwrap();
        assert_eq!(config.create_url(), "http://127.0.0.1:8080/legacy/");
    }

    #[test]
    fn test_with_origin_rejects_bad_values() {
        assert!(ServiceConfig::with_origin("not a url").is_err());
        assert!(ServiceConfig::with_origin("ftp://privnote.com").is_err());
        assert!(ServiceConfig::with_origin("https://privnote.com/notes").is_err());
    }
}
