//! Blocking HTTP transport.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER};
use tracing::debug;

use super::{NoteTransport, TransportError};
use crate::config::ServiceConfig;
use crate::wire::CreateRequest;

const ACCEPT_JSON: &str = "application/json, text/javascript, */*; q=0.01";

/// `NoteTransport` over a reusable `reqwest` blocking client.
///
/// The client is built once with the fixed header set; clone the transport
/// to share its connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
        let origin = config.origin.origin().ascii_serialization();

        let mut default_headers = HeaderMap::new();
        default_headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        default_headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));
        default_headers.insert(
            ORIGIN,
            HeaderValue::from_str(&origin)
                .map_err(|e| TransportError::Other(format!("Invalid origin header: {}", e)))?,
        );
        default_headers.insert(
            REFERER,
            HeaderValue::from_str(&format!("{}/", origin))
                .map_err(|e| TransportError::Other(format!("Invalid referer header: {}", e)))?,
        );

        let client = Client::builder()
            .default_headers(default_headers)
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl NoteTransport for HttpTransport {
    fn create(&self, url: &str, request: &CreateRequest<'_>) -> Result<String, TransportError> {
        let response = self.client.post(url).form(request).send()?;
        debug!(status = %response.status(), "create request completed");
        Ok(response.text()?)
    }

    fn destroy(&self, url: &str) -> Result<String, TransportError> {
        let response = self.client.delete(url).send()?;
        debug!(status = %response.status(), "destructive read completed");
        Ok(response.text()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_from_default_config() {
        let transport = HttpTransport::new(&ServiceConfig::default());
        assert!(transport.is_ok());
    }
}
