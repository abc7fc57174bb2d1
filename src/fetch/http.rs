//! Blocking HTTP source for the RFC Editor repository.

use std::time::Duration;

use tracing::{debug, info};
use ureq::Agent;

use crate::error::FetchError;

use super::DocumentSource;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Largest response body accepted; PDF renderings of long RFCs run to
/// several megabytes.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Configuration for [`HttpSource`].
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Repository root; file names are appended to it.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.rfc-editor.org/rfc/".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
        }
    }
}

impl HttpSourceConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Document source backed by a `ureq` agent.
pub struct HttpSource {
    agent: Agent,
    base_url: String,
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpSource {
    pub fn new() -> Self {
        Self::with_config(HttpSourceConfig::default())
    }

    pub fn with_config(config: HttpSourceConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        let mut base_url = config.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { agent, base_url }
    }

    /// Full URL of a repository file.
    pub fn url_for(&self, name: &str) -> String {
        format!("{}{name}", self.base_url)
    }
}

impl DocumentSource for HttpSource {
    fn fetch_file(&self, name: &str) -> Result<Option<Vec<u8>>, FetchError> {
        let url = self.url_for(name);
        info!("Downloading {url}");

        let response = self.agent.get(&url).call()?;
        let status = response.status().as_u16();
        match status {
            200..=299 => {
                let mut body = response.into_body();
                let bytes = body
                    .with_config()
                    .limit(MAX_BODY_BYTES)
                    .read_to_vec()?;
                debug!("{url}: {} bytes", bytes.len());
                Ok(Some(bytes))
            }
            404 => Ok(None),
            _ => Err(FetchError::HttpStatus { status, url }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpSourceConfig::default();
        assert_eq!(config.base_url, "https://www.rfc-editor.org/rfc/");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_url_for_adds_missing_slash() {
        let source = HttpSource::with_config(
            HttpSourceConfig::default().with_base_url("http://mirror.example/rfc"),
        );
        assert_eq!(
            source.url_for("rfc2119.xml"),
            "http://mirror.example/rfc/rfc2119.xml"
        );
    }
}
