//! Configuration types for the product client

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Where the service lives and how long to wait for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Scheme, host and port, e.g. `http://localhost:8000`
    pub base_url: String,

    /// Prefix the service mounts its API under
    pub api_prefix: String,

    /// Per-request timeout
    #[serde(with = "duration_serde")]
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_prefix: "/api/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base_url}{api_prefix}/mcp/message`
    pub fn message_url(&self) -> ClientResult<Url> {
        self.api_url("mcp/message")
    }

    /// Resolve `path` below the API prefix
    pub fn api_url(&self, path: &str) -> ClientResult<Url> {
        let prefix = self.api_prefix.trim_matches('/');
        let path = path.trim_start_matches('/');
        if prefix.is_empty() {
            self.url(path)
        } else {
            self.url(&format!("{}/{}", prefix, path))
        }
    }

    /// Resolve `path` against the base URL, ignoring the API prefix
    pub fn url(&self, path: &str) -> ClientResult<Url> {
        let base = Url::parse(&self.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "Unsupported scheme: {}",
                base.scheme()
            )));
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
