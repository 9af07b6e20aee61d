use std::time::Duration;

use reqwest::Url;

use composite_smoke_core::{SmokeError, SmokeResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the client sends requests and how long it waits for each one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Validate and build a config.
    ///
    /// `base_url` must be an absolute `http`/`https` URL; a trailing slash is
    /// dropped so endpoint paths can be appended as-is.
    pub fn new(base_url: &str, timeout: Duration) -> SmokeResult<Self> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|e| SmokeError::invalid_config(format!("base url {base_url:?}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SmokeError::invalid_config(format!(
                "base url {base_url:?}: scheme must be http or https"
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(SmokeError::invalid_config(format!(
                "base url {base_url:?}: must not carry a query or fragment"
            )));
        }
        if timeout.is_zero() {
            return Err(SmokeError::invalid_config("timeout must be greater than zero"));
        }

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for `path` (which must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
