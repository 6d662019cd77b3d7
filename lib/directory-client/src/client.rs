//! HTTP client configuration for the directory web API

use std::time::Duration;
use tracing::warn;

/// Default public directory endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.steampowered.com";

/// Connection settings for the directory web API
#[derive(Clone, Debug, PartialEq)]
pub struct DirectoryClientConfig {
    /// Base URL the `GetCMList` path is appended to
    pub base_url: String,
    /// Timeout for a whole request, connect included
    pub timeout: Duration,
}

impl Default for DirectoryClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl DirectoryClientConfig {
    /// Load from `DIRECTORY_BASE_URL` and `DIRECTORY_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("DIRECTORY_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = lookup("DIRECTORY_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Invalid DIRECTORY_TIMEOUT_SECS {:?}, using {:?}",
                    raw, config.timeout
                ),
            }
        }

        config
    }
}

/// DirectoryClient wraps the HTTP client used to reach the directory
#[derive(Clone, Debug)]
pub struct DirectoryClient {
    client: reqwest::Client,
    config: DirectoryClientConfig,
}

impl DirectoryClient {
    /// Create a new directory client
    pub fn new(config: DirectoryClientConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Get the underlying HTTP client
    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn config(&self) -> &DirectoryClientConfig {
        &self.config
    }

    /// Absolute URL for a path under the configured base
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}
