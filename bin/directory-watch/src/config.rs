//! Watch daemon settings

use directory_client::DirectoryClientConfig;
use std::time::Duration;
use tracing::warn;

#[derive(Clone, Debug, PartialEq)]
pub struct WatchConfig {
    /// Cell the directory is asked to bias its list towards
    pub cell_id: u32,
    /// Interval between refreshes once the cache is ready
    pub refresh_interval: Duration,
    pub client: DirectoryClientConfig,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            cell_id: 0,
            refresh_interval: Duration::from_secs(300),
            client: DirectoryClientConfig::default(),
        }
    }
}

impl WatchConfig {
    /// Load from `DIRECTORY_CELL_ID`, `DIRECTORY_REFRESH_SECS` and the client variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), DirectoryClientConfig::from_env())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, client: DirectoryClientConfig) -> Self {
        let mut config = Self {
            client,
            ..Self::default()
        };

        if let Some(raw) = lookup("DIRECTORY_CELL_ID") {
            match raw.parse::<u32>() {
                Ok(cell_id) => config.cell_id = cell_id,
                Err(_) => warn!("Invalid DIRECTORY_CELL_ID {:?}, using {}", raw, config.cell_id),
            }
        }
        if let Some(raw) = lookup("DIRECTORY_REFRESH_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.refresh_interval = Duration::from_secs(secs),
                _ => warn!(
                    "Invalid DIRECTORY_REFRESH_SECS {:?}, using {:?}",
                    raw, config.refresh_interval
                ),
            }
        }

        config
    }
}
