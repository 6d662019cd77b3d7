//! Initialization retry and periodic refresh around the directory cache

use directory_core::{DirectoryCache, DirectorySource};
use std::time::Duration;
use tracing::{info, warn};

/// Capped exponential backoff between initialization attempts
#[derive(Clone, Debug)]
pub struct Backoff {
    pub initial: Duration,
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_secs(1),
            max: Duration::from_secs(60),
        }
    }
}

impl Backoff {
    /// Delay before retry number `attempt` (zero based)
    pub fn delay(&self, attempt: u32) -> Duration {
        let base = self.initial.as_millis() as u64;
        let exponential = 2u64.saturating_pow(attempt);
        let delay_ms = base.saturating_mul(exponential).min(self.max.as_millis() as u64);
        Duration::from_millis(delay_ms)
    }
}

/// Keep initializing until the cache holds a list
pub async fn initialize_until_ready<S>(
    cache: &DirectoryCache,
    source: &S,
    cell_id: u32,
    backoff: &Backoff,
) -> usize
where
    S: DirectorySource + ?Sized,
{
    let mut attempt = 0u32;
    loop {
        match cache.initialize(source, cell_id).await {
            Ok(count) => return count,
            Err(e) => {
                let delay = backoff.delay(attempt);
                warn!("Directory initialization failed (attempt {}): {}, retrying in {:?}", attempt + 1, e, delay);
                tokio::time::sleep(delay).await;
                attempt = attempt.saturating_add(1);
            }
        }
    }
}

/// Log the current size of the cache and one random pick
pub async fn report(cache: &DirectoryCache) {
    match cache.random().await {
        Ok(endpoint) => info!(
            "Directory holds {} endpoints (refreshed at {:?}), picked {}",
            cache.len().await,
            cache.refreshed_at().await,
            endpoint
        ),
        Err(e) => warn!("No endpoint available: {}", e),
    }
}
