//! Directory cache for the currently reachable gateway endpoints

use crate::{DirectoryError, DirectorySource, Endpoint, Result};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// DirectoryCache holds the latest gateway list and hands out random members
///
/// The cache starts empty and not ready. It becomes ready the first time a
/// non-empty list is installed and stays ready from then on. Callers must
/// check `is_ready()` or handle `DirectoryError::NotReady` before relying on
/// `random()`.
pub struct DirectoryCache {
    state: Arc<RwLock<DirectoryState>>,
    // Serializes initializations without holding the state lock during a fetch
    refresh: Mutex<()>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    endpoints: Vec<Endpoint>,
    ready: bool,
    refreshed_at: Option<DateTime<Utc>>,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(DirectoryState::default())),
            refresh: Mutex::new(()),
        }
    }

    /// Populate the cache from a remote source
    ///
    /// Returns the number of endpoints installed. On error the previous
    /// contents and readiness are left untouched.
    pub async fn initialize<S>(&self, source: &S, cell_id: u32) -> Result<usize>
    where
        S: DirectorySource + ?Sized,
    {
        let _refresh = self.refresh.lock().await;

        debug!("Fetching directory for cell {}", cell_id);
        let raw = source.fetch(cell_id).await?;

        let endpoints = Endpoint::parse_list(&raw);
        if endpoints.is_empty() {
            return Err(DirectoryError::EmptyResult);
        }

        let count = endpoints.len();
        self.replace(endpoints).await;
        info!("Directory initialized with {} endpoints for cell {}", count, cell_id);
        Ok(count)
    }

    /// Replace the cached list with already resolved endpoints
    ///
    /// An empty list is ignored so the cache never reports ready without
    /// anything to hand out.
    pub async fn update(&self, endpoints: Vec<Endpoint>) {
        if endpoints.is_empty() {
            warn!("Ignoring directory update with no endpoints");
            return;
        }

        let count = endpoints.len();
        self.replace(endpoints).await;
        info!("Directory refreshed with {} endpoints", count);
    }

    /// Pick one endpoint uniformly at random
    pub async fn random(&self) -> Result<Endpoint> {
        let state = self.state.read().await;
        if !state.ready {
            return Err(DirectoryError::NotReady);
        }

        let picked = state.endpoints.choose(&mut rand::thread_rng()).cloned();
        picked.ok_or(DirectoryError::NotReady)
    }

    /// Whether a non-empty list has been installed
    pub async fn is_ready(&self) -> bool {
        self.state.read().await.ready
    }

    /// Snapshot of the cached endpoints in installation order
    pub async fn endpoints(&self) -> Vec<Endpoint> {
        self.state.read().await.endpoints.clone()
    }

    /// Number of cached endpoints
    pub async fn len(&self) -> usize {
        self.state.read().await.endpoints.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Time of the last successful replacement
    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.refreshed_at
    }

    async fn replace(&self, endpoints: Vec<Endpoint>) {
        let mut state = self.state.write().await;
        state.endpoints = endpoints;
        state.ready = true;
        state.refreshed_at = Some(Utc::now());
    }
}

impl Default for DirectoryCache {
    fn default() -> Self {
        Self::new()
    }
}
