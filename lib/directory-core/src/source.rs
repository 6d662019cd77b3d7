//! Remote source the directory cache is populated from

use crate::Result;
use async_trait::async_trait;

/// Fetches the raw gateway list for a cell
///
/// Implementations return `host:port` strings on success. Network failures,
/// non-success result codes and empty lists must all come back as errors.
#[async_trait]
pub trait DirectorySource: Send + Sync {
    async fn fetch(&self, cell_id: u32) -> Result<Vec<String>>;
}
