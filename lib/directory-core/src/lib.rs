//! Core gateway directory functionality
//!
//! This library provides:
//! - Directory cache holding the current set of reachable gateway endpoints
//! - Endpoint address type and `host:port` parsing
//! - The source trait through which the cache is populated

pub mod cache;
pub mod endpoint;
pub mod error;
pub mod source;

pub use cache::DirectoryCache;
pub use endpoint::Endpoint;
pub use error::{DirectoryError, Result};
pub use source::DirectorySource;
