//! HTTP access to the remote gateway directory
pub mod client;
pub mod discovery;

pub use client::{DirectoryClient, DirectoryClientConfig};
pub use discovery::WebDirectory;
