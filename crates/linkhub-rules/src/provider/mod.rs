//! Providers for loading hub snapshots from various sources.

pub mod file;

pub use file::{FileProvider, HubSnapshot};
