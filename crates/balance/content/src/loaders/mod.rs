//! Content loaders for reading balance data from files.
//!
//! Each loader converts one file format into a `balance-core` type.
//! [`ContentFactory`] knows the data directory layout and bundles them.

pub mod config;
pub mod document;
pub mod dump;
pub mod factory;
pub mod roster;
pub mod tables;

pub use config::ConfigLoader;
pub use document::DocumentLoader;
pub use dump::DumpLoader;
pub use factory::{Content, ContentFactory};
pub use roster::RosterLoader;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
