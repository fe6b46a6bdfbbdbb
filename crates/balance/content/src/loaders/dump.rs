//! Game snapshot dump loader.

use std::path::Path;

use balance_core::UnitRecord;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

/// Top-level shape of a snapshot dump. Fields other than `units` (the
/// production tree, dump metadata) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotDump {
    pub units: Vec<UnitRecord>,
}

/// Loader for snapshot dumps written by the in-game dumper.
pub struct DumpLoader;

impl DumpLoader {
    /// Load every unit record, in dump order.
    pub fn load(path: &Path) -> LoadResult<Vec<UnitRecord>> {
        let content = read_file(path)?;
        let dump: SnapshotDump = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse snapshot JSON {}: {}", path.display(), e))?;

        tracing::debug!(path = %path.display(), records = dump.units.len(), "snapshot loaded");
        Ok(dump.units)
    }
}
