//! Roster classification loader.

use std::path::Path;

use balance_core::{Classification, RosterSection};

use crate::loaders::{LoadResult, read_file};

/// Loader for the ordered roster sections from a RON file.
///
/// ```ron
/// [
///     (
///         key: "sol_barracks",
///         title: "SOL — Barracks",
///         units: [
///             (name: "Scout", category: infantry),
///         ],
///     ),
/// ]
/// ```
pub struct RosterLoader;

impl RosterLoader {
    pub fn load(path: &Path) -> LoadResult<Classification> {
        let content = read_file(path)?;
        let sections: Vec<RosterSection> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON {}: {}", path.display(), e))?;

        let classification = Classification::new(sections)
            .map_err(|e| anyhow::anyhow!("Invalid roster {}: {} [{}]", path.display(), e, e.error_code()))?;
        Ok(classification)
    }
}
