//! Existing configuration document loader, for re-auditing edited files.

use std::path::Path;

use balance_core::BalanceDocument;

use crate::loaders::{LoadResult, read_file};

pub struct DocumentLoader;

impl DocumentLoader {
    /// Load a configuration document. Informational keys are dropped; field
    /// kinds are recovered from key names.
    pub fn load(path: &Path) -> LoadResult<BalanceDocument> {
        let content = read_file(path)?;
        let document: BalanceDocument = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config document {}: {}", path.display(), e)
        })?;
        Ok(document)
    }
}
