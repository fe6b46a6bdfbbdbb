//! Generator settings loader.

use std::path::Path;

use balance_core::GeneratorConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for generator settings from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GeneratorConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<GeneratorConfig> {
        let config: GeneratorConfig = toml::from_str(content)?;
        Ok(config)
    }
}
