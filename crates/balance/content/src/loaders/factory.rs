//! Content factory for loading everything the generator needs.

use std::path::{Path, PathBuf};

use balance_core::{Classification, GeneratorConfig, ReferenceTables};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader, TablesLoader};

pub const CONFIG_FILE: &str = "balance.toml";
pub const ROSTER_FILE: &str = "roster.ron";
pub const TABLES_DIR: &str = "tables";

/// Everything loaded from one data directory.
#[derive(Debug, Clone)]
pub struct Content {
    pub config: GeneratorConfig,
    pub classification: Classification,
    pub tables: ReferenceTables,
}

/// Content factory that loads balance data from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── balance.toml
/// ├── roster.ron
/// └── tables/
///     ├── projectiles.ron
///     ├── vehicle_weapons.ron
///     ├── infantry.ron
///     ├── creatures.ron
///     ├── turrets.ron
///     └── vehicles.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load generator settings from `balance.toml`. A missing file yields the
    /// defaults.
    pub fn load_config(&self) -> LoadResult<GeneratorConfig> {
        let path = self.data_dir.join(CONFIG_FILE);
        if !path.exists() {
            tracing::info!(path = %path.display(), "no settings file, using defaults");
            return Ok(GeneratorConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the classification from `roster.ron`.
    pub fn load_classification(&self) -> LoadResult<Classification> {
        RosterLoader::load(&self.data_dir.join(ROSTER_FILE))
    }

    /// Load reference tables from `tables/`.
    pub fn load_tables(&self) -> LoadResult<ReferenceTables> {
        TablesLoader::load(&self.data_dir.join(TABLES_DIR))
    }

    pub fn load_all(&self) -> LoadResult<Content> {
        Ok(Content {
            config: self.load_config()?,
            classification: self.load_classification()?,
            tables: self.load_tables()?,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
