//! Environment-driven defaults for the CLI.
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OUTPUT: &str = "Si_UnitBalance_Config_Default.json";

/// CLI settings resolved from the environment. Command-line flags take
/// precedence over everything here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliSettings {
    pub data_dir: PathBuf,
    pub output: PathBuf,
    /// Overrides `preferred_faction` from `balance.toml` when set.
    pub preferred_faction: Option<String>,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output: PathBuf::from(DEFAULT_OUTPUT),
            preferred_faction: None,
        }
    }
}

impl CliSettings {
    /// Construct settings from environment variables.
    ///
    /// Environment variables:
    /// - `UNIT_BALANCE_DATA_DIR` - Data directory (default: `data`)
    /// - `UNIT_BALANCE_OUTPUT` - Generated document path (default: `Si_UnitBalance_Config_Default.json`)
    /// - `UNIT_BALANCE_PREFERRED_FACTION` - Faction that wins name collisions in the snapshot
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(dir) = read_non_empty(&lookup, "UNIT_BALANCE_DATA_DIR") {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(output) = read_non_empty(&lookup, "UNIT_BALANCE_OUTPUT") {
            settings.output = PathBuf::from(output);
        }
        settings.preferred_faction = read_non_empty(&lookup, "UNIT_BALANCE_PREFERRED_FACTION");

        settings
    }
}

fn read_non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}
