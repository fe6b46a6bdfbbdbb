//! Generator settings.
//!
//! Everything here has a default matching the vanilla game, so an empty
//! settings file is valid.

/// Number of tech tiers with a research time.
pub const TECH_TIERS: usize = 8;

/// Vanilla research time per tier, in seconds.
pub const DEFAULT_TIER_SECONDS: u32 = 30;

pub const DEFAULT_PREFERRED_FACTION: &str = "Sol";

pub const DEFAULT_DESCRIPTION: &str = "Vanilla base config. All multipliers at 1.00 = no change. \
    _base/_pri_weapon/_sec_weapon show actual game values. Use !rebalance to hot-reload.";

/// Settings for one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Faction whose record wins when a unit name appears more than once.
    pub preferred_faction: String,
    pub enabled: bool,
    /// Ask the consumer to dump raw fields on load.
    pub dump_fields: bool,
    pub shrimp_disable_aim: bool,
    pub description: String,
    pub tech_time: TechTime,
    pub teleport: TeleportSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            preferred_faction: DEFAULT_PREFERRED_FACTION.to_owned(),
            enabled: true,
            dump_fields: false,
            shrimp_disable_aim: false,
            description: DEFAULT_DESCRIPTION.to_owned(),
            tech_time: TechTime::default(),
            teleport: TeleportSettings::default(),
        }
    }
}

/// Research time of each tech tier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TechTime {
    pub note: String,
    /// Seconds per tier, tier 1 first.
    pub tiers: [u32; TECH_TIERS],
}

impl TechTime {
    /// Seconds for a 1-based tier number.
    pub fn seconds(&self, tier: usize) -> Option<u32> {
        tier.checked_sub(1).and_then(|i| self.tiers.get(i)).copied()
    }
}

impl Default for TechTime {
    fn default() -> Self {
        Self {
            note: "Build time in seconds per tech tier research (all factions). Vanilla: 30s all tiers."
                .to_owned(),
            tiers: [DEFAULT_TIER_SECONDS; TECH_TIERS],
        }
    }
}

/// Teleportation ability shared by all factions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TeleportSettings {
    /// Seconds between uses.
    pub cooldown: u32,
    /// Cast time in seconds.
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(rename = "_note", alias = "note"))]
    pub note: String,
}

impl Default for TeleportSettings {
    fn default() -> Self {
        Self {
            cooldown: 120,
            duration: 5,
            note: "Teleportation: cooldown 120s, cast time 5s".to_owned(),
        }
    }
}
