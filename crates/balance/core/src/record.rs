//! Raw per-unit facts from the game snapshot.
//!
//! [`UnitRecord`] mirrors one object of the snapshot dump. Numeric fields that
//! the dump omits default to zero; the builder treats zero as "not present"
//! exactly where the snapshot does.

use std::collections::HashMap;

/// Raw statistics of a single unit, immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnitRecord {
    pub name: String,
    pub faction: String,
    pub hp: f64,
    pub cost: f64,
    pub build_time: f64,
    /// Minimum tech tier; `-1` means the unit is not tier-gated.
    pub min_tier: i64,
    /// Maximum distance from the base a structure may be placed at.
    pub max_dist: f64,

    // Movement
    pub move_speed: f64,
    pub fly_speed: f64,
    /// Lateral scale while flying; negative when the snapshot has no value.
    pub fly_strafe_scale: f64,
    pub air_forward_speed: f64,
    pub air_strafe_speed: f64,
    pub air_turbo_speed: f64,

    // Creature attack
    pub atk_proj: String,
    pub proj_speed: f64,
    pub proj_lifetime: f64,
    pub atk_spread: f64,

    // Detection
    pub fow_view: f64,
    pub target_dist: f64,

    // Vehicle turret, primary slot
    pub vt_fire_interval: f64,
    pub vt_spread: f64,
    pub vt_magazine: i64,
    pub vt_reload: f64,

    // Vehicle turret, secondary slot
    pub vt2_fire_interval: f64,
    pub vt2_spread: f64,
    pub vt2_magazine: i64,
    pub vt2_reload: f64,
}

impl Default for UnitRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            faction: String::new(),
            hp: 0.0,
            cost: 0.0,
            build_time: 0.0,
            min_tier: -1,
            max_dist: 0.0,
            move_speed: 0.0,
            fly_speed: 0.0,
            fly_strafe_scale: -1.0,
            air_forward_speed: 0.0,
            air_strafe_speed: 0.0,
            air_turbo_speed: 0.0,
            atk_proj: String::new(),
            proj_speed: 0.0,
            proj_lifetime: 0.0,
            atk_spread: 0.0,
            fow_view: 0.0,
            target_dist: 0.0,
            vt_fire_interval: 0.0,
            vt_spread: 0.0,
            vt_magazine: 0,
            vt_reload: 0.0,
            vt2_fire_interval: 0.0,
            vt2_spread: 0.0,
            vt2_magazine: 0,
            vt2_reload: 0.0,
        }
    }
}

impl UnitRecord {
    pub fn new(name: impl Into<String>, faction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            faction: faction.into(),
            ..Self::default()
        }
    }
}

/// Snapshot records de-duplicated by unit name.
///
/// The snapshot lists shared units (structures, neutral units) once per
/// faction. The first record seen for a name wins, unless a later record
/// belongs to the preferred faction and the kept one does not.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    records: Vec<UnitRecord>,
    index: HashMap<String, usize>,
}

impl Roster {
    pub fn from_records(
        records: impl IntoIterator<Item = UnitRecord>,
        preferred_faction: &str,
    ) -> Self {
        let mut roster = Self::default();
        for record in records {
            roster.insert(record, preferred_faction);
        }
        roster
    }

    fn insert(&mut self, record: UnitRecord, preferred_faction: &str) {
        match self.index.get(&record.name) {
            None => {
                self.index.insert(record.name.clone(), self.records.len());
                self.records.push(record);
            }
            Some(&slot) => {
                let kept = &self.records[slot];
                if record.faction == preferred_faction && kept.faction != preferred_faction {
                    tracing::debug!(
                        unit = %record.name,
                        replaced = %kept.faction,
                        "preferring {} record",
                        preferred_faction
                    );
                    self.records[slot] = record;
                }
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&UnitRecord> {
        self.index.get(name).map(|&slot| &self.records[slot])
    }

    /// Records in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
