//! Reference tables loader.
//!
//! The tables are split across several RON files under `tables/`, one per
//! concern. Together they form one immutable [`ReferenceTables`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use balance_core::resolver::projectile_id;
use balance_core::{
    CreatureAttackOverride, CreatureMelee, InfantrySpeed, InfantryWeapon, ProjectileSpec,
    RangedCreatureMelee, ReferenceTables, TurretSpec, VehicleMovement, VehicleWeapons,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::loaders::{LoadResult, read_file};

pub const PROJECTILES_FILE: &str = "projectiles.ron";
pub const VEHICLE_WEAPONS_FILE: &str = "vehicle_weapons.ron";
pub const INFANTRY_FILE: &str = "infantry.ron";
pub const CREATURES_FILE: &str = "creatures.ron";
pub const TURRETS_FILE: &str = "turrets.ron";
pub const VEHICLES_FILE: &str = "vehicles.ron";

/// `infantry.ron`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InfantryTables {
    pub weapons: BTreeMap<String, InfantryWeapon>,
    pub speeds: BTreeMap<String, InfantrySpeed>,
}

/// `creatures.ron`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreatureTables {
    pub melee: BTreeMap<String, CreatureMelee>,
    pub ranged_melee: BTreeMap<String, RangedCreatureMelee>,
    pub attack_overrides: BTreeMap<String, CreatureAttackOverride>,
}

/// `vehicles.ron`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VehicleTables {
    pub movement: BTreeMap<String, VehicleMovement>,
    /// Vehicles that dispense other units.
    pub dispensers: BTreeSet<String>,
}

/// Loader for the reference table directory.
pub struct TablesLoader;

impl TablesLoader {
    /// Load every table file from `dir`.
    pub fn load(dir: &Path) -> LoadResult<ReferenceTables> {
        let projectiles: BTreeMap<String, ProjectileSpec> =
            parse_ron(&dir.join(PROJECTILES_FILE))?;
        let vehicle_weapons: BTreeMap<String, VehicleWeapons> =
            parse_ron(&dir.join(VEHICLE_WEAPONS_FILE))?;
        let infantry: InfantryTables = parse_ron(&dir.join(INFANTRY_FILE))?;
        let creatures: CreatureTables = parse_ron(&dir.join(CREATURES_FILE))?;
        let turrets: BTreeMap<String, TurretSpec> = parse_ron(&dir.join(TURRETS_FILE))?;
        let vehicles: VehicleTables = parse_ron(&dir.join(VEHICLES_FILE))?;

        let tables = ReferenceTables {
            projectiles: normalize_projectiles(projectiles),
            vehicle_weapons,
            infantry_weapons: infantry.weapons,
            infantry_speeds: infantry.speeds,
            creature_melee: creatures.melee,
            ranged_creature_melee: creatures.ranged_melee,
            creature_attack_overrides: creatures.attack_overrides,
            turrets,
            vehicle_movement: vehicles.movement,
            dispensers: vehicles.dispensers,
        };

        tracing::debug!(
            dir = %dir.display(),
            projectiles = tables.projectiles.len(),
            entries = tables.len(),
            "reference tables loaded"
        );
        Ok(tables)
    }
}

/// Projectile ids are stored without the asset prefix.
fn normalize_projectiles(
    projectiles: BTreeMap<String, ProjectileSpec>,
) -> BTreeMap<String, ProjectileSpec> {
    projectiles
        .into_iter()
        .map(|(id, spec)| (projectile_id(&id).to_owned(), spec))
        .collect()
}

fn parse_ron<T: DeserializeOwned>(path: &Path) -> LoadResult<T> {
    let content = read_file(path)?;
    ron::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse table RON {}: {}", path.display(), e))
}
