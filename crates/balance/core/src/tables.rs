//! Read-only reference tables.
//!
//! The snapshot dump does not capture everything the configuration needs to
//! describe (projectile ballistics, which projectile a vehicle turret fires,
//! creature melee damage, ...). Those facts come from hand-maintained lookup
//! tables exposed through [`ReferenceOracle`]. [`ReferenceTables`] is the
//! in-memory implementation built by the content loaders.

use std::collections::{BTreeMap, BTreeSet};

/// Ballistics of one projectile type.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileSpec {
    /// Impact damage.
    pub damage: f64,
    pub speed: f64,
    /// Seconds before the projectile expires.
    pub lifetime: f64,
}

impl ProjectileSpec {
    pub const fn new(damage: f64, speed: f64, lifetime: f64) -> Self {
        Self {
            damage,
            speed,
            lifetime,
        }
    }
}

/// Projectiles fired by a vehicle's two turret slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleWeapons {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

/// Character-held weapon of an infantry unit, with its ballistics inline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfantryWeapon {
    pub projectile: String,
    pub damage: f64,
    pub speed: f64,
    pub lifetime: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfantrySpeed {
    pub walk: f64,
    pub run: f64,
    pub sprint: f64,
    pub jump: f64,
}

/// Melee attacks of a melee creature.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureMelee {
    pub primary_damage: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub secondary_damage: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub primary_cooldown: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub secondary_cooldown: f64,
}

/// Melee attack carried by a ranged creature.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedCreatureMelee {
    pub damage: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: f64,
}

/// Hand-maintained attack data for creatures whose snapshot entry is wrong or
/// incomplete. Present fields take precedence over the snapshot record.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CreatureAttackOverride {
    pub projectile: Option<String>,
    pub speed: Option<f64>,
    pub lifetime: Option<f64>,
    pub range: Option<f64>,
    pub spread: Option<f64>,
}

/// Turret of an armed structure.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurretSpec {
    pub projectile: String,
    pub damage: f64,
    pub speed: f64,
    pub lifetime: f64,
    pub range: f64,
}

/// Known vehicle movement values. The snapshot does not capture them, so only
/// a few vehicles have entries.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleMovement {
    pub move_speed: Option<f64>,
    pub turbo_speed: Option<f64>,
    pub turn_radius: Option<f64>,
    pub turn_speed: Option<f64>,
}

/// Read-only lookup over every reference table the builder consults.
///
/// Keys are unit names, except [`ReferenceOracle::projectile`] which is keyed
/// by projectile id. Every lookup may miss.
pub trait ReferenceOracle {
    fn projectile(&self, id: &str) -> Option<ProjectileSpec>;
    fn vehicle_weapons(&self, unit: &str) -> Option<&VehicleWeapons>;
    fn infantry_weapon(&self, unit: &str) -> Option<&InfantryWeapon>;
    fn infantry_speed(&self, unit: &str) -> Option<InfantrySpeed>;
    fn creature_melee(&self, unit: &str) -> Option<CreatureMelee>;
    fn ranged_creature_melee(&self, unit: &str) -> Option<RangedCreatureMelee>;
    fn creature_attack_override(&self, unit: &str) -> Option<&CreatureAttackOverride>;
    fn turret(&self, unit: &str) -> Option<&TurretSpec>;
    fn vehicle_movement(&self, unit: &str) -> Option<VehicleMovement>;
    /// Whether the vehicle dispenses other units (and so has a dispense timeout).
    fn is_dispenser(&self, unit: &str) -> bool;
}

/// In-memory reference tables, immutable after construction.
///
/// Projectile ids are stored without the `ProjectileData_` prefix.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReferenceTables {
    pub projectiles: BTreeMap<String, ProjectileSpec>,
    pub vehicle_weapons: BTreeMap<String, VehicleWeapons>,
    pub infantry_weapons: BTreeMap<String, InfantryWeapon>,
    pub infantry_speeds: BTreeMap<String, InfantrySpeed>,
    pub creature_melee: BTreeMap<String, CreatureMelee>,
    pub ranged_creature_melee: BTreeMap<String, RangedCreatureMelee>,
    pub creature_attack_overrides: BTreeMap<String, CreatureAttackOverride>,
    pub turrets: BTreeMap<String, TurretSpec>,
    pub vehicle_movement: BTreeMap<String, VehicleMovement>,
    pub dispensers: BTreeSet<String>,
}

impl ReferenceTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projectile(mut self, id: impl Into<String>, spec: ProjectileSpec) -> Self {
        self.projectiles.insert(id.into(), spec);
        self
    }

    pub fn with_vehicle_weapons(
        mut self,
        unit: impl Into<String>,
        primary: Option<&str>,
        secondary: Option<&str>,
    ) -> Self {
        self.vehicle_weapons.insert(
            unit.into(),
            VehicleWeapons {
                primary: primary.map(str::to_owned),
                secondary: secondary.map(str::to_owned),
            },
        );
        self
    }

    pub fn with_infantry_weapon(mut self, unit: impl Into<String>, weapon: InfantryWeapon) -> Self {
        self.infantry_weapons.insert(unit.into(), weapon);
        self
    }

    pub fn with_creature_melee(mut self, unit: impl Into<String>, melee: CreatureMelee) -> Self {
        self.creature_melee.insert(unit.into(), melee);
        self
    }

    pub fn with_ranged_creature_melee(
        mut self,
        unit: impl Into<String>,
        melee: RangedCreatureMelee,
    ) -> Self {
        self.ranged_creature_melee.insert(unit.into(), melee);
        self
    }

    pub fn with_turret(mut self, unit: impl Into<String>, turret: TurretSpec) -> Self {
        self.turrets.insert(unit.into(), turret);
        self
    }

    /// Number of entries across all tables.
    pub fn len(&self) -> usize {
        self.projectiles.len()
            + self.vehicle_weapons.len()
            + self.infantry_weapons.len()
            + self.infantry_speeds.len()
            + self.creature_melee.len()
            + self.ranged_creature_melee.len()
            + self.creature_attack_overrides.len()
            + self.turrets.len()
            + self.vehicle_movement.len()
            + self.dispensers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReferenceOracle for ReferenceTables {
    fn projectile(&self, id: &str) -> Option<ProjectileSpec> {
        self.projectiles.get(id).copied()
    }

    fn vehicle_weapons(&self, unit: &str) -> Option<&VehicleWeapons> {
        self.vehicle_weapons.get(unit)
    }

    fn infantry_weapon(&self, unit: &str) -> Option<&InfantryWeapon> {
        self.infantry_weapons.get(unit)
    }

    fn infantry_speed(&self, unit: &str) -> Option<InfantrySpeed> {
        self.infantry_speeds.get(unit).copied()
    }

    fn creature_melee(&self, unit: &str) -> Option<CreatureMelee> {
        self.creature_melee.get(unit).copied()
    }

    fn ranged_creature_melee(&self, unit: &str) -> Option<RangedCreatureMelee> {
        self.ranged_creature_melee.get(unit).copied()
    }

    fn creature_attack_override(&self, unit: &str) -> Option<&CreatureAttackOverride> {
        self.creature_attack_overrides.get(unit)
    }

    fn turret(&self, unit: &str) -> Option<&TurretSpec> {
        self.turrets.get(unit)
    }

    fn vehicle_movement(&self, unit: &str) -> Option<VehicleMovement> {
        self.vehicle_movement.get(unit).copied()
    }

    fn is_dispenser(&self, unit: &str) -> bool {
        self.dispensers.contains(unit)
    }
}
