//! Unit entry construction.
//!
//! [`UnitEntryBuilder`] walks the category [`layout`] group by group. For each
//! group it asks the matching resolver whether the unit has the feature and,
//! if so, which annotation and absolute values to emit. Multipliers are always
//! emitted at [`NEUTRAL`]; absolutes the resolver does not supply fall back to
//! [`NOT_APPLICABLE`].
//!
//! Missing reference data never aborts construction: a conditional group the
//! unit lacks is omitted, and an unknown number in an annotation prints as the
//! `?` placeholder.
//!
//! Numbers in annotations print in their shortest form, so a dumped `30.0`
//! reads `30` and `7.5` stays `7.5`.

use crate::category::Category;
use crate::entry::{ConfigEntry, FieldKind, FieldValue, NOT_APPLICABLE};
use crate::record::UnitRecord;
use crate::resolver::{Stat, WeaponStatResolver, projectile_label};
use crate::schema::{FieldGroup, GroupSpec, Presence, layout};
use crate::tables::ReferenceOracle;

pub const BASE_NOTE: &str = "_base";
pub const PRIMARY_WEAPON_NOTE: &str = "_pri_weapon";
pub const SECONDARY_WEAPON_NOTE: &str = "_sec_weapon";
pub const WEAPON_NOTE: &str = "_weapon";
pub const SPEED_NOTE: &str = "_base_speed";
pub const SENSE_NOTE: &str = "_base_sense";

/// What one group contributes beyond its neutral multipliers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupEmission {
    pub annotation: Option<(&'static str, String)>,
    pub absolutes: Vec<(&'static str, i64)>,
}

impl GroupEmission {
    fn annotated(key: &'static str, text: String) -> Self {
        Self {
            annotation: Some((key, text)),
            absolutes: Vec::new(),
        }
    }

    fn with_absolute(mut self, key: &'static str, value: i64) -> Self {
        self.absolutes.push((key, value));
        self
    }

    fn absolute(&self, key: &str) -> Option<i64> {
        self.absolutes.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }
}

/// Builds one [`ConfigEntry`] per unit from its record and category.
///
/// Pure over the reference oracle: the same inputs always produce the same
/// entry, key order included.
pub struct UnitEntryBuilder<'a, O: ReferenceOracle + ?Sized> {
    oracle: &'a O,
    resolver: WeaponStatResolver<'a, O>,
}

impl<'a, O: ReferenceOracle + ?Sized> UnitEntryBuilder<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self {
            oracle,
            resolver: WeaponStatResolver::new(oracle),
        }
    }

    pub fn build(&self, record: &UnitRecord, category: Category) -> ConfigEntry {
        let mut entry = ConfigEntry::new();
        for spec in layout(category) {
            let emission = match (spec.presence, self.resolve(spec.group, record, category)) {
                (_, Some(emission)) => emission,
                (Presence::Always, None) => GroupEmission::default(),
                (Presence::Conditional, None) => {
                    tracing::trace!(unit = %record.name, group = %spec.group, "group omitted");
                    continue;
                }
            };
            emit(&mut entry, spec, emission);
        }

        tracing::debug!(
            unit = %record.name,
            %category,
            tunables = entry.tunable_count(),
            "built entry"
        );
        entry
    }

    /// Resolves one group for a unit. `None` means the unit lacks the feature.
    fn resolve(
        &self,
        group: FieldGroup,
        record: &UnitRecord,
        category: Category,
    ) -> Option<GroupEmission> {
        match group {
            FieldGroup::Production => Some(production(record)),
            FieldGroup::BuildRadius => Some(build_radius(record)),
            FieldGroup::Dispense => self
                .oracle
                .is_dispenser(&record.name)
                .then(GroupEmission::default),
            FieldGroup::PrimaryWeapon => self.primary_weapon(record, category),
            FieldGroup::SecondaryWeapon => self.secondary_weapon(record, category),
            FieldGroup::Weapon => self.turret(record),
            FieldGroup::Movement => Some(self.movement(record, category)),
            FieldGroup::FlySpeed => (record.fly_speed != 0.0).then(GroupEmission::default),
            FieldGroup::Strafe => Some(GroupEmission::default()),
            FieldGroup::Sense => Some(sense(record)),
        }
    }

    fn primary_weapon(&self, record: &UnitRecord, category: Category) -> Option<GroupEmission> {
        match category {
            Category::Infantry => {
                let weapon = self.oracle.infantry_weapon(&record.name)?;
                let text = format!(
                    "{} | dmg:{} spd:{} life:{}",
                    weapon.projectile, weapon.damage, weapon.speed, weapon.lifetime
                );
                Some(GroupEmission::annotated(PRIMARY_WEAPON_NOTE, text))
            }
            Category::WheeledVehicle | Category::HoveredVehicle | Category::AirVehicle => {
                let mapped = self.mapped_projectile(&record.name, Slot::Primary);
                if record.vt_fire_interval <= 0.0 && mapped.is_none() {
                    return None;
                }
                let turret = TurretReadings {
                    fire_interval: record.vt_fire_interval,
                    spread: record.vt_spread,
                    magazine: record.vt_magazine,
                    reload: record.vt_reload,
                };
                let text = self.vehicle_weapon_note(mapped.unwrap_or_default(), turret);
                Some(GroupEmission::annotated(PRIMARY_WEAPON_NOTE, text))
            }
            Category::CreatureRanged => self.ranged_attack(record),
            Category::CreatureMelee => self.melee_primary(record),
            Category::CreatureFlyingMelee => self.melee_primary(record),
            Category::Structure | Category::StructureArmed => None,
        }
    }

    fn secondary_weapon(&self, record: &UnitRecord, category: Category) -> Option<GroupEmission> {
        match category {
            Category::WheeledVehicle | Category::HoveredVehicle | Category::AirVehicle => {
                // A fire interval with an empty magazine is an unused hardpoint.
                let mapped = self.mapped_projectile(&record.name, Slot::Secondary);
                if mapped.is_none() && record.vt2_magazine <= 0 {
                    return None;
                }
                let turret = TurretReadings {
                    fire_interval: record.vt2_fire_interval,
                    spread: record.vt2_spread,
                    magazine: record.vt2_magazine,
                    reload: record.vt2_reload,
                };
                let text = self.vehicle_weapon_note(mapped.unwrap_or_default(), turret);
                Some(GroupEmission::annotated(SECONDARY_WEAPON_NOTE, text))
            }
            Category::CreatureRanged => {
                let melee = self.oracle.ranged_creature_melee(&record.name)?;
                Some(melee_note(SECONDARY_WEAPON_NOTE, melee.damage))
            }
            Category::CreatureMelee => self.melee_secondary(record),
            Category::CreatureFlyingMelee => self.melee_secondary(record),
            Category::Infantry | Category::Structure | Category::StructureArmed => None,
        }
    }

    fn mapped_projectile(&self, unit: &str, slot: Slot) -> Option<&'a str> {
        let weapons = self.oracle.vehicle_weapons(unit)?;
        let projectile = match slot {
            Slot::Primary => weapons.primary.as_deref(),
            Slot::Secondary => weapons.secondary.as_deref(),
        };
        projectile.filter(|p| !p.is_empty())
    }

    fn vehicle_weapon_note(&self, projectile: &str, turret: TurretReadings) -> String {
        let stats = self.resolver.stats(projectile);
        format!(
            "{} | dmg:{} spd:{} life:{} spread:{} mag:{} fi:{} reload:{}",
            projectile_label(projectile),
            stats.damage,
            stats.speed,
            stats.lifetime,
            turret.spread,
            turret.magazine,
            turret.fire_interval,
            turret.reload,
        )
    }

    /// Ranged creature attack. Override-table values take precedence over the
    /// snapshot record, field by field.
    fn ranged_attack(&self, record: &UnitRecord) -> Option<GroupEmission> {
        let attack = self.oracle.creature_attack_override(&record.name);
        let projectile = attack
            .and_then(|a| a.projectile.as_deref())
            .unwrap_or(&record.atk_proj);
        if projectile.is_empty() {
            return None;
        }

        let speed = attack.and_then(|a| a.speed).unwrap_or(record.proj_speed);
        let lifetime = attack.and_then(|a| a.lifetime).unwrap_or(record.proj_lifetime);
        let spread = attack.and_then(|a| a.spread).unwrap_or(record.atk_spread);
        let damage: Stat = self.resolver.stats(projectile).damage;

        let text = format!(
            "{} | dmg:{} spd:{} life:{} spread:{}",
            projectile_label(projectile),
            damage,
            speed,
            lifetime,
            spread
        );
        Some(GroupEmission::annotated(PRIMARY_WEAPON_NOTE, text))
    }

    fn melee_primary(&self, record: &UnitRecord) -> Option<GroupEmission> {
        let melee = self.oracle.creature_melee(&record.name)?;
        (melee.primary_damage > 0.0).then(|| melee_note(PRIMARY_WEAPON_NOTE, melee.primary_damage))
    }

    fn melee_secondary(&self, record: &UnitRecord) -> Option<GroupEmission> {
        let melee = self.oracle.creature_melee(&record.name)?;
        let damage = melee.secondary_damage.filter(|d| *d > 0.0)?;
        Some(melee_note(SECONDARY_WEAPON_NOTE, damage))
    }

    fn turret(&self, record: &UnitRecord) -> Option<GroupEmission> {
        let turret = self.oracle.turret(&record.name)?;
        let text = format!(
            "{} | dmg:{} spd:{} life:{} range:{}",
            turret.projectile, turret.damage, turret.speed, turret.lifetime, turret.range
        );
        Some(GroupEmission::annotated(WEAPON_NOTE, text))
    }

    fn movement(&self, record: &UnitRecord, category: Category) -> GroupEmission {
        let parts = match category {
            Category::Infantry => match self.oracle.infantry_speed(&record.name) {
                Some(speed) => vec![
                    format!("Walk:{}", speed.walk),
                    format!("Run:{}", speed.run),
                    format!("Sprint:{}", speed.sprint),
                    format!("Jump:{}", speed.jump),
                ],
                None => Vec::new(),
            },
            Category::WheeledVehicle => {
                let movement = self.oracle.vehicle_movement(&record.name).unwrap_or_default();
                labelled([
                    ("Move", movement.move_speed.unwrap_or(0.0)),
                    ("TurnRad", movement.turn_radius.unwrap_or(0.0)),
                ])
            }
            Category::HoveredVehicle => {
                let movement = self.oracle.vehicle_movement(&record.name).unwrap_or_default();
                labelled([
                    ("Move", movement.move_speed.unwrap_or(0.0)),
                    ("Turbo", movement.turbo_speed.unwrap_or(0.0)),
                ])
            }
            Category::AirVehicle => labelled([
                ("Fwd", record.air_forward_speed),
                ("Strafe", record.air_strafe_speed),
                ("Turbo", record.air_turbo_speed),
            ]),
            Category::CreatureMelee | Category::CreatureRanged | Category::CreatureFlyingMelee => {
                let mut parts = labelled([("Move", record.move_speed), ("Fly", record.fly_speed)]);
                // Zero is a real lateral scale; only a negative value is unknown.
                if record.fly_strafe_scale >= 0.0 {
                    parts.push(format!("Strafe:{}", record.fly_strafe_scale));
                }
                parts
            }
            Category::Structure | Category::StructureArmed => Vec::new(),
        };

        if parts.is_empty() {
            GroupEmission::default()
        } else {
            GroupEmission::annotated(SPEED_NOTE, parts.join(" "))
        }
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Primary,
    Secondary,
}

/// Raw turret values of one vehicle weapon slot.
#[derive(Clone, Copy)]
struct TurretReadings {
    fire_interval: f64,
    spread: f64,
    magazine: i64,
    reload: f64,
}

fn emit(entry: &mut ConfigEntry, spec: &GroupSpec, emission: GroupEmission) {
    if let Some((key, text)) = &emission.annotation {
        entry.annotate(key, text.as_str());
    }
    for key in spec.keys {
        let value = match FieldKind::of_key(key) {
            FieldKind::Multiplier => FieldValue::neutral(),
            _ => FieldValue::Absolute(emission.absolute(key).unwrap_or(NOT_APPLICABLE)),
        };
        entry.insert(*key, value);
    }
}

/// `HP:<hp> [Cost:<c>] [Build:<b>s] T<tier>`, with negative tiers shown as `T0`.
pub fn base_note(record: &UnitRecord) -> String {
    let mut parts = vec![format!("HP:{}", record.hp)];
    if record.cost != 0.0 {
        parts.push(format!("Cost:{}", record.cost));
    }
    if record.build_time != 0.0 {
        parts.push(format!("Build:{}s", record.build_time));
    }
    parts.push(format!("T{}", record.min_tier.max(0)));
    parts.join(" ")
}

fn production(record: &UnitRecord) -> GroupEmission {
    GroupEmission::annotated(BASE_NOTE, base_note(record)).with_absolute("min_tier", record.min_tier)
}

fn build_radius(record: &UnitRecord) -> GroupEmission {
    let radius = if record.max_dist > 0.0 {
        record.max_dist.round() as i64
    } else {
        NOT_APPLICABLE
    };
    GroupEmission::default().with_absolute("build_radius", radius)
}

fn sense(record: &UnitRecord) -> GroupEmission {
    let note = labelled([("FOW", record.fow_view), ("Target", record.target_dist)]).join(" ");
    GroupEmission::annotated(SENSE_NOTE, note)
        .with_absolute("target_distance", distance(record.target_dist))
        .with_absolute("fow_distance", distance(record.fow_view))
}

fn distance(raw: f64) -> i64 {
    if raw == 0.0 {
        NOT_APPLICABLE
    } else {
        raw.round() as i64
    }
}

fn melee_note(key: &'static str, damage: f64) -> GroupEmission {
    GroupEmission::annotated(key, format!("Melee | dmg:{damage}"))
}

/// `Label:value` for every nonzero value, in order.
fn labelled<const N: usize>(values: [(&str, f64); N]) -> Vec<String> {
    values
        .into_iter()
        .filter(|(_, value)| *value != 0.0)
        .map(|(label, value)| format!("{label}:{value}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::NEUTRAL;
    use crate::tables::{
        CreatureAttackOverride, CreatureMelee, InfantrySpeed, InfantryWeapon, ProjectileSpec,
        RangedCreatureMelee, ReferenceTables, TurretSpec, VehicleMovement,
    };

    fn tables() -> ReferenceTables {
        let mut tables = ReferenceTables::new()
            .with_projectile("Rifle", ProjectileSpec::new(45.0, 500.0, 3.0))
            .with_projectile("Shell_HoverTank", ProjectileSpec::new(1000.0, 500.0, 5.0))
            .with_projectile("MMG_HoverTank", ProjectileSpec::new(50.0, 400.0, 3.0))
            .with_projectile("Shard", ProjectileSpec::new(400.0, 200.0, 2.0))
            .with_vehicle_weapons(
                "Hover Tank",
                Some("ProjectileData_Shell_HoverTank"),
                Some("ProjectileData_MMG_HoverTank"),
            )
            .with_vehicle_weapons("Mystery Truck", Some("ProjectileData_Unknown"), None)
            .with_infantry_weapon(
                "Rifleman",
                InfantryWeapon {
                    projectile: "Rifle".into(),
                    damage: 45.0,
                    speed: 500.0,
                    lifetime: 3.0,
                },
            )
            .with_creature_melee(
                "Crab",
                CreatureMelee {
                    primary_damage: 240.0,
                    secondary_damage: Some(240.0),
                    primary_cooldown: 1.0,
                    secondary_cooldown: 3.0,
                },
            )
            .with_creature_melee(
                "Squid",
                CreatureMelee {
                    primary_damage: 0.0,
                    secondary_damage: Some(3500.0),
                    primary_cooldown: 0.0,
                    secondary_cooldown: 0.0,
                },
            )
            .with_ranged_creature_melee(
                "Shrimp",
                RangedCreatureMelee {
                    damage: 120.0,
                    cooldown: 2.0,
                },
            )
            .with_turret(
                "Turret",
                TurretSpec {
                    projectile: "LMG_ChainMG".into(),
                    damage: 40.0,
                    speed: 350.0,
                    lifetime: 3.0,
                    range: 1050.0,
                },
            );
        tables.infantry_speeds.insert(
            "Rifleman".into(),
            InfantrySpeed {
                walk: 2.0,
                run: 4.0,
                sprint: 7.0,
                jump: 4.25,
            },
        );
        tables.creature_attack_overrides.insert(
            "Shrimp".into(),
            CreatureAttackOverride {
                projectile: Some("ProjectileData_Shard".into()),
                speed: Some(200.0),
                lifetime: Some(2.0),
                range: Some(300.0),
                spread: Some(1.0),
            },
        );
        tables.vehicle_movement.insert(
            "Hover Tank".into(),
            VehicleMovement {
                move_speed: Some(10.0),
                turbo_speed: Some(30.0),
                turn_radius: None,
                turn_speed: Some(60.0),
            },
        );
        tables.dispensers.insert("Hover Bike".into());
        tables
    }

    fn record(name: &str) -> UnitRecord {
        UnitRecord {
            hp: 100.0,
            cost: 50.0,
            build_time: 10.0,
            min_tier: 1,
            ..UnitRecord::new(name, "Sol")
        }
    }

    fn keys(entry: &ConfigEntry) -> Vec<&str> {
        entry.keys().collect()
    }

    fn note<'e>(entry: &'e ConfigEntry, key: &str) -> &'e str {
        entry.get(key).and_then(FieldValue::as_note).unwrap()
    }

    #[test]
    fn infantry_weapon_has_three_tunables() {
        let tables = tables();
        let entry = UnitEntryBuilder::new(&tables).build(&record("Rifleman"), Category::Infantry);

        for key in ["pri_damage_mult", "pri_proj_speed_mult", "pri_proj_lifetime_mult"] {
            assert_eq!(entry.get(key), Some(&FieldValue::Multiplier(NEUTRAL)), "{key}");
        }
        assert!(!entry.contains_key("pri_accuracy_mult"));
        assert_eq!(note(&entry, PRIMARY_WEAPON_NOTE), "Rifle | dmg:45 spd:500 life:3");
        assert_eq!(note(&entry, SPEED_NOTE), "Walk:2 Run:4 Sprint:7 Jump:4.25");
    }

    #[test]
    fn unmapped_infantry_has_no_weapon_group() {
        let tables = tables();
        let entry = UnitEntryBuilder::new(&tables).build(&record("Scout"), Category::Infantry);
        assert!(!entry.contains_key(PRIMARY_WEAPON_NOTE));
        assert!(!entry.keys().any(|k| k.starts_with("pri_")));
        assert!(!entry.contains_key(SPEED_NOTE));
        assert!(entry.contains_key("jump_speed_mult"));
    }

    #[test]
    fn structure_has_only_production_and_radius() {
        let tables = tables();
        let mut headquarters = record("Headquarters");
        headquarters.max_dist = 1200.0;
        let entry = UnitEntryBuilder::new(&tables).build(&headquarters, Category::Structure);

        assert_eq!(
            keys(&entry),
            [
                BASE_NOTE,
                "health_mult",
                "cost_mult",
                "build_time_mult",
                "min_tier",
                "build_radius"
            ]
        );
        assert_eq!(entry.get("build_radius"), Some(&FieldValue::Absolute(1200)));
        assert_eq!(entry.get("min_tier"), Some(&FieldValue::Absolute(1)));
    }

    #[test]
    fn unconstrained_structure_radius_is_sentinel() {
        let tables = tables();
        let entry =
            UnitEntryBuilder::new(&tables).build(&record("Refinery"), Category::Structure);
        assert_eq!(entry.get("build_radius"), Some(&FieldValue::not_applicable()));
    }

    #[test]
    fn ranged_creature_secondary_depends_on_melee_table() {
        let tables = tables();
        let builder = UnitEntryBuilder::new(&tables);

        let shrimp = builder.build(&record("Shrimp"), Category::CreatureRanged);
        assert_eq!(note(&shrimp, SECONDARY_WEAPON_NOTE), "Melee | dmg:120");
        assert_eq!(shrimp.get("sec_damage_mult"), Some(&FieldValue::neutral()));
        assert_eq!(
            note(&shrimp, PRIMARY_WEAPON_NOTE),
            "Shard | dmg:400 spd:200 life:2 spread:1"
        );
        assert!(shrimp.contains_key("pri_accuracy_mult"));
        assert!(!shrimp.contains_key("pri_magazine_mult"));

        let mut shocker = record("Shocker");
        shocker.atk_proj = "ProjectileData_Shocker".into();
        shocker.proj_speed = 800.0;
        let shocker = builder.build(&shocker, Category::CreatureRanged);
        assert!(!shocker.keys().any(|k| k.starts_with("sec_") || k == SECONDARY_WEAPON_NOTE));
        // Projectile is not in the table, so damage is unknown.
        assert_eq!(
            note(&shocker, PRIMARY_WEAPON_NOTE),
            "Shocker | dmg:? spd:800 life:0 spread:0"
        );
    }

    #[test]
    fn vehicle_secondary_needs_mapping_or_magazine() {
        let tables = tables();
        let builder = UnitEntryBuilder::new(&tables);

        let mut truck = record("Light Quad");
        truck.vt_fire_interval = 0.1;
        truck.vt2_fire_interval = 0.5;
        truck.vt2_magazine = 0;
        let entry = builder.build(&truck, Category::WheeledVehicle);
        assert!(!entry.keys().any(|k| k.starts_with("sec_")));
        assert!(!entry.contains_key(SECONDARY_WEAPON_NOTE));
        assert!(entry.contains_key("pri_reload_time_mult"));

        truck.vt2_magazine = 5;
        let entry = builder.build(&truck, Category::WheeledVehicle);
        assert_eq!(entry.keys().filter(|k| k.starts_with("sec_")).count(), 7);
        assert_eq!(
            note(&entry, SECONDARY_WEAPON_NOTE),
            "? | dmg:? spd:? life:? spread:0 mag:5 fi:0.5 reload:0"
        );
    }

    #[test]
    fn vehicle_without_turret_has_no_weapons() {
        let tables = tables();
        let entry =
            UnitEntryBuilder::new(&tables).build(&record("Harvester"), Category::WheeledVehicle);
        assert!(!entry.keys().any(|k| k.starts_with("pri_") || k.starts_with("sec_")));
        assert!(entry.contains_key("turn_radius_mult"));
    }

    #[test]
    fn mapped_vehicle_weapons_resolve_ballistics() {
        let tables = tables();
        let mut tank = record("Hover Tank");
        tank.vt_fire_interval = 2.5;
        tank.vt_magazine = 1;
        tank.vt_reload = 2.5;
        let entry = UnitEntryBuilder::new(&tables).build(&tank, Category::HoveredVehicle);

        assert_eq!(
            note(&entry, PRIMARY_WEAPON_NOTE),
            "Shell_HoverTank | dmg:1000 spd:500 life:5 spread:0 mag:1 fi:2.5 reload:2.5"
        );
        assert!(note(&entry, SECONDARY_WEAPON_NOTE).starts_with("MMG_HoverTank | dmg:50"));
        assert_eq!(note(&entry, SPEED_NOTE), "Move:10 Turbo:30");
        assert!(entry.contains_key("turbo_speed_mult"));
        assert!(!entry.contains_key("turn_radius_mult"));
    }

    #[test]
    fn air_vehicle_speeds_come_from_record() {
        let tables = tables();
        let mut fighter = record("Fighter");
        fighter.air_forward_speed = 40.0;
        fighter.air_strafe_speed = 12.5;
        fighter.air_turbo_speed = 90.0;
        let entry = UnitEntryBuilder::new(&tables).build(&fighter, Category::AirVehicle);

        assert_eq!(note(&entry, SPEED_NOTE), "Fwd:40 Strafe:12.5 Turbo:90");
        let speeds: Vec<_> = entry.keys().filter(|k| k.ends_with("_speed_mult")).collect();
        assert_eq!(speeds, ["move_speed_mult", "turbo_speed_mult", "strafe_speed_mult"]);
        assert!(!entry.contains_key("turn_radius_mult"));

        fighter.air_strafe_speed = 0.0;
        let entry = UnitEntryBuilder::new(&tables).build(&fighter, Category::AirVehicle);
        assert_eq!(note(&entry, SPEED_NOTE), "Fwd:40 Turbo:90");
        assert!(entry.contains_key("strafe_speed_mult"));
    }

    #[test]
    fn unknown_mapped_projectile_uses_placeholder() {
        let tables = tables();
        let entry =
            UnitEntryBuilder::new(&tables).build(&record("Mystery Truck"), Category::WheeledVehicle);
        assert!(note(&entry, PRIMARY_WEAPON_NOTE).starts_with("Unknown | dmg:? spd:? life:?"));
        assert_eq!(entry.get("pri_damage_mult"), Some(&FieldValue::neutral()));
    }

    #[test]
    fn melee_slots_gate_on_positive_damage() {
        let tables = tables();
        let builder = UnitEntryBuilder::new(&tables);

        let crab = builder.build(&record("Crab"), Category::CreatureMelee);
        assert!(crab.contains_key("pri_damage_mult"));
        assert!(crab.contains_key("sec_damage_mult"));

        let squid = builder.build(&record("Squid"), Category::CreatureFlyingMelee);
        assert!(!squid.contains_key("pri_damage_mult"));
        assert_eq!(note(&squid, SECONDARY_WEAPON_NOTE), "Melee | dmg:3500");
    }

    #[test]
    fn creature_fly_speed_only_when_flying() {
        let tables = tables();
        let builder = UnitEntryBuilder::new(&tables);

        let mut wasp = record("Wasp");
        wasp.move_speed = 8.0;
        wasp.fly_speed = 12.0;
        wasp.fly_strafe_scale = 0.0;
        let entry = builder.build(&wasp, Category::CreatureFlyingMelee);
        assert!(entry.contains_key("fly_speed_mult"));
        assert_eq!(note(&entry, SPEED_NOTE), "Move:8 Fly:12 Strafe:0");
        let speeds: Vec<_> = entry.keys().filter(|k| k.ends_with("_speed_mult")).collect();
        assert_eq!(speeds, ["move_speed_mult", "fly_speed_mult", "strafe_speed_mult"]);

        let entry = builder.build(&record("Crab"), Category::CreatureMelee);
        assert!(!entry.contains_key("fly_speed_mult"));
        assert!(entry.contains_key("strafe_speed_mult"));
        assert!(!entry.contains_key(SPEED_NOTE));
    }

    #[test]
    fn sense_uses_sentinel_for_unset_distances() {
        let tables = tables();
        let mut scout = record("Scout");
        scout.fow_view = 150.0;
        let entry = UnitEntryBuilder::new(&tables).build(&scout, Category::Infantry);
        assert_eq!(entry.get("fow_distance"), Some(&FieldValue::Absolute(150)));
        assert_eq!(entry.get("target_distance"), Some(&FieldValue::not_applicable()));
        assert_eq!(note(&entry, SENSE_NOTE), "FOW:150");
    }

    #[test]
    fn armed_structure_weapon_needs_turret_data() {
        let tables = tables();
        let builder = UnitEntryBuilder::new(&tables);

        let turret = builder.build(&record("Turret"), Category::StructureArmed);
        assert_eq!(
            note(&turret, WEAPON_NOTE),
            "LMG_ChainMG | dmg:40 spd:350 life:3 range:1050"
        );
        assert_eq!(turret.tunable_count(), 5 + 8);

        let unknown = builder.build(&record("Bunker"), Category::StructureArmed);
        assert_eq!(unknown.tunable_count(), 5);
    }

    #[test]
    fn dispenser_gets_timeout() {
        let tables = tables();
        let builder = UnitEntryBuilder::new(&tables);
        let bike = builder.build(&record("Hover Bike"), Category::HoveredVehicle);
        assert_eq!(bike.get("dispense_timeout"), Some(&FieldValue::not_applicable()));
        let tank = builder.build(&record("Hover Tank"), Category::HoveredVehicle);
        assert!(!tank.contains_key("dispense_timeout"));
    }

    #[test]
    fn base_note_formats() {
        let mut unit = UnitRecord::new("Node", "Alien");
        unit.hp = 400.0;
        assert_eq!(base_note(&unit), "HP:400 T0");
        unit.cost = 150.0;
        unit.build_time = 7.5;
        unit.min_tier = 3;
        assert_eq!(base_note(&unit), "HP:400 Cost:150 Build:7.5s T3");
    }

    #[test]
    fn integral_readings_drop_the_fraction() {
        let mut unit = UnitRecord::new("Wasp", "Alien");
        unit.hp = 250.0;
        unit.build_time = 30.0;
        unit.min_tier = 0;
        assert_eq!(base_note(&unit), "HP:250 Build:30s T0");

        let tables = tables();
        unit.move_speed = 10.0;
        unit.fly_speed = 12.0;
        let entry = UnitEntryBuilder::new(&tables).build(&unit, Category::CreatureFlyingMelee);
        assert_eq!(note(&entry, SPEED_NOTE), "Move:10 Fly:12");
    }

    #[test]
    fn every_multiplier_is_neutral() {
        let tables = tables();
        let builder = UnitEntryBuilder::new(&tables);
        let mut tank = record("Hover Tank");
        tank.vt_fire_interval = 1.0;
        for category in Category::all() {
            let entry = builder.build(&tank, category);
            for (key, value) in entry.iter() {
                if let FieldValue::Multiplier(m) = value {
                    assert_eq!(*m, NEUTRAL, "{category}: {key}");
                }
            }
        }
    }

    #[test]
    fn build_is_deterministic() {
        let tables = tables();
        let builder = UnitEntryBuilder::new(&tables);
        for category in Category::all() {
            let first = builder.build(&record("Shrimp"), category);
            let second = builder.build(&record("Shrimp"), category);
            assert_eq!(keys(&first), keys(&second));
            assert_eq!(first, second);
        }
    }
}
