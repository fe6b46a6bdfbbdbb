//! Per-category field layout and the schema registry derived from it.
//!
//! Each [`Category`] owns a static [`layout`]: an ordered list of field groups
//! with the exact tunable keys each group contributes, marked either
//! [`Presence::Always`] or [`Presence::Conditional`]. The entry builder walks
//! the same layout when emitting, so the registry the auditor checks against
//! and the builder's output are two views of one table.
//!
//! The registry derives, per category:
//! - `expected`: keys of every `Always` group
//! - `conditional`: keys of every `Conditional` group
//! - `forbidden`: every key any category can emit, minus the two sets above

use std::collections::BTreeSet;

use crate::category::Category;

/// Family of related tunable fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FieldGroup {
    /// Health, cost, build time, tier gate.
    Production,
    /// Construction radius of structures.
    BuildRadius,
    /// Timeout of vehicles that dispense other units.
    Dispense,
    #[strum(serialize = "weapon_pri")]
    PrimaryWeapon,
    #[strum(serialize = "weapon_sec")]
    SecondaryWeapon,
    /// Unprefixed turret of an armed structure.
    Weapon,
    #[strum(serialize = "move")]
    Movement,
    /// Flight speed of creatures that can fly.
    #[strum(serialize = "fly")]
    FlySpeed,
    /// Lateral speed of creatures, after the optional flight speed.
    Strafe,
    /// Target detection, fog-of-war vision, projectile render distance.
    Sense,
}

/// Whether a group appears in every entry of the category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Always,
    /// Emitted only when the unit actually has the sub-feature.
    Conditional,
}

/// One group in a category layout.
#[derive(Clone, Copy, Debug)]
pub struct GroupSpec {
    pub group: FieldGroup,
    pub presence: Presence,
    pub keys: &'static [&'static str],
}

const fn always(group: FieldGroup, keys: &'static [&'static str]) -> GroupSpec {
    GroupSpec {
        group,
        presence: Presence::Always,
        keys,
    }
}

const fn conditional(group: FieldGroup, keys: &'static [&'static str]) -> GroupSpec {
    GroupSpec {
        group,
        presence: Presence::Conditional,
        keys,
    }
}

// ============================================================================
// Field key sets
// ============================================================================

const PRODUCTION: &[&str] = &["health_mult", "cost_mult", "build_time_mult", "min_tier"];
const BUILD_RADIUS: &[&str] = &["build_radius"];
const DISPENSE: &[&str] = &["dispense_timeout"];

/// Infantry weapons only expose projectile-driven stats.
const INFANTRY_PRIMARY: &[&str] = &[
    "pri_damage_mult",
    "pri_proj_speed_mult",
    "pri_proj_lifetime_mult",
];

const VEHICLE_PRIMARY: &[&str] = &[
    "pri_damage_mult",
    "pri_proj_speed_mult",
    "pri_proj_lifetime_mult",
    "pri_accuracy_mult",
    "pri_magazine_mult",
    "pri_fire_rate_mult",
    "pri_reload_time_mult",
];

const VEHICLE_SECONDARY: &[&str] = &[
    "sec_damage_mult",
    "sec_proj_speed_mult",
    "sec_proj_lifetime_mult",
    "sec_accuracy_mult",
    "sec_magazine_mult",
    "sec_fire_rate_mult",
    "sec_reload_time_mult",
];

/// Creatures have no magazine, fire rate or reload.
const CREATURE_RANGED_PRIMARY: &[&str] = &[
    "pri_damage_mult",
    "pri_proj_speed_mult",
    "pri_proj_lifetime_mult",
    "pri_accuracy_mult",
];

const MELEE_PRIMARY: &[&str] = &["pri_damage_mult"];
const MELEE_SECONDARY: &[&str] = &["sec_damage_mult"];

const TURRET: &[&str] = &[
    "damage_mult",
    "proj_speed_mult",
    "proj_lifetime_mult",
    "range_mult",
    "accuracy_mult",
    "magazine_mult",
    "fire_rate_mult",
    "reload_time_mult",
];

const INFANTRY_MOVE: &[&str] = &["move_speed_mult", "jump_speed_mult"];
const WHEELED_MOVE: &[&str] = &["move_speed_mult", "turn_radius_mult"];
const HOVERED_MOVE: &[&str] = &["move_speed_mult", "turbo_speed_mult"];
const AIR_MOVE: &[&str] = &["move_speed_mult", "turbo_speed_mult", "strafe_speed_mult"];
const CREATURE_MOVE: &[&str] = &["move_speed_mult"];
const FLY_SPEED: &[&str] = &["fly_speed_mult"];
const CREATURE_STRAFE: &[&str] = &["strafe_speed_mult"];

const SENSE: &[&str] = &["target_distance", "fow_distance", "visible_event_radius_mult"];

// ============================================================================
// Category layouts
// ============================================================================

const INFANTRY: &[GroupSpec] = &[
    always(FieldGroup::Production, PRODUCTION),
    conditional(FieldGroup::PrimaryWeapon, INFANTRY_PRIMARY),
    always(FieldGroup::Movement, INFANTRY_MOVE),
    always(FieldGroup::Sense, SENSE),
];

const WHEELED_VEHICLE: &[GroupSpec] = &[
    always(FieldGroup::Production, PRODUCTION),
    conditional(FieldGroup::Dispense, DISPENSE),
    conditional(FieldGroup::PrimaryWeapon, VEHICLE_PRIMARY),
    conditional(FieldGroup::SecondaryWeapon, VEHICLE_SECONDARY),
    always(FieldGroup::Movement, WHEELED_MOVE),
    always(FieldGroup::Sense, SENSE),
];

const HOVERED_VEHICLE: &[GroupSpec] = &[
    always(FieldGroup::Production, PRODUCTION),
    conditional(FieldGroup::Dispense, DISPENSE),
    conditional(FieldGroup::PrimaryWeapon, VEHICLE_PRIMARY),
    conditional(FieldGroup::SecondaryWeapon, VEHICLE_SECONDARY),
    always(FieldGroup::Movement, HOVERED_MOVE),
    always(FieldGroup::Sense, SENSE),
];

const AIR_VEHICLE: &[GroupSpec] = &[
    always(FieldGroup::Production, PRODUCTION),
    conditional(FieldGroup::Dispense, DISPENSE),
    conditional(FieldGroup::PrimaryWeapon, VEHICLE_PRIMARY),
    conditional(FieldGroup::SecondaryWeapon, VEHICLE_SECONDARY),
    always(FieldGroup::Movement, AIR_MOVE),
    always(FieldGroup::Sense, SENSE),
];

const CREATURE_MELEE: &[GroupSpec] = &[
    always(FieldGroup::Production, PRODUCTION),
    conditional(FieldGroup::PrimaryWeapon, MELEE_PRIMARY),
    conditional(FieldGroup::SecondaryWeapon, MELEE_SECONDARY),
    always(FieldGroup::Movement, CREATURE_MOVE),
    conditional(FieldGroup::FlySpeed, FLY_SPEED),
    always(FieldGroup::Strafe, CREATURE_STRAFE),
    always(FieldGroup::Sense, SENSE),
];

const CREATURE_RANGED: &[GroupSpec] = &[
    always(FieldGroup::Production, PRODUCTION),
    conditional(FieldGroup::PrimaryWeapon, CREATURE_RANGED_PRIMARY),
    conditional(FieldGroup::SecondaryWeapon, MELEE_SECONDARY),
    always(FieldGroup::Movement, CREATURE_MOVE),
    conditional(FieldGroup::FlySpeed, FLY_SPEED),
    always(FieldGroup::Strafe, CREATURE_STRAFE),
    always(FieldGroup::Sense, SENSE),
];

// Identical to CREATURE_MELEE today; kept separate so the two can diverge.
const CREATURE_FLYING_MELEE: &[GroupSpec] = &[
    always(FieldGroup::Production, PRODUCTION),
    conditional(FieldGroup::PrimaryWeapon, MELEE_PRIMARY),
    conditional(FieldGroup::SecondaryWeapon, MELEE_SECONDARY),
    always(FieldGroup::Movement, CREATURE_MOVE),
    conditional(FieldGroup::FlySpeed, FLY_SPEED),
    always(FieldGroup::Strafe, CREATURE_STRAFE),
    always(FieldGroup::Sense, SENSE),
];

const STRUCTURE: &[GroupSpec] = &[
    always(FieldGroup::Production, PRODUCTION),
    always(FieldGroup::BuildRadius, BUILD_RADIUS),
];

const STRUCTURE_ARMED: &[GroupSpec] = &[
    always(FieldGroup::Production, PRODUCTION),
    always(FieldGroup::BuildRadius, BUILD_RADIUS),
    conditional(FieldGroup::Weapon, TURRET),
];

/// Ordered field groups of a category.
pub const fn layout(category: Category) -> &'static [GroupSpec] {
    match category {
        Category::Infantry => INFANTRY,
        Category::WheeledVehicle => WHEELED_VEHICLE,
        Category::HoveredVehicle => HOVERED_VEHICLE,
        Category::AirVehicle => AIR_VEHICLE,
        Category::CreatureMelee => CREATURE_MELEE,
        Category::CreatureRanged => CREATURE_RANGED,
        Category::CreatureFlyingMelee => CREATURE_FLYING_MELEE,
        Category::Structure => STRUCTURE,
        Category::StructureArmed => STRUCTURE_ARMED,
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Keys one group must contribute in full.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectedGroup {
    pub group: FieldGroup,
    pub keys: &'static [&'static str],
}

/// Allowed and disallowed tunable keys of one category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySchema {
    pub category: Category,
    /// Groups every entry must contain.
    pub expected: Vec<ExpectedGroup>,
    /// Keys that may appear when the unit has the matching sub-feature.
    pub conditional: BTreeSet<&'static str>,
    /// Keys that must never appear.
    pub forbidden: BTreeSet<&'static str>,
}

impl CategorySchema {
    /// Every key that must be present, group by group.
    pub fn expected_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.expected.iter().flat_map(|g| g.keys.iter().copied())
    }

    pub fn is_expected(&self, key: &str) -> bool {
        self.expected_keys().any(|k| k == key)
    }

    pub fn is_forbidden(&self, key: &str) -> bool {
        self.forbidden.contains(key)
    }

    /// Whether `key` may appear in an entry of this category.
    pub fn allows(&self, key: &str) -> bool {
        self.is_expected(key) || self.conditional.contains(key)
    }
}

/// Static schemas for all categories, derived once from [`layout`].
#[derive(Clone, Debug)]
pub struct SchemaRegistry {
    schemas: Vec<CategorySchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        let universe: BTreeSet<&'static str> = Category::all()
            .into_iter()
            .flat_map(|c| layout(c).iter())
            .flat_map(|spec| spec.keys.iter().copied())
            .collect();

        let schemas = Category::all()
            .into_iter()
            .map(|category| Self::derive(category, &universe))
            .collect();

        Self { schemas }
    }

    fn derive(category: Category, universe: &BTreeSet<&'static str>) -> CategorySchema {
        let mut expected = Vec::new();
        let mut conditional = BTreeSet::new();
        let mut allowed = BTreeSet::new();

        for spec in layout(category) {
            allowed.extend(spec.keys.iter().copied());
            match spec.presence {
                Presence::Always => expected.push(ExpectedGroup {
                    group: spec.group,
                    keys: spec.keys,
                }),
                Presence::Conditional => conditional.extend(spec.keys.iter().copied()),
            }
        }

        // A key can be mandatory in one group and optional in none other; if a
        // conditional group repeats an expected key it is still expected.
        for group in &expected {
            for key in group.keys {
                conditional.remove(key);
            }
        }

        let forbidden = universe.difference(&allowed).copied().collect();

        CategorySchema {
            category,
            expected,
            conditional,
            forbidden,
        }
    }

    pub fn schema(&self, category: Category) -> &CategorySchema {
        &self.schemas[category.as_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategorySchema> {
        self.schemas.iter()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    #[test]
    fn every_category_has_a_schema() {
        let registry = registry();
        for category in Category::all() {
            assert_eq!(registry.schema(category).category, category);
        }
    }

    #[test]
    fn sets_are_disjoint() {
        let registry = registry();
        for schema in registry.iter() {
            for key in schema.expected_keys() {
                assert!(!schema.forbidden.contains(key), "{}: {key}", schema.category);
                assert!(!schema.conditional.contains(key), "{}: {key}", schema.category);
            }
            for key in &schema.conditional {
                assert!(!schema.forbidden.contains(key), "{}: {key}", schema.category);
            }
        }
    }

    #[test]
    fn no_duplicate_keys_within_a_layout() {
        for category in Category::all() {
            let mut seen = BTreeSet::new();
            for spec in layout(category) {
                for key in spec.keys {
                    assert!(seen.insert(*key), "{category}: {key} declared twice");
                }
            }
        }
    }

    #[test]
    fn infantry_cannot_tune_turret_stats() {
        let schema = registry().schema(Category::Infantry).clone();
        for key in [
            "pri_accuracy_mult",
            "pri_magazine_mult",
            "pri_fire_rate_mult",
            "pri_reload_time_mult",
            "build_radius",
            "turbo_speed_mult",
            "fly_speed_mult",
        ] {
            assert!(schema.is_forbidden(key), "{key}");
        }
        assert!(schema.conditional.contains("pri_damage_mult"));
        assert!(schema.is_expected("jump_speed_mult"));
    }

    #[test]
    fn structures_have_no_movement_or_vision() {
        let registry = registry();
        for category in [Category::Structure, Category::StructureArmed] {
            let schema = registry.schema(category);
            for key in [
                "move_speed_mult",
                "target_distance",
                "fow_distance",
                "visible_event_radius_mult",
            ] {
                assert!(schema.is_forbidden(key), "{category}: {key}");
            }
            assert!(schema.is_expected("build_radius"));
        }
    }

    #[test]
    fn unarmed_structure_forbids_turret() {
        let registry = registry();
        assert!(registry.schema(Category::Structure).is_forbidden("damage_mult"));
        assert!(
            registry
                .schema(Category::StructureArmed)
                .conditional
                .contains("range_mult")
        );
    }

    #[test]
    fn ranged_creature_secondary_is_damage_only() {
        let schema = registry().schema(Category::CreatureRanged).clone();
        assert!(schema.conditional.contains("sec_damage_mult"));
        assert!(schema.is_forbidden("sec_proj_speed_mult"));
        assert!(schema.is_forbidden("pri_magazine_mult"));
        assert!(schema.conditional.contains("pri_accuracy_mult"));
    }

    #[test]
    fn fly_speed_is_conditional_for_creatures() {
        let registry = registry();
        for category in Category::all().into_iter().filter(|c| c.is_creature()) {
            let schema = registry.schema(category);
            assert!(schema.conditional.contains("fly_speed_mult"), "{category}");
            assert!(schema.is_expected("strafe_speed_mult"), "{category}");
        }
    }

    #[test]
    fn creature_fly_speed_sits_between_move_and_strafe() {
        let order = ["move_speed_mult", "fly_speed_mult", "strafe_speed_mult"];
        for category in Category::all().into_iter().filter(|c| c.is_creature()) {
            let keys: Vec<_> = layout(category)
                .iter()
                .flat_map(|spec| spec.keys.iter().copied())
                .filter(|key| order.contains(key))
                .collect();
            assert_eq!(keys, order, "{category}");
        }
    }

    #[test]
    fn dispense_timeout_only_for_vehicles() {
        let registry = registry();
        for category in Category::all() {
            let schema = registry.schema(category);
            assert_eq!(
                schema.allows("dispense_timeout"),
                category.is_vehicle(),
                "{category}"
            );
        }
    }

    #[test]
    fn melee_variants_currently_match() {
        let registry = registry();
        let melee = registry.schema(Category::CreatureMelee);
        let flying = registry.schema(Category::CreatureFlyingMelee);
        assert_eq!(melee.expected, flying.expected);
        assert_eq!(melee.conditional, flying.conditional);
        assert_eq!(melee.forbidden, flying.forbidden);
    }

    #[test]
    fn group_names() {
        assert_eq!(FieldGroup::PrimaryWeapon.to_string(), "weapon_pri");
        assert_eq!(FieldGroup::Movement.to_string(), "move");
        assert_eq!(FieldGroup::BuildRadius.to_string(), "build_radius");
    }
}
