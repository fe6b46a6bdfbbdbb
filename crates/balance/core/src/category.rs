//! Closed unit taxonomy.
//!
//! Every unit in the roster is assigned exactly one [`Category`] by the
//! classification table. The category decides which families of tunable
//! fields are valid for the unit; nothing in this crate infers it.

use crate::error::ClassificationError;

/// Unit category (closed set).
///
/// The string form is the snake_case name used by the classification data
/// and by audit output (`"wheeled_vehicle"`, `"structure_armed"`, ...).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Category {
    /// Foot soldier with a single character-held weapon.
    Infantry,
    /// Ground vehicle on wheels or tracks.
    WheeledVehicle,
    /// Hovering ground vehicle with a turbo boost.
    HoveredVehicle,
    /// Aircraft.
    AirVehicle,
    /// Ground creature that only fights in melee.
    CreatureMelee,
    /// Creature with a projectile attack and an optional melee attack.
    CreatureRanged,
    /// Flying creature that only fights in melee.
    CreatureFlyingMelee,
    /// Unarmed building.
    Structure,
    /// Building with a turret.
    StructureArmed,
}

impl Category {
    pub const COUNT: usize = 9;

    /// Returns all categories in declaration order.
    pub const fn all() -> [Category; Self::COUNT] {
        [
            Category::Infantry,
            Category::WheeledVehicle,
            Category::HoveredVehicle,
            Category::AirVehicle,
            Category::CreatureMelee,
            Category::CreatureRanged,
            Category::CreatureFlyingMelee,
            Category::Structure,
            Category::StructureArmed,
        ]
    }

    /// Parses a category name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self, ClassificationError> {
        name.trim()
            .parse()
            .map_err(|_| ClassificationError::UnknownCategory(name.to_owned()))
    }

    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }

    /// Buildings: no movement, no vision, but a construction radius.
    pub const fn is_structure(self) -> bool {
        matches!(self, Self::Structure | Self::StructureArmed)
    }

    /// Vehicles carry turret hardpoints (two weapon slots).
    pub const fn is_vehicle(self) -> bool {
        matches!(
            self,
            Self::WheeledVehicle | Self::HoveredVehicle | Self::AirVehicle
        )
    }

    pub const fn is_creature(self) -> bool {
        matches!(
            self,
            Self::CreatureMelee | Self::CreatureRanged | Self::CreatureFlyingMelee
        )
    }
}
