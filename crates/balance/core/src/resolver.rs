//! Projectile ballistics lookup.
//!
//! Resolution never fabricates numbers: a miss stays `None` all the way into
//! the annotation text, where it is printed as [`PLACEHOLDER`].

use core::fmt;

use crate::tables::{ProjectileSpec, ReferenceOracle};

/// Prefix the game uses on projectile asset names.
pub const PROJECTILE_PREFIX: &str = "ProjectileData_";

/// Printed in annotations wherever a value is unknown.
pub const PLACEHOLDER: &str = "?";

/// Strips the asset prefix from a projectile id.
pub fn projectile_id(raw: &str) -> &str {
    raw.strip_prefix(PROJECTILE_PREFIX).unwrap_or(raw)
}

/// Display label for a projectile: its bare id, or the placeholder when the
/// id is empty.
pub fn projectile_label(raw: &str) -> &str {
    match projectile_id(raw) {
        "" => PLACEHOLDER,
        id => id,
    }
}

/// Resolves projectile ids against the reference tables.
#[derive(Clone, Copy)]
pub struct WeaponStatResolver<'a, O: ReferenceOracle + ?Sized> {
    oracle: &'a O,
}

impl<'a, O: ReferenceOracle + ?Sized> WeaponStatResolver<'a, O> {
    pub fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }

    /// Looks up `(damage, speed, lifetime)` for a projectile id, with or
    /// without the asset prefix.
    pub fn resolve(&self, projectile: &str) -> Option<ProjectileSpec> {
        match projectile_id(projectile) {
            "" => None,
            id => self.oracle.projectile(id),
        }
    }

    /// Like [`Self::resolve`] but split into displayable stats.
    pub fn stats(&self, projectile: &str) -> ProjectileStats {
        ProjectileStats::from(self.resolve(projectile))
    }
}

/// Projectile stats ready for annotation text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileStats {
    pub damage: Stat,
    pub speed: Stat,
    pub lifetime: Stat,
}

impl From<Option<ProjectileSpec>> for ProjectileStats {
    fn from(spec: Option<ProjectileSpec>) -> Self {
        Self {
            damage: Stat(spec.map(|s| s.damage)),
            speed: Stat(spec.map(|s| s.speed)),
            lifetime: Stat(spec.map(|s| s.lifetime)),
        }
    }
}

/// A possibly-unknown number. Displays as the number, or `?` when unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stat(pub Option<f64>);

impl Stat {
    pub const UNKNOWN: Stat = Stat(None);

    pub const fn known(value: f64) -> Self {
        Self(Some(value))
    }

    pub const fn is_known(&self) -> bool {
        self.0.is_some()
    }
}

impl From<f64> for Stat {
    fn from(value: f64) -> Self {
        Self(Some(value))
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => f.write_str(PLACEHOLDER),
        }
    }
}
