//! Unit balance configuration: categorical entry construction and auditing.
//!
//! `balance-core` turns raw snapshot records into per-unit configuration
//! entries and checks them against a per-category schema. Both the builder
//! ([`builder::UnitEntryBuilder`]) and the registry
//! ([`schema::SchemaRegistry`]) are driven by the same static layout in
//! [`schema::layout`]. Reference data is reached through
//! [`tables::ReferenceOracle`]; nothing here performs I/O.
pub mod audit;
pub mod builder;
pub mod category;
pub mod classification;
pub mod config;
pub mod document;
pub mod entry;
pub mod error;
pub mod generate;
pub mod record;
pub mod resolver;
pub mod schema;
pub mod tables;

pub use audit::{AuditFinding, AuditReport, Auditor, CategoryLookup, Violation};
pub use builder::{GroupEmission, UnitEntryBuilder};
pub use category::Category;
pub use classification::{Classification, ClassifiedUnit, RosterSection};
pub use config::{GeneratorConfig, TechTime, TeleportSettings};
pub use document::{BalanceDocument, DocumentSummary, Fingerprint, UnitsBlock, UnitsItem};
pub use entry::{ConfigEntry, FieldKind, FieldValue, NEUTRAL, NOT_APPLICABLE};
pub use error::ClassificationError;
pub use generate::{Generation, Generator};
pub use record::{Roster, UnitRecord};
pub use resolver::{ProjectileStats, Stat, WeaponStatResolver};
pub use schema::{CategorySchema, FieldGroup, GroupSpec, Presence, SchemaRegistry};
pub use tables::{
    CreatureAttackOverride, CreatureMelee, InfantrySpeed, InfantryWeapon, ProjectileSpec,
    RangedCreatureMelee, ReferenceOracle, ReferenceTables, TurretSpec, VehicleMovement,
    VehicleWeapons,
};
