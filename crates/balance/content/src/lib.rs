//! Data-file loaders for the balance generator.
//!
//! Turns the static data directory into `balance-core` values:
//! - Generator settings (TOML)
//! - Roster classification (RON)
//! - Reference tables: projectiles, weapons, movement, creature attacks (RON)
//! - Game snapshot dumps (JSON)
//!
//! Nothing loaded here is mutated after construction; the core receives it by
//! reference.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, Content, ContentFactory, DocumentLoader, DumpLoader, LoadResult, RosterLoader,
    TablesLoader,
};
