//! Output document model.
//!
//! The document is a hierarchical mapping:
//!
//! ```text
//! enabled, dump_fields, shrimp_disable_aim, description,
//! tech_time { _note, tier_1 .. tier_8 },
//! units {
//!     _teleport { cooldown, duration, _note },
//!     _comment_<section> "========== <title> ==========",
//!     <unit name> { ..config entry.. },
//!     ...
//! }
//! ```
//!
//! Underscore-prefixed keys are informational; consumers filter them out.

use sha2::{Digest, Sha256};

use crate::config::{GeneratorConfig, TechTime, TeleportSettings};
use crate::entry::{ConfigEntry, FieldValue, is_annotation_key};

pub const TELEPORT_KEY: &str = "_teleport";
pub const SEPARATOR_PREFIX: &str = "_comment_";

/// One item of the `units` mapping.
#[derive(Clone, Debug, PartialEq)]
pub enum UnitsItem {
    Teleport(TeleportSettings),
    /// Visual section separator. `key` includes the `_comment_` prefix.
    Separator { key: String, text: String },
    Unit { name: String, entry: ConfigEntry },
}

impl UnitsItem {
    pub fn key(&self) -> &str {
        match self {
            Self::Teleport(_) => TELEPORT_KEY,
            Self::Separator { key, .. } => key,
            Self::Unit { name, .. } => name,
        }
    }
}

/// The `units` mapping, in emission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnitsBlock {
    items: Vec<UnitsItem>,
}

impl UnitsBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_teleport(&mut self, teleport: TeleportSettings) {
        self.items.push(UnitsItem::Teleport(teleport));
    }

    /// Appends `_comment_<section_key>: "========== <title> =========="`.
    pub fn push_separator(&mut self, section_key: &str, title: &str) {
        self.items.push(UnitsItem::Separator {
            key: format!("{SEPARATOR_PREFIX}{section_key}"),
            text: format!("========== {title} =========="),
        });
    }

    /// Appends a unit entry, replacing an earlier entry of the same name.
    pub fn push_unit(&mut self, name: impl Into<String>, entry: ConfigEntry) {
        let name = name.into();
        let existing = self.items.iter_mut().find_map(|item| match item {
            UnitsItem::Unit { name: n, entry: e } if *n == name => Some(e),
            _ => None,
        });
        match existing {
            Some(slot) => *slot = entry,
            None => self.items.push(UnitsItem::Unit { name, entry }),
        }
    }

    pub fn items(&self) -> &[UnitsItem] {
        &self.items
    }

    pub fn teleport(&self) -> Option<&TeleportSettings> {
        self.items.iter().find_map(|item| match item {
            UnitsItem::Teleport(teleport) => Some(teleport),
            _ => None,
        })
    }

    /// Unit entries in emission order, markers skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ConfigEntry)> {
        self.items.iter().filter_map(|item| match item {
            UnitsItem::Unit { name, entry } => Some((name.as_str(), entry)),
            _ => None,
        })
    }

    pub fn get(&self, unit: &str) -> Option<&ConfigEntry> {
        self.entries().find(|(name, _)| *name == unit).map(|(_, e)| e)
    }

    pub fn unit_count(&self) -> usize {
        self.entries().count()
    }

    /// Tunable fields across all units.
    pub fn tunable_count(&self) -> usize {
        self.entries().map(|(_, e)| e.tunable_count()).sum()
    }

    /// SHA-256 over every unit entry, names and values included.
    ///
    /// Values are hashed at full precision so the fingerprint changes even
    /// when a change would not show in the document's two-decimal display.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = Sha256::new();
        for (name, entry) in self.entries() {
            hasher.update(name.as_bytes());
            hasher.update([0u8]);
            for (key, value) in entry.iter() {
                hasher.update(key.as_bytes());
                hasher.update([0u8]);
                match value {
                    FieldValue::Note(text) => {
                        hasher.update([b'n']);
                        hasher.update(text.as_bytes());
                    }
                    FieldValue::Multiplier(m) => {
                        hasher.update([b'm']);
                        hasher.update(m.to_le_bytes());
                    }
                    FieldValue::Absolute(a) => {
                        hasher.update([b'a']);
                        hasher.update(a.to_le_bytes());
                    }
                    FieldValue::Invalid => hasher.update([b'x']),
                }
                hasher.update([0u8]);
            }
            hasher.update([b'\n']);
        }

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Fingerprint(bytes)
    }
}

/// SHA-256 digest of a [`UnitsBlock`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub [u8; 32]);

/// Totals reported after generation or audit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocumentSummary {
    pub units: usize,
    pub tunables: usize,
    pub fingerprint: Fingerprint,
}

/// The complete balance configuration document.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BalanceDocument {
    pub enabled: bool,
    pub dump_fields: bool,
    pub shrimp_disable_aim: bool,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(with = "tech_time_block"))]
    pub tech_time: TechTime,
    pub units: UnitsBlock,
}

impl BalanceDocument {
    /// Empty document carrying the config's flags and the teleport block.
    pub fn new(config: &GeneratorConfig) -> Self {
        let mut units = UnitsBlock::new();
        units.push_teleport(config.teleport.clone());
        Self {
            enabled: config.enabled,
            dump_fields: config.dump_fields,
            shrimp_disable_aim: config.shrimp_disable_aim,
            description: config.description.clone(),
            tech_time: config.tech_time.clone(),
            units,
        }
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            units: self.units.unit_count(),
            tunables: self.units.tunable_count(),
            fingerprint: self.units.fingerprint(),
        }
    }
}

impl Default for BalanceDocument {
    fn default() -> Self {
        Self::new(&GeneratorConfig::default())
    }
}

/// Whether a key in the `units` mapping names a real unit.
pub fn is_unit_key(key: &str) -> bool {
    !is_annotation_key(key)
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::{IgnoredAny, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{SEPARATOR_PREFIX, TELEPORT_KEY, UnitsBlock, UnitsItem, is_unit_key};
    use crate::config::TeleportSettings;
    use crate::entry::ConfigEntry;

    impl Serialize for UnitsBlock {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.items.len()))?;
            for item in &self.items {
                match item {
                    UnitsItem::Teleport(teleport) => map.serialize_entry(TELEPORT_KEY, teleport)?,
                    UnitsItem::Separator { key, text } => map.serialize_entry(key, text)?,
                    UnitsItem::Unit { name, entry } => map.serialize_entry(name, entry)?,
                }
            }
            map.end()
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MarkerText {
        Text(String),
        Other(IgnoredAny),
    }

    struct UnitsVisitor;

    impl<'de> Visitor<'de> for UnitsVisitor {
        type Value = UnitsBlock;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a map of unit names to configuration entries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut block = UnitsBlock::new();
            while let Some(key) = access.next_key::<String>()? {
                if key == TELEPORT_KEY {
                    block.push_teleport(access.next_value::<TeleportSettings>()?);
                } else if key.starts_with(SEPARATOR_PREFIX) {
                    if let MarkerText::Text(text) = access.next_value::<MarkerText>()? {
                        block.items.push(UnitsItem::Separator { key, text });
                    }
                } else if is_unit_key(&key) {
                    let entry = access.next_value::<ConfigEntry>()?;
                    block.push_unit(key, entry);
                } else {
                    tracing::debug!(%key, "ignoring informational key");
                    access.next_value::<IgnoredAny>()?;
                }
            }
            Ok(block)
        }
    }

    impl<'de> Deserialize<'de> for UnitsBlock {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(UnitsVisitor)
        }
    }
}

/// `tech_time` as `{ "_note": ..., "tier_1": 30, ... }`.
#[cfg(feature = "serde")]
mod tech_time_block {
    use serde::de::{IgnoredAny, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use crate::config::{TECH_TIERS, TechTime};

    const NOTE_KEY: &str = "_note";

    pub fn serialize<S: Serializer>(tech: &TechTime, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TECH_TIERS + 1))?;
        map.serialize_entry(NOTE_KEY, &tech.note)?;
        for (i, seconds) in tech.tiers.iter().enumerate() {
            map.serialize_entry(&format!("tier_{}", i + 1), seconds)?;
        }
        map.end()
    }

    fn tier_index(key: &str) -> Option<usize> {
        let tier: usize = key.strip_prefix("tier_")?.parse().ok()?;
        (1..=TECH_TIERS).contains(&tier).then(|| tier - 1)
    }

    struct TechTimeVisitor;

    impl<'de> Visitor<'de> for TechTimeVisitor {
        type Value = TechTime;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a map of tier_N research times")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut tech = TechTime::default();
            while let Some(key) = access.next_key::<String>()? {
                if key == NOTE_KEY {
                    tech.note = access.next_value()?;
                } else if let Some(i) = tier_index(&key) {
                    tech.tiers[i] = access.next_value()?;
                } else {
                    access.next_value::<IgnoredAny>()?;
                }
            }
            Ok(tech)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TechTime, D::Error> {
        deserializer.deserialize_map(TechTimeVisitor)
    }
}
