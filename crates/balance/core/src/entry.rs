//! Configuration entry of a single unit.
//!
//! An entry is an ordered mapping from field name to value. The field kind is
//! carried by the name:
//!
//! - `_base`, `_pri_weapon`, ... (leading underscore): descriptive annotation
//! - `*_mult`: tunable multiplier, neutral at `1.0`
//! - anything else: absolute override, `-1` meaning "not applicable"

use core::fmt;

/// Neutral multiplier: apply the unit's baseline unchanged.
pub const NEUTRAL: f64 = 1.0;

/// Sentinel for absolute overrides: no constraint / not applicable.
pub const NOT_APPLICABLE: i64 = -1;

/// Kind of a configuration field, derived from its name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Annotation,
    Multiplier,
    Absolute,
}

impl FieldKind {
    /// Classifies a key by naming convention.
    pub fn of_key(key: &str) -> Self {
        if is_annotation_key(key) {
            Self::Annotation
        } else if key.ends_with("_mult") {
            Self::Multiplier
        } else {
            Self::Absolute
        }
    }

    pub const fn is_tunable(self) -> bool {
        !matches!(self, Self::Annotation)
    }
}

/// Keys starting with `_` are informational and ignored by consumers.
pub fn is_annotation_key(key: &str) -> bool {
    key.starts_with('_')
}

/// A single field value.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Human-readable summary of baseline values.
    Note(String),
    Multiplier(f64),
    Absolute(i64),
    /// A tunable key read back with a value that is not a number (null, a
    /// string, a nested map). The key still counts as present.
    Invalid,
}

impl FieldValue {
    pub const fn neutral() -> Self {
        Self::Multiplier(NEUTRAL)
    }

    pub const fn not_applicable() -> Self {
        Self::Absolute(NOT_APPLICABLE)
    }

    /// Kind carried by the value; `None` for [`FieldValue::Invalid`].
    pub const fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Note(_) => Some(FieldKind::Annotation),
            Self::Multiplier(_) => Some(FieldKind::Multiplier),
            Self::Absolute(_) => Some(FieldKind::Absolute),
            Self::Invalid => None,
        }
    }

    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }

    pub fn as_note(&self) -> Option<&str> {
        match self {
            Self::Note(text) => Some(text),
            _ => None,
        }
    }

    pub const fn as_multiplier(&self) -> Option<f64> {
        match self {
            Self::Multiplier(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_absolute(&self) -> Option<i64> {
        match self {
            Self::Absolute(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Note(text) => f.write_str(text),
            Self::Multiplier(value) => write!(f, "{value:.2}"),
            Self::Absolute(value) => write!(f, "{value}"),
            Self::Invalid => f.write_str("invalid"),
        }
    }
}

/// Ordered field map for one unit. Built once, never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigEntry {
    fields: Vec<(String, FieldValue)>,
}

impl ConfigEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field. Re-inserting a key replaces its value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn annotate(&mut self, key: &str, text: impl Into<String>) {
        debug_assert!(is_annotation_key(key), "annotation key must start with '_': {key}");
        self.insert(key, FieldValue::Note(text.into()));
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys that a consumer applies (no leading underscore).
    pub fn tunable_keys(&self) -> impl Iterator<Item = &str> {
        self.keys().filter(|k| !is_annotation_key(k))
    }

    pub fn tunable_count(&self) -> usize {
        self.tunable_keys().count()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::{IgnoredAny, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{ConfigEntry, FieldKind, FieldValue};

    impl Serialize for FieldValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Self::Note(text) => serializer.serialize_str(text),
                Self::Multiplier(value) => serializer.serialize_f64(*value),
                Self::Absolute(value) => serializer.serialize_i64(*value),
                Self::Invalid => serializer.serialize_unit(),
            }
        }
    }

    impl Serialize for ConfigEntry {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.fields.len()))?;
            for (key, value) in &self.fields {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }

    /// Scalar shapes a hand-edited document may contain.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Text(String),
        Integer(i64),
        Float(f64),
        Other(IgnoredAny),
    }

    impl RawValue {
        /// Interprets a raw value according to the kind implied by `key`.
        ///
        /// Only annotations can be dropped. A tunable key with an unusable
        /// value is kept as [`FieldValue::Invalid`] so the audit still sees it.
        fn into_field(self, key: &str) -> Option<FieldValue> {
            match (FieldKind::of_key(key), self) {
                (FieldKind::Annotation, Self::Text(text)) => Some(FieldValue::Note(text)),
                (FieldKind::Annotation, Self::Integer(v)) => Some(FieldValue::Note(v.to_string())),
                (FieldKind::Annotation, Self::Float(v)) => Some(FieldValue::Note(v.to_string())),
                (FieldKind::Annotation, Self::Other(_)) => None,
                (_, Self::Text(_) | Self::Other(_)) => Some(FieldValue::Invalid),
                (FieldKind::Multiplier, Self::Integer(v)) => Some(FieldValue::Multiplier(v as f64)),
                (FieldKind::Multiplier, Self::Float(v)) => Some(FieldValue::Multiplier(v)),
                (FieldKind::Absolute, Self::Integer(v)) => Some(FieldValue::Absolute(v)),
                (FieldKind::Absolute, Self::Float(v)) => Some(FieldValue::Absolute(v.round() as i64)),
            }
        }
    }

    struct EntryVisitor;

    impl<'de> Visitor<'de> for EntryVisitor {
        type Value = ConfigEntry;

        fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str("a map of unit configuration fields")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut entry = ConfigEntry::new();
            while let Some((key, raw)) = access.next_entry::<String, RawValue>()? {
                match raw.into_field(&key) {
                    Some(FieldValue::Invalid) => {
                        tracing::debug!(field = %key, "tunable field has no numeric value");
                        entry.insert(key, FieldValue::Invalid);
                    }
                    Some(value) => entry.insert(key, value),
                    None => tracing::debug!(field = %key, "skipping non-scalar annotation"),
                }
            }
            Ok(entry)
        }
    }

    impl<'de> Deserialize<'de> for ConfigEntry {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(EntryVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_naming_convention() {
        assert_eq!(FieldKind::of_key("_base"), FieldKind::Annotation);
        assert_eq!(FieldKind::of_key("_sec_weapon"), FieldKind::Annotation);
        assert_eq!(FieldKind::of_key("pri_damage_mult"), FieldKind::Multiplier);
        assert_eq!(FieldKind::of_key("min_tier"), FieldKind::Absolute);
        assert_eq!(FieldKind::of_key("build_radius"), FieldKind::Absolute);
    }

    #[test]
    fn insert_keeps_first_position() {
        let mut entry = ConfigEntry::new();
        entry.annotate("_base", "HP:100 T0");
        entry.insert("health_mult", FieldValue::neutral());
        entry.insert("_base", FieldValue::Note("HP:200 T0".into()));

        let keys: Vec<_> = entry.keys().collect();
        assert_eq!(keys, ["_base", "health_mult"]);
        assert_eq!(entry.get("_base").and_then(FieldValue::as_note), Some("HP:200 T0"));
    }

    #[test]
    fn tunables_exclude_annotations() {
        let mut entry = ConfigEntry::new();
        entry.annotate("_base", "HP:100 T0");
        entry.insert("health_mult", FieldValue::neutral());
        entry.insert("min_tier", FieldValue::Absolute(2));
        assert_eq!(entry.len(), 3);
        assert_eq!(entry.tunable_count(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_in_insertion_order() {
        let mut entry = ConfigEntry::new();
        entry.annotate("_base", "HP:100 T0");
        entry.insert("health_mult", FieldValue::neutral());
        entry.insert("min_tier", FieldValue::not_applicable());

        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"_base":"HP:100 T0","health_mult":1.0,"min_tier":-1}"#);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_by_key_kind() {
        let json = r#"{
            "_base": "HP:100 T0",
            "health_mult": 2,
            "fow_distance": 1500.0,
            "projectiles": {"Rifle": {"damage_mult": 2.0}}
        }"#;
        let entry: ConfigEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.get("health_mult"), Some(&FieldValue::Multiplier(2.0)));
        assert_eq!(entry.get("fow_distance"), Some(&FieldValue::Absolute(1500)));
        assert_eq!(entry.get("projectiles"), Some(&FieldValue::Invalid));
        assert_eq!(entry.len(), 4);
    }

    #[test]
    fn multiplier_display_uses_two_decimals() {
        assert_eq!(FieldValue::neutral().to_string(), "1.00");
        assert_eq!(FieldValue::not_applicable().to_string(), "-1");
    }
}
