//! Fixed classification table: which category each unit belongs to.
//!
//! The table is ordered into roster sections (one per production building or
//! faction group). Section order drives the output document layout; unit
//! order within a section drives entry order.

use std::collections::HashMap;

use crate::category::Category;
use crate::error::ClassificationError;

/// One classified unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassifiedUnit {
    pub name: String,
    pub category: Category,
}

impl ClassifiedUnit {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Group of units emitted together under one separator marker.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterSection {
    /// Short identifier, used in the `_comment_<key>` marker.
    pub key: String,
    /// Human-readable heading.
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub units: Vec<ClassifiedUnit>,
}

impl RosterSection {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            units: Vec::new(),
        }
    }

    pub fn with_units(
        mut self,
        category: Category,
        names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.units
            .extend(names.into_iter().map(|name| ClassifiedUnit::new(name, category)));
        self
    }
}

/// Validated classification: every unit name appears exactly once.
#[derive(Clone, Debug, Default)]
pub struct Classification {
    sections: Vec<RosterSection>,
    index: HashMap<String, (usize, Category)>,
}

impl Classification {
    pub fn new(sections: Vec<RosterSection>) -> Result<Self, ClassificationError> {
        let mut index: HashMap<String, (usize, Category)> = HashMap::new();

        for (position, section) in sections.iter().enumerate() {
            if sections[..position].iter().any(|s| s.key == section.key) {
                return Err(ClassificationError::DuplicateSection(section.key.clone()));
            }

            for unit in &section.units {
                if let Some(&(first, first_category)) = index.get(&unit.name) {
                    return Err(ClassificationError::DuplicateUnit {
                        name: unit.name.clone(),
                        first: first_category,
                        first_section: sections[first].key.clone(),
                        second: unit.category,
                        second_section: section.key.clone(),
                    });
                }
                index.insert(unit.name.clone(), (position, unit.category));
            }
        }

        tracing::debug!(
            sections = sections.len(),
            units = index.len(),
            "classification loaded"
        );
        Ok(Self { sections, index })
    }

    pub fn category_of(&self, unit: &str) -> Option<Category> {
        self.index.get(unit).map(|&(_, category)| category)
    }

    /// Section key the unit is listed under.
    pub fn section_of(&self, unit: &str) -> Option<&str> {
        self.index
            .get(unit)
            .map(|&(section, _)| self.sections[section].key.as_str())
    }

    pub fn sections(&self) -> &[RosterSection] {
        &self.sections
    }

    /// All classified units in roster order.
    pub fn units(&self) -> impl Iterator<Item = &ClassifiedUnit> {
        self.sections.iter().flat_map(|s| s.units.iter())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<RosterSection> {
        vec![
            RosterSection::new("sol_barracks", "SOL — Barracks")
                .with_units(Category::Infantry, ["Scout", "Rifleman"]),
            RosterSection::new("struct", "SOL/CENTAURI — Structures")
                .with_units(Category::Structure, ["Headquarters"])
                .with_units(Category::StructureArmed, ["Turret"]),
        ]
    }

    #[test]
    fn looks_up_category_and_section() {
        let classification = Classification::new(sections()).unwrap();
        assert_eq!(classification.len(), 4);
        assert_eq!(classification.category_of("Turret"), Some(Category::StructureArmed));
        assert_eq!(classification.section_of("Scout"), Some("sol_barracks"));
        assert_eq!(classification.category_of("Crab"), None);
    }

    #[test]
    fn units_follow_roster_order() {
        let classification = Classification::new(sections()).unwrap();
        let names: Vec<_> = classification.units().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Scout", "Rifleman", "Headquarters", "Turret"]);
    }

    #[test]
    fn rejects_unit_classified_twice() {
        let mut sections = sections();
        sections.push(
            RosterSection::new("cen_barracks", "CENTAURI — Barracks")
                .with_units(Category::Infantry, ["Rifleman"]),
        );
        let err = Classification::new(sections).unwrap_err();
        assert_eq!(err.error_code(), "CLASSIFICATION_DUPLICATE_UNIT");
        assert!(err.to_string().contains("'Rifleman'"));
    }

    #[test]
    fn rejects_reused_section_key() {
        let mut sections = sections();
        sections.push(RosterSection::new("struct", "again"));
        assert_eq!(
            Classification::new(sections).unwrap_err(),
            ClassificationError::DuplicateSection("struct".into())
        );
    }
}
