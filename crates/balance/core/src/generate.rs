//! Generation pipeline: snapshot records in, configuration document and audit
//! report out.
//!
//! One pass builds every classified unit's entry in roster order; a second
//! pass audits the finished set. Neither pass stops at a bad unit.

use crate::audit::{AuditReport, Auditor, CategoryLookup};
use crate::builder::UnitEntryBuilder;
use crate::classification::Classification;
use crate::config::GeneratorConfig;
use crate::document::{BalanceDocument, DocumentSummary};
use crate::record::{Roster, UnitRecord};
use crate::schema::SchemaRegistry;
use crate::tables::ReferenceOracle;

/// Output of one generation run.
#[derive(Clone, Debug)]
pub struct Generation {
    pub document: BalanceDocument,
    pub report: AuditReport,
    /// Classified units with no snapshot record; they have no entry.
    pub missing: Vec<String>,
    pub summary: DocumentSummary,
}

impl Generation {
    /// Whether every classified unit was built and passed the audit.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.report.is_clean()
    }
}

/// Wires the builder and auditor to one configuration and classification.
pub struct Generator<'a, O: ReferenceOracle + ?Sized> {
    config: &'a GeneratorConfig,
    classification: &'a Classification,
    registry: &'a SchemaRegistry,
    builder: UnitEntryBuilder<'a, O>,
}

impl<'a, O: ReferenceOracle + ?Sized> Generator<'a, O> {
    pub fn new(
        config: &'a GeneratorConfig,
        classification: &'a Classification,
        registry: &'a SchemaRegistry,
        oracle: &'a O,
    ) -> Self {
        Self {
            config,
            classification,
            registry,
            builder: UnitEntryBuilder::new(oracle),
        }
    }

    /// De-duplicates the snapshot, then runs both passes.
    pub fn generate(&self, records: impl IntoIterator<Item = UnitRecord>) -> Generation {
        let roster = Roster::from_records(records, &self.config.preferred_faction);
        tracing::info!(
            records = roster.len(),
            preferred_faction = %self.config.preferred_faction,
            "snapshot de-duplicated"
        );
        self.generate_from(&roster)
    }

    pub fn generate_from(&self, roster: &Roster) -> Generation {
        let mut document = BalanceDocument::new(self.config);
        let mut missing = Vec::new();

        for section in self.classification.sections() {
            document.units.push_separator(&section.key, &section.title);
            for unit in &section.units {
                let Some(record) = roster.get(&unit.name) else {
                    tracing::warn!(unit = %unit.name, section = %section.key, "not in snapshot, skipping");
                    missing.push(unit.name.clone());
                    continue;
                };
                let entry = self.builder.build(record, unit.category);
                document.units.push_unit(unit.name.clone(), entry);
            }
        }

        let report = self.audit(&document, self.classification);
        let summary = document.summary();
        tracing::info!(
            units = summary.units,
            tunables = summary.tunables,
            missing = missing.len(),
            "generation complete"
        );

        Generation {
            document,
            report,
            missing,
            summary,
        }
    }

    /// Audits any document, generated or hand-edited.
    pub fn audit<L: CategoryLookup + ?Sized>(
        &self,
        document: &BalanceDocument,
        lookup: &L,
    ) -> AuditReport {
        Auditor::new(self.registry).audit(document.units.entries(), lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::classification::RosterSection;
    use crate::entry::FieldValue;
    use crate::tables::{InfantryWeapon, ReferenceTables};

    fn classification() -> Classification {
        Classification::new(vec![
            RosterSection::new("sol_barracks", "SOL — Barracks")
                .with_units(Category::Infantry, ["Scout", "Rifleman"]),
            RosterSection::new("struct", "SOL/CENTAURI — Structures")
                .with_units(Category::Structure, ["Headquarters"])
                .with_units(Category::StructureArmed, ["Turret"]),
        ])
        .unwrap()
    }

    fn tables() -> ReferenceTables {
        ReferenceTables::new().with_infantry_weapon(
            "Rifleman",
            InfantryWeapon {
                projectile: "Rifle".into(),
                damage: 45.0,
                speed: 500.0,
                lifetime: 3.0,
            },
        )
    }

    fn records() -> Vec<UnitRecord> {
        let mut hq_centauri = UnitRecord::new("Headquarters", "Centauri");
        hq_centauri.hp = 1000.0;
        let mut hq_sol = UnitRecord::new("Headquarters", "Sol");
        hq_sol.hp = 3000.0;
        vec![
            UnitRecord::new("Scout", "Sol"),
            UnitRecord::new("Rifleman", "Sol"),
            hq_centauri,
            hq_sol,
            UnitRecord::new("Turret", "Sol"),
            UnitRecord::new("Crab", "Alien"),
        ]
    }

    #[test]
    fn generates_clean_document_in_roster_order() {
        let (config, classification, registry, tables) = (
            GeneratorConfig::default(),
            classification(),
            SchemaRegistry::new(),
            tables(),
        );
        let generation =
            Generator::new(&config, &classification, &registry, &tables).generate(records());

        assert!(generation.is_complete(), "{:?}", generation.report.lines());
        let names: Vec<_> = generation.document.units.entries().map(|(n, _)| n).collect();
        assert_eq!(names, ["Scout", "Rifleman", "Headquarters", "Turret"]);
        assert_eq!(generation.summary.units, 4);

        let hq = generation.document.units.get("Headquarters").unwrap();
        assert_eq!(hq.get("_base").and_then(FieldValue::as_note), Some("HP:3000 T0"));
    }

    #[test]
    fn missing_snapshot_unit_is_skipped() {
        let (config, classification, registry, tables) = (
            GeneratorConfig::default(),
            classification(),
            SchemaRegistry::new(),
            tables(),
        );
        let records = records().into_iter().filter(|r| r.name != "Turret");
        let generation =
            Generator::new(&config, &classification, &registry, &tables).generate(records);

        assert_eq!(generation.missing, ["Turret"]);
        assert!(generation.report.is_clean());
        assert!(!generation.is_complete());
        assert!(generation.document.units.get("Turret").is_none());
    }

    #[test]
    fn generation_is_reproducible() {
        let (config, classification, registry, tables) = (
            GeneratorConfig::default(),
            classification(),
            SchemaRegistry::new(),
            tables(),
        );
        let generator = Generator::new(&config, &classification, &registry, &tables);
        let first = generator.generate(records());
        let second = generator.generate(records());
        assert_eq!(first.document, second.document);
        assert_eq!(first.summary.fingerprint, second.summary.fingerprint);
    }

    #[test]
    fn audits_edited_document() {
        let (config, classification, registry, tables) = (
            GeneratorConfig::default(),
            classification(),
            SchemaRegistry::new(),
            tables(),
        );
        let generator = Generator::new(&config, &classification, &registry, &tables);
        let mut document = generator.generate(records()).document;

        let mut scout = document.units.get("Scout").cloned().unwrap();
        scout.insert("build_radius", FieldValue::Absolute(500));
        document.units.push_unit("Scout", scout);

        let report = generator.audit(&document, &classification);
        assert_eq!(report.lines(), ["Scout (infantry): should not have build_radius"]);
    }
}
