//! Consistency auditor.
//!
//! Checks every entry's key set against its category schema. The audit is
//! purely diagnostic: it never mutates entries and never fails. Units with no
//! category mapping are reported and skipped.

use core::fmt;
use std::collections::{BTreeMap, HashMap};

use crate::category::Category;
use crate::classification::Classification;
use crate::entry::ConfigEntry;
use crate::schema::SchemaRegistry;

/// Source of unit categories for the audit.
pub trait CategoryLookup {
    fn category_of(&self, unit: &str) -> Option<Category>;
}

impl CategoryLookup for Classification {
    fn category_of(&self, unit: &str) -> Option<Category> {
        Classification::category_of(self, unit)
    }
}

impl CategoryLookup for HashMap<String, Category> {
    fn category_of(&self, unit: &str) -> Option<Category> {
        self.get(unit).copied()
    }
}

impl CategoryLookup for BTreeMap<String, Category> {
    fn category_of(&self, unit: &str) -> Option<Category> {
        self.get(unit).copied()
    }
}

/// One disagreement between an entry and its schema.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Violation {
    /// A key the category always requires is absent.
    Missing(String),
    /// A key the category never allows is present.
    Forbidden(String),
    /// An allowed key is present but its value is not a number.
    Invalid(String),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing {key}"),
            Self::Forbidden(key) => write!(f, "should not have {key}"),
            Self::Invalid(key) => write!(f, "invalid value for {key}"),
        }
    }
}

/// Violations of one unit. Empty means the entry passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuditFinding {
    pub unit: String,
    pub category: Category,
    pub violations: Vec<Violation>,
}

impl AuditFinding {
    pub fn passes(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for AuditFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): ", self.unit, self.category)?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Result of one audit pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditReport {
    /// One finding per audited unit, in input order.
    pub findings: Vec<AuditFinding>,
    /// Units that had no category mapping.
    pub unmapped: Vec<String>,
}

impl AuditReport {
    /// Findings with at least one violation.
    pub fn failures(&self) -> impl Iterator<Item = &AuditFinding> {
        self.findings.iter().filter(|f| !f.passes())
    }

    pub fn violation_count(&self) -> usize {
        self.findings.iter().map(|f| f.violations.len()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.violation_count() == 0 && self.unmapped.is_empty()
    }

    pub fn finding(&self, unit: &str) -> Option<&AuditFinding> {
        self.findings.iter().find(|f| f.unit == unit)
    }

    /// Report lines: one per failing unit, then one per unmapped unit.
    pub fn lines(&self) -> Vec<String> {
        self.failures()
            .map(ToString::to_string)
            .chain(self.unmapped.iter().map(|u| format!("{u}: no category mapping")))
            .collect()
    }
}

/// Checks entries against a [`SchemaRegistry`].
pub struct Auditor<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> Auditor<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Audits one entry against one category.
    pub fn check(&self, category: Category, entry: &ConfigEntry) -> Vec<Violation> {
        let schema = self.registry.schema(category);

        let missing = schema
            .expected_keys()
            .filter(|key| !entry.contains_key(key))
            .map(|key| Violation::Missing(key.to_owned()));

        let forbidden = entry
            .tunable_keys()
            .filter(|key| schema.is_forbidden(key))
            .map(|key| Violation::Forbidden(key.to_owned()));

        let invalid = entry
            .iter()
            .filter(|(key, value)| value.is_invalid() && schema.allows(key))
            .map(|(key, _)| Violation::Invalid(key.to_owned()));

        missing.chain(forbidden).chain(invalid).collect()
    }

    /// Audits every `(unit, entry)` pair, looking categories up in `lookup`.
    pub fn audit<'e, L>(
        &self,
        entries: impl IntoIterator<Item = (&'e str, &'e ConfigEntry)>,
        lookup: &L,
    ) -> AuditReport
    where
        L: CategoryLookup + ?Sized,
    {
        let mut report = AuditReport::default();

        for (unit, entry) in entries {
            let Some(category) = lookup.category_of(unit) else {
                tracing::warn!(%unit, "no category mapping, skipping audit");
                report.unmapped.push(unit.to_owned());
                continue;
            };

            let violations = self.check(category, entry);
            for violation in &violations {
                tracing::warn!(%unit, %category, "{violation}");
            }
            report.findings.push(AuditFinding {
                unit: unit.to_owned(),
                category,
                violations,
            });
        }

        tracing::info!(
            audited = report.findings.len(),
            violations = report.violation_count(),
            unmapped = report.unmapped.len(),
            "audit complete"
        );
        report
    }
}
