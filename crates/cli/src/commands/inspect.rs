//! Show one unit's generated entry next to its category schema.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use balance_content::DumpLoader;
use balance_core::{Auditor, Roster, SchemaRegistry, UnitEntryBuilder};
use clap::Parser;
use console::style;

use crate::commands::schema::print_schema;
use crate::settings::CliSettings;
use crate::utils::{self, DataArgs};

/// Show one unit's generated entry and its category schema
#[derive(Parser)]
pub struct Inspect {
    /// Unit name as listed in the roster (e.g. "Hover Tank")
    #[arg(value_name = "UNIT")]
    unit: String,

    /// Snapshot dump JSON
    #[arg(value_name = "DUMP")]
    dump: PathBuf,

    #[command(flatten)]
    data: DataArgs,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let settings = CliSettings::from_env();
        let content = self.data.load(&settings)?;

        let category = content
            .classification
            .category_of(&self.unit)
            .ok_or_else(|| anyhow!("Unit '{}' is not in the roster", self.unit))?;

        let roster = Roster::from_records(
            DumpLoader::load(&self.dump)?,
            &content.config.preferred_faction,
        );
        let record = roster
            .get(&self.unit)
            .ok_or_else(|| anyhow!("Unit '{}' is not in {}", self.unit, self.dump.display()))?;

        let entry = UnitEntryBuilder::new(&content.tables).build(record, category);
        let registry = SchemaRegistry::new();

        println!("{} {}", style("Unit:").bold().cyan(), self.unit);
        println!("{} {}", style("Faction:").bold().cyan(), record.faction);
        println!("{} {}", style("Category:").bold().cyan(), category);
        if let Some(section) = content.classification.section_of(&self.unit) {
            println!("{} {}", style("Section:").bold().cyan(), section);
        }
        println!();
        println!("{}", utils::to_json(&entry)?);
        println!();
        print_schema(registry.schema(category));

        let violations = Auditor::new(&registry).check(category, &entry);
        if violations.is_empty() {
            println!("{}", style("✓ entry matches schema").green().bold());
        } else {
            for violation in violations {
                println!("  {} {}", style("✗").red().bold(), violation);
            }
        }
        Ok(())
    }
}
