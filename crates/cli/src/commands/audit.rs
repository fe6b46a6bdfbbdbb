//! Audit an existing configuration document.

use std::path::PathBuf;

use anyhow::Result;
use balance_content::DocumentLoader;
use balance_core::{Auditor, SchemaRegistry};
use clap::Parser;
use console::style;

use crate::settings::CliSettings;
use crate::utils::{self, DataArgs};

/// Audit an existing configuration document against the category schema
#[derive(Parser)]
pub struct Audit {
    /// Configuration document (defaults to UNIT_BALANCE_OUTPUT)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Exit with an error when the audit is not clean
    #[arg(long)]
    strict: bool,

    #[command(flatten)]
    data: DataArgs,
}

impl Audit {
    pub fn execute(self) -> Result<()> {
        let settings = CliSettings::from_env();
        let content = self.data.load(&settings)?;
        let path = self.config.unwrap_or(settings.output);
        let document = DocumentLoader::load(&path)?;

        let registry = SchemaRegistry::new();
        let report =
            Auditor::new(&registry).audit(document.units.entries(), &content.classification);

        println!("{} {}", style("Config:").bold().cyan(), path.display());
        utils::print_summary(&document.summary());

        let absent: Vec<_> = content
            .classification
            .units()
            .filter(|unit| document.units.get(&unit.name).is_none())
            .map(|unit| unit.name.as_str())
            .collect();
        if !absent.is_empty() {
            println!(
                "{} {}",
                style("Classified but absent:").bold().yellow(),
                absent.join(", ")
            );
        }

        utils::print_report(&report);

        if self.strict {
            if let Some(failure) = utils::strict_failure(&report) {
                anyhow::bail!(failure);
            }
        }
        Ok(())
    }
}
