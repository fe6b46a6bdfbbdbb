//! Generate the default configuration from a snapshot dump.

use std::path::PathBuf;

use anyhow::Result;
use balance_content::DumpLoader;
use balance_core::{Generator, SchemaRegistry};
use clap::Parser;
use console::style;

use crate::settings::CliSettings;
use crate::utils::{self, DataArgs};

/// Build the default configuration from a snapshot dump
#[derive(Parser)]
pub struct Generate {
    /// Snapshot dump JSON written by the in-game dumper
    #[arg(value_name = "DUMP")]
    dump: PathBuf,

    /// Output path (defaults to UNIT_BALANCE_OUTPUT or Si_UnitBalance_Config_Default.json)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Fail when any unit is missing or violates its schema
    #[arg(long)]
    strict: bool,

    #[command(flatten)]
    data: DataArgs,
}

impl Generate {
    pub fn execute(self) -> Result<()> {
        let settings = CliSettings::from_env();
        let content = self.data.load(&settings)?;
        let records = DumpLoader::load(&self.dump)?;

        let registry = SchemaRegistry::new();
        let generator = Generator::new(
            &content.config,
            &content.classification,
            &registry,
            &content.tables,
        );
        let generation = generator.generate(records);

        if self.stdout {
            println!("{}", utils::to_json(&generation.document)?);
            // Keep stdout pure JSON; the report goes to the log.
            for line in generation.report.lines() {
                tracing::warn!("{line}");
            }
        } else {
            let output = self.output.unwrap_or(settings.output);
            utils::write_json(&output, &generation.document)?;
            println!("{} {}", style("Written").bold().green(), output.display());
            utils::print_summary(&generation.summary);
            for unit in &generation.missing {
                println!(
                    "  {} {}: not in snapshot",
                    style("!").yellow().bold(),
                    style(unit).bold()
                );
            }
            utils::print_report(&generation.report);
        }

        if self.strict && !generation.is_complete() {
            anyhow::bail!(
                "{} missing units, {} schema violations",
                generation.missing.len(),
                generation.report.violation_count()
            );
        }
        Ok(())
    }
}
