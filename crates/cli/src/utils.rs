//! Shared helpers for CLI commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use balance_content::{Content, ContentFactory};
use balance_core::{AuditReport, DocumentSummary};
use clap::Args;
use console::style;
use serde::Serialize;

use crate::settings::CliSettings;

/// Data directory selection shared by every command.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Data directory with balance.toml, roster.ron and tables/
    /// (defaults to UNIT_BALANCE_DATA_DIR or ./data)
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Faction whose record wins when the snapshot lists a unit more than once
    #[arg(long, value_name = "FACTION")]
    pub preferred_faction: Option<String>,
}

impl DataArgs {
    /// Load all content, applying flag and environment overrides.
    pub fn load(&self, settings: &CliSettings) -> Result<Content> {
        let data_dir = self.data_dir.as_ref().unwrap_or(&settings.data_dir);
        let mut content = ContentFactory::new(data_dir)
            .load_all()
            .with_context(|| format!("Failed to load content from {}", data_dir.display()))?;

        if let Some(faction) = self
            .preferred_faction
            .as_ref()
            .or(settings.preferred_faction.as_ref())
        {
            content.config.preferred_faction = faction.clone();
        }
        Ok(content)
    }
}

/// Serialize as JSON with 4-space indentation.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;
    Ok(String::from_utf8(buf)?)
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut json = to_json(value)?;
    json.push('\n');
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn print_summary(summary: &DocumentSummary) {
    println!(
        "{} {}",
        style("Total units/buildings:").bold().cyan(),
        summary.units
    );
    println!(
        "{} {}",
        style("Total parameter fields:").bold().cyan(),
        summary.tunables
    );
    println!(
        "{} {}",
        style("Fingerprint:").bold().cyan(),
        hex::encode(summary.fingerprint.0)
    );
}

pub fn print_report(report: &AuditReport) {
    println!();
    println!("{}", style("=== AUDIT ===").bold().green());

    for finding in report.failures() {
        println!(
            "  {} {} ({}): {}",
            style("✗").red().bold(),
            style(&finding.unit).bold(),
            finding.category,
            finding
                .violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    for unit in &report.unmapped {
        println!(
            "  {} {}: no category mapping",
            style("!").yellow().bold(),
            style(unit).bold()
        );
    }

    if report.is_clean() {
        println!(
            "  {} {} units pass",
            style("✓").green().bold(),
            report.findings.len()
        );
    } else {
        println!(
            "  {} violations in {} units, {} unmapped",
            style(report.violation_count()).red().bold(),
            report.failures().count(),
            report.unmapped.len()
        );
    }
}

/// Reason a `--strict` audit fails, or `None` when the report is clean.
pub fn strict_failure(report: &AuditReport) -> Option<String> {
    (!report.is_clean()).then(|| {
        format!(
            "audit found {} violations and {} unmapped units",
            report.violation_count(),
            report.unmapped.len()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_failure_counts_unmapped_units() {
        let clean = AuditReport::default();
        assert_eq!(strict_failure(&clean), None);

        let report = AuditReport {
            unmapped: vec!["Mystery".into()],
            ..AuditReport::default()
        };
        assert_eq!(
            strict_failure(&report).as_deref(),
            Some("audit found 0 violations and 1 unmapped units")
        );
    }

    #[test]
    fn json_uses_four_space_indent() {
        let json = to_json(&serde_json::json!({"a": {"b": 1}})).unwrap();
        assert_eq!(json, "{\n    \"a\": {\n        \"b\": 1\n    }\n}");
    }

    #[test]
    fn writes_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json(&path, &vec![1, 2]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("]\n"));
    }
}
