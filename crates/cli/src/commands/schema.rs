//! Print the per-category field schema derived from the layout.

use anyhow::Result;
use balance_core::{Category, CategorySchema, SchemaRegistry};
use clap::Parser;
use console::style;

/// Print expected, conditional and forbidden keys per category
#[derive(Parser)]
pub struct Schema {
    /// Category to show (e.g. wheeled_vehicle); all categories when omitted
    #[arg(value_name = "CATEGORY")]
    category: Option<String>,
}

impl Schema {
    pub fn execute(self) -> Result<()> {
        let registry = SchemaRegistry::new();

        match self.category {
            Some(name) => {
                let category = Category::from_name(&name)?;
                print_schema(registry.schema(category));
            }
            None => {
                for schema in registry.iter() {
                    print_schema(schema);
                    println!();
                }
            }
        }
        Ok(())
    }
}

pub fn print_schema(schema: &CategorySchema) {
    println!("{}", style(format!("=== {} ===", schema.category)).bold().green());

    println!("{}", style("Expected:").bold().yellow());
    for group in &schema.expected {
        println!("  {:<14} {}", group.group, group.keys.join(", "));
    }

    println!("{}", style("Conditional:").bold().yellow());
    if schema.conditional.is_empty() {
        println!("  {}", style("(none)").dim());
    } else {
        println!("  {}", join(&schema.conditional));
    }

    println!("{}", style("Forbidden:").bold().yellow());
    println!("  {}", style(join(&schema.forbidden)).dim());
}

fn join<'a>(keys: impl IntoIterator<Item = &'a &'static str>) -> String {
    keys.into_iter().copied().collect::<Vec<_>>().join(", ")
}
