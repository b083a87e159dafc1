//! `stn show` command - One item and its history

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::Session;
use crate::cli::helpers::{resolve_format, styled_quantity};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::table::StockError;
use crate::entities::remarks::Action;

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Item ID (e.g. STN-0001)
    pub id: String,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let table = session.load()?;
    let item = table
        .get(&args.id)
        .ok_or_else(|| StockError::NotFound(args.id.clone()))?;

    match resolve_format(global, &session.config, OutputFormat::Auto) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(item).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(item).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Id => {
            println!("{}", item.item_id);
        }
        _ => {
            println!("{}", style("─".repeat(60)).dim());
            println!("{}: {}", style("ID").bold(), style(&item.item_id).cyan());
            println!("{}: {}", style("Name").bold(), style(&item.item_name).yellow());
            println!("{}: {}", style("Category").bold(), item.category);
            println!("{}: {}", style("Location").bold(), item.location);
            println!(
                "{}: {} {}",
                style("Quantity").bold(),
                styled_quantity(item),
                item.unit
            );
            println!("{}: {}", style("Reorder level").bold(), item.reorder_level);
            if item.is_low_stock() {
                println!("{}", style("⚠ Low stock - reorder needed").yellow());
            }
            println!("{}: {}", style("Last updated").bold(), item.last_updated);
            println!("{}", style("─".repeat(60)).dim());

            let notes: Vec<&str> = item.remarks.notes().collect();
            if !notes.is_empty() {
                println!();
                println!("{}:", style("Remarks").bold());
                for note in notes {
                    println!("  {}", note.trim());
                }
            }

            if item.remarks.entries().next().is_some() {
                println!();
                println!("{}:", style("History").bold());
                for entry in item.remarks.entries() {
                    let movement = match entry.action {
                        Action::Issued => style(format!("-{}", entry.qty)).red(),
                        Action::Received => style(format!("+{}", entry.qty)).green(),
                    };
                    println!(
                        "  {}  {:>6}  {}",
                        style(&entry.timestamp).dim(),
                        movement,
                        entry.reason
                    );
                }
            }
        }
    }

    Ok(())
}
