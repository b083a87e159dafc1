//! `stn summary` command - Inventory dashboard figures

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::Session;
use crate::cli::helpers::resolve_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::query::{summary, Summary};

pub fn run(global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let table = session.load()?;
    let figures = summary(&table);

    match resolve_format(global, &session.config, OutputFormat::Auto) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&figures).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&figures).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Md => {
            println!("{}", markdown(&figures));
        }
        OutputFormat::Tsv | OutputFormat::Csv | OutputFormat::Id => {
            println!("distinct_items\t{}", figures.distinct_items);
            println!("total_quantity\t{}", figures.total_quantity);
            println!("low_stock_count\t{}", figures.low_stock_count);
        }
        OutputFormat::Auto => {
            println!("{}", style("Stationery Inventory").bold());
            println!("{}", style("─".repeat(40)).dim());
            println!(
                "{:<20} {}",
                style("Distinct items").bold(),
                style(figures.distinct_items).cyan()
            );
            println!(
                "{:<20} {}",
                style("Total quantity").bold(),
                style(figures.total_quantity).cyan()
            );
            let low = if figures.low_stock_count > 0 {
                style(figures.low_stock_count).yellow()
            } else {
                style(figures.low_stock_count).green()
            };
            println!("{:<20} {}", style("Low-stock items").bold(), low);

            if figures.low_stock_count > 0 && !global.quiet {
                println!();
                println!(
                    "Run {} to see what needs reordering.",
                    style("stn list --low-stock").yellow()
                );
            }
        }
    }

    Ok(())
}

fn markdown(figures: &Summary) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    for (metric, value) in [
        ("Distinct items", figures.distinct_items as u64),
        ("Total quantity", figures.total_quantity),
        ("Low-stock items", figures.low_stock_count as u64),
    ] {
        builder.push_record([metric.to_string(), value.to_string()]);
    }
    builder.build().with(Style::markdown()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_summary() {
        let md = markdown(&Summary {
            distinct_items: 4,
            total_quantity: 120,
            low_stock_count: 1,
        });
        assert!(md.contains("Distinct items"));
        assert!(md.contains("120"));
        assert!(md.contains("Low-stock items"));
    }
}
