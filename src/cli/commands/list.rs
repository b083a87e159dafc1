//! `stn list` command - Current inventory with filtering

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::utils::Session;
use crate::cli::helpers::{low_stock_flag, resolve_format, styled_quantity, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::query::{sort_by_name, ItemFilter};
use crate::core::store::write_items;
use crate::entities::item::InventoryItem;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only items in this category (repeatable)
    #[arg(long, short = 'c')]
    pub category: Vec<String>,

    /// Only items at this location (repeatable)
    #[arg(long, short = 'l')]
    pub location: Vec<String>,

    /// Only items at or below their reorder level
    #[arg(long)]
    pub low_stock: bool,

    /// Limit number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only count
    #[arg(long)]
    pub count: bool,
}

impl ListArgs {
    fn filter(&self) -> ItemFilter {
        ItemFilter {
            categories: self.category.clone(),
            locations: self.location.clone(),
            low_stock_only: self.low_stock,
        }
    }
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let table = session.load()?;
    let format = resolve_format(global, &session.config, OutputFormat::Tsv);

    let mut items = args.filter().apply(&table);
    sort_by_name(&mut items);

    if let Some(limit) = args.limit {
        items.truncate(limit);
    }

    if args.count {
        println!("{}", items.len());
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&items).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&items).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::WriterBuilder::new()
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(std::io::stdout());
            write_items(&mut wtr, items.iter().copied()).into_diagnostic()?;
        }
        OutputFormat::Id => {
            for item in &items {
                println!("{}", item.item_id);
            }
        }
        OutputFormat::Md => {
            print!("{}", markdown_table(&items));
        }
        OutputFormat::Tsv | OutputFormat::Auto => {
            if items.is_empty() {
                if table.is_empty() {
                    println!("No items in inventory. Add items first with {}.", style("stn add").yellow());
                } else {
                    println!("No items match current filters.");
                }
                return Ok(());
            }
            print_tsv(&items, global.quiet);
        }
    }

    Ok(())
}

fn print_tsv(items: &[&InventoryItem], quiet: bool) {
    let columns = [
        ("ID", 10),
        ("NAME", 28),
        ("CATEGORY", 16),
        ("LOCATION", 16),
        ("QTY", 7),
        ("UNIT", 6),
        ("REORDER", 8),
    ];

    for (header, width) in columns {
        print!("{:<width$} ", style(header).bold(), width = width);
    }
    println!("{}", style("LOW").bold());
    println!(
        "{}",
        "-".repeat(columns.iter().map(|(_, w)| w + 1).sum::<usize>() + 3)
    );

    for item in items {
        print!("{:<10} ", style(item.item_id.as_str()).cyan());
        print!("{:<28} ", truncate_str(&item.item_name, 26));
        print!("{:<16} ", truncate_str(&item.category, 14));
        print!("{:<16} ", truncate_str(&item.location, 14));
        print!("{:<7} ", styled_quantity(item));
        print!("{:<6} ", truncate_str(&item.unit, 6));
        print!("{:<8} ", item.reorder_level);
        println!("{}", style(low_stock_flag(item)).yellow());
    }

    if !quiet {
        println!();
        println!("{} item(s) found.", style(items.len()).cyan());
    }
}

fn markdown_table(items: &[&InventoryItem]) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "ID", "Name", "Category", "Location", "Qty", "Unit", "Reorder", "Low",
    ]);
    for item in items {
        builder.push_record([
            item.item_id.to_string(),
            item.item_name.clone(),
            item.category.clone(),
            item.location.clone(),
            item.quantity.to_string(),
            item.unit.clone(),
            item.reorder_level.to_string(),
            low_stock_flag(item).to_string(),
        ]);
    }
    format!("{}\n", builder.build().with(Style::markdown()))
}
