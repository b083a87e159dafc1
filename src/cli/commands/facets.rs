//! `stn facets` command - Categories and locations in use

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::commands::utils::Session;
use crate::cli::helpers::resolve_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::query::{categories, locations};

#[derive(Debug, Serialize)]
struct Facets {
    categories: Vec<String>,
    locations: Vec<String>,
}

pub fn run(global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let table = session.load()?;
    let facets = Facets {
        categories: categories(&table),
        locations: locations(&table),
    };

    match resolve_format(global, &session.config, OutputFormat::Auto) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&facets).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&facets).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Tsv | OutputFormat::Csv | OutputFormat::Id => {
            for category in &facets.categories {
                println!("category\t{}", category);
            }
            for location in &facets.locations {
                println!("location\t{}", location);
            }
        }
        OutputFormat::Auto | OutputFormat::Md => {
            print_group("Categories", &facets.categories);
            println!();
            print_group("Locations", &facets.locations);
        }
    }

    Ok(())
}

fn print_group(title: &str, values: &[String]) {
    println!("{}", style(title).bold());
    if values.is_empty() {
        println!("  {}", style("(none)").dim());
    }
    for value in values {
        println!("  {}", value);
    }
}
