//! `stn init` command - Create the inventory file

use console::style;
use miette::Result;

use crate::cli::commands::utils::Session;
use crate::cli::GlobalOpts;
use crate::core::store::RecordStore;

pub fn run(global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let path = session.store.path();

    if session.store.exists() {
        println!(
            "{} Inventory file already exists at {}",
            style("!").yellow(),
            style(path.display()).cyan()
        );
        return Ok(());
    }

    session.store.initialize()?;

    if !global.quiet {
        println!(
            "{} Created inventory file {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
        println!();
        println!("Next steps:");
        println!(
            "  {} Add your first item",
            style("stn add --name \"A4 Paper\"").yellow()
        );
        println!("  {} List all items", style("stn list").yellow());
    }

    Ok(())
}
