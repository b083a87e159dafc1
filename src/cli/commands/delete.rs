//! `stn delete` command - Remove an item permanently

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::Session;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Item ID (e.g. STN-0001)
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Save even if the inventory file changed since it was read
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let mut table = session.load()?;

    let Some(item) = table.get(&args.id) else {
        if !global.quiet {
            println!(
                "{} No item with ID {}; nothing deleted.",
                style("!").yellow(),
                style(&args.id).cyan()
            );
        }
        return Ok(());
    };
    let name = item.item_name.clone();

    if !args.yes {
        eprintln!(
            "{} Deleting items is permanent. Export data first if needed.",
            style("⚠").yellow()
        );
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete {} ({})?", args.id, name))
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    table.delete_item(&args.id);
    session.commit(&mut table, args.force)?;

    if !global.quiet {
        println!(
            "{} Item {} deleted successfully.",
            style("✓").green(),
            style(&args.id).cyan()
        );
    }

    Ok(())
}
