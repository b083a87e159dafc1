//! `stn export` command - Timestamped backup of the inventory

use console::style;
use miette::{IntoDiagnostic, Result};
use std::io::Write;
use std::path::PathBuf;

use crate::cli::commands::utils::{now, Session};
use crate::cli::helpers::resolve_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::export::{export_bytes, export_to_dir};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Directory to write the backup into (default: from config, else .)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Write the CSV to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let table = session.load()?;

    if args.stdout {
        let bytes = export_bytes(&table)?;
        std::io::stdout().write_all(&bytes).into_diagnostic()?;
        return Ok(());
    }

    let dir = args.output.unwrap_or_else(|| session.config.export_dir());
    let path = export_to_dir(&table, &dir, now())?;

    match resolve_format(global, &session.config, OutputFormat::Auto) {
        OutputFormat::Id => println!("{}", path.display()),
        _ if global.quiet => {}
        _ => {
            println!(
                "{} Exported {} item(s) to {}",
                style("✓").green(),
                style(table.len()).cyan(),
                style(path.display()).cyan()
            );
        }
    }

    Ok(())
}
