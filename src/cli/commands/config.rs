//! `stn config` command - Show the effective configuration
//!
//! Values are merged from the global config file, `./.stn.yaml`, the
//! `STN_DATA_FILE`/`STN_EXPORT_DIR` environment variables and `--file`.

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::commands::utils::Session;
use crate::cli::helpers::resolve_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::LOCAL_CONFIG_FILE;
use crate::core::Config;

/// Resolved values, defaults filled in
#[derive(Debug, Serialize)]
struct Effective {
    data_file: PathBuf,
    export_dir: PathBuf,
    default_reorder_level: u32,
    default_unit: String,
    default_format: Option<String>,
}

impl Effective {
    fn of(config: &Config) -> Self {
        Self {
            data_file: config.data_file(),
            export_dir: config.export_dir(),
            default_reorder_level: config.default_reorder_level(),
            default_unit: config.default_unit(),
            default_format: config.default_format.clone(),
        }
    }
}

pub fn run(global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let effective = Effective::of(&session.config);

    match resolve_format(global, &session.config, OutputFormat::Yaml) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&effective).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&effective).into_diagnostic()?;
            print!("{}", yaml);
        }
        _ => {
            println!("{:<24} {}", style("data_file").bold(), effective.data_file.display());
            println!("{:<24} {}", style("export_dir").bold(), effective.export_dir.display());
            println!(
                "{:<24} {}",
                style("default_reorder_level").bold(),
                effective.default_reorder_level
            );
            println!("{:<24} {}", style("default_unit").bold(), effective.default_unit);
            println!(
                "{:<24} {}",
                style("default_format").bold(),
                effective.default_format.as_deref().unwrap_or("auto")
            );
        }
    }

    if !global.quiet {
        eprintln!();
        match Config::global_config_path() {
            Some(path) => eprintln!("{} {}", style("Global config:").dim(), path.display()),
            None => eprintln!("{} (none)", style("Global config:").dim()),
        }
        eprintln!("{} {}", style("Local config: ").dim(), LOCAL_CONFIG_FILE);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_fills_defaults() {
        let effective = Effective::of(&Config::default());
        assert_eq!(effective.data_file, PathBuf::from("stationery_inventory.csv"));
        assert_eq!(effective.export_dir, PathBuf::from("."));
        assert_eq!(effective.default_reorder_level, 10);
        assert_eq!(effective.default_unit, "Nos");
        assert!(effective.default_format.is_none());
    }
}
