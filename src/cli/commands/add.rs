//! `stn add` command - Add a new item

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::{now, Session};
use crate::cli::helpers::resolve_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::item::ItemFields;

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Item name (required unless --interactive)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Category, e.g. Paper, Pen, File
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Unit of measure, e.g. Nos, Pack, Box
    #[arg(long, short = 'u')]
    pub unit: Option<String>,

    /// Storage location, e.g. Main Store
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Opening quantity
    #[arg(long, short = 'Q', default_value_t = 0)]
    pub quantity: u32,

    /// Reorder level (default: from config, else 10)
    #[arg(long, short = 'r')]
    pub reorder_level: Option<u32>,

    /// Free-text remarks
    #[arg(long)]
    pub remarks: Option<String>,

    /// Interactive mode (prompt for fields)
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Save even if the inventory file changed since it was read
    #[arg(long)]
    pub force: bool,
}

impl AddArgs {
    fn fields(&self, config: &Config) -> ItemFields {
        ItemFields::new(self.name.clone().unwrap_or_default())
            .with_category(self.category.clone().unwrap_or_default())
            .with_unit(self.unit.clone().unwrap_or_else(|| config.default_unit()))
            .with_location(self.location.clone().unwrap_or_default())
            .with_quantity(self.quantity)
            .with_reorder_level(
                self.reorder_level
                    .unwrap_or_else(|| config.default_reorder_level()),
            )
            .with_remarks(self.remarks.clone().unwrap_or_default())
    }
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);

    let fields = if args.interactive {
        prompt_fields(args.fields(&session.config))?
    } else {
        args.fields(&session.config)
    };

    let mut table = session.load()?;
    let name = fields.name().unwrap_or_default().to_string();
    let id = table.add_item(fields, now())?;
    session.commit(&mut table, args.force)?;

    match resolve_format(global, &session.config, OutputFormat::Auto) {
        OutputFormat::Id => println!("{}", id),
        _ if global.quiet => {}
        _ => {
            println!(
                "{} Item added with ID {}.",
                style("✓").green(),
                style(&id).cyan()
            );
            println!("   {}", style(name).white());
        }
    }

    Ok(())
}

/// Prompt for each field, offering the given values as defaults
fn prompt_fields(defaults: ItemFields) -> Result<ItemFields> {
    let theme = ColorfulTheme::default();

    let item_name: String = Input::with_theme(&theme)
        .with_prompt("Item name")
        .with_initial_text(defaults.item_name.clone())
        .validate_with(|input: &String| -> std::result::Result<(), &'static str> {
            if input.trim().is_empty() {
                Err("Item name is required.")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .into_diagnostic()?;

    let category: String = Input::with_theme(&theme)
        .with_prompt("Category")
        .with_initial_text(defaults.category.clone())
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    let unit: String = Input::with_theme(&theme)
        .with_prompt("Unit of measure")
        .default(defaults.unit.clone())
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    let location: String = Input::with_theme(&theme)
        .with_prompt("Location")
        .with_initial_text(defaults.location.clone())
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    let quantity: u32 = Input::with_theme(&theme)
        .with_prompt("Quantity")
        .default(defaults.quantity)
        .interact_text()
        .into_diagnostic()?;

    let reorder_level: u32 = Input::with_theme(&theme)
        .with_prompt("Reorder level")
        .default(defaults.reorder_level)
        .interact_text()
        .into_diagnostic()?;

    let remarks: String = Input::with_theme(&theme)
        .with_prompt("Remarks")
        .with_initial_text(defaults.remarks.clone())
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    Ok(ItemFields {
        item_name,
        category,
        unit,
        location,
        quantity,
        reorder_level,
        remarks,
    })
}
