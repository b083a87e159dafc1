//! `stn update` command - Overwrite an existing item

use console::style;
use miette::Result;

use crate::cli::commands::utils::{now, Session};
use crate::cli::helpers::resolve_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::table::StockError;
use crate::entities::item::ItemFields;

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Item ID (e.g. STN-0001)
    pub id: String,

    /// New item name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New category
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// New unit of measure
    #[arg(long, short = 'u')]
    pub unit: Option<String>,

    /// New storage location
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Set quantity directly (use issue/receive to record a movement)
    #[arg(long, short = 'Q')]
    pub quantity: Option<u32>,

    /// New reorder level
    #[arg(long, short = 'r')]
    pub reorder_level: Option<u32>,

    /// Replace the remarks text, audit history included
    #[arg(long)]
    pub remarks: Option<String>,

    /// Save even if the inventory file changed since it was read
    #[arg(long)]
    pub force: bool,
}

impl UpdateArgs {
    /// Current values with the given overrides applied
    fn merge_into(&self, mut fields: ItemFields) -> ItemFields {
        if let Some(name) = &self.name {
            fields.item_name = name.clone();
        }
        if let Some(category) = &self.category {
            fields.category = category.clone();
        }
        if let Some(unit) = &self.unit {
            fields.unit = unit.clone();
        }
        if let Some(location) = &self.location {
            fields.location = location.clone();
        }
        if let Some(quantity) = self.quantity {
            fields.quantity = quantity;
        }
        if let Some(reorder_level) = self.reorder_level {
            fields.reorder_level = reorder_level;
        }
        if let Some(remarks) = &self.remarks {
            fields.remarks = remarks.clone();
        }
        fields
    }
}

pub fn run(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let mut table = session.load()?;

    let current = table
        .get(&args.id)
        .ok_or_else(|| StockError::NotFound(args.id.clone()))?;
    let fields = args.merge_into(ItemFields::from_item(current));

    let item = table.update_item(&args.id, fields, now())?;
    let id = item.item_id.clone();
    let name = item.item_name.clone();
    session.commit(&mut table, args.force)?;

    match resolve_format(global, &session.config, OutputFormat::Auto) {
        OutputFormat::Id => println!("{}", id),
        _ if global.quiet => {}
        _ => {
            println!(
                "{} Item {} updated successfully.",
                style("✓").green(),
                style(&id).cyan()
            );
            println!("   {}", style(name).white());
        }
    }

    Ok(())
}
