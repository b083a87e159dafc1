//! `stn issue` / `stn receive` commands - Record a stock movement

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::{now, Session};
use crate::cli::helpers::resolve_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::transaction::{post, Direction, Posting, Transaction};

#[derive(clap::Args, Debug)]
pub struct TxnArgs {
    /// Item ID (e.g. STN-0001)
    pub id: String,

    /// Quantity to move (at least 1)
    pub qty: u32,

    /// Reason or reference, recorded in the item's history
    #[arg(long, short = 'r', default_value = "")]
    pub reason: String,

    /// Save even if the inventory file changed since it was read
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: TxnArgs, direction: Direction, global: &GlobalOpts) -> Result<()> {
    let session = Session::open(global);
    let mut table = session.load()?;

    let txn = Transaction {
        item_id: args.id.clone(),
        direction,
        qty: args.qty,
        reason: args.reason.trim().to_string(),
    };
    let posting = post(&mut table, &txn, now())?;
    session.commit(&mut table, args.force)?;

    let Some(item) = table.get(posting.item_id.as_str()) else {
        return Ok(());
    };

    match resolve_format(global, &session.config, OutputFormat::Auto) {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&posting).into_diagnostic()?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&posting).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Id => println!("{}", posting.item_id),
        _ if global.quiet => {}
        _ => {
            println!(
                "{} {}. New quantity: {}.",
                style("✓").green(),
                movement_message(&posting),
                style(posting.new_quantity).cyan()
            );
            println!(
                "   {} | current: {} {} | reorder level: {}",
                style(&item.item_name).white(),
                posting.new_quantity,
                item.unit,
                item.reorder_level
            );
            if item.is_low_stock() {
                println!("{}", style("⚠ Low stock - reorder needed").yellow());
            }
        }
    }

    Ok(())
}

fn movement_message(posting: &Posting) -> String {
    format!("{} {} units", posting.entry.action, posting.entry.qty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::InventoryTable;
    use crate::entities::item::ItemFields;
    use chrono::NaiveDate;

    #[test]
    fn test_movement_message() {
        let at = NaiveDate::from_ymd_opt(2024, 2, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let mut table = InventoryTable::new();
        table
            .add_item(ItemFields::new("Marker").with_quantity(5), at)
            .unwrap();

        let issued = post(&mut table, &Transaction::issue("STN-0001", 3, ""), at).unwrap();
        assert_eq!(movement_message(&issued), "Issued 3 units");

        let received = post(&mut table, &Transaction::receive("STN-0001", 7, ""), at).unwrap();
        assert_eq!(movement_message(&received), "Received 7 units");
    }
}
