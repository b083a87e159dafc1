//! Stock transactions - issuing and receiving quantities of one item

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};

use crate::core::identity::ItemId;
use crate::core::table::{InventoryTable, StockError};
use crate::entities::remarks::{Action, AuditEntry};

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Stock leaving the store
    Issue,
    /// Stock arriving
    Receive,
}

impl Direction {
    pub fn action(self) -> Action {
        match self {
            Direction::Issue => Action::Issued,
            Direction::Receive => Action::Received,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Issue => write!(f, "issue"),
            Direction::Receive => write!(f, "receive"),
        }
    }
}

/// A requested movement against one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub item_id: String,
    pub direction: Direction,
    pub qty: u32,
    pub reason: String,
}

impl Transaction {
    pub fn issue(item_id: impl Into<String>, qty: u32, reason: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            direction: Direction::Issue,
            qty,
            reason: reason.into(),
        }
    }

    pub fn receive(item_id: impl Into<String>, qty: u32, reason: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            direction: Direction::Receive,
            qty,
            reason: reason.into(),
        }
    }
}

/// Outcome of a posted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Posting {
    pub item_id: ItemId,
    pub previous_quantity: u32,
    pub new_quantity: u32,
    pub entry: AuditEntry,
}

/// Apply a transaction to the table.
///
/// On success the item's quantity and `last_updated` change and an audit
/// entry is appended to its remarks. On any error the item is untouched.
pub fn post(
    table: &mut InventoryTable,
    txn: &Transaction,
    now: NaiveDateTime,
) -> Result<Posting, StockError> {
    if txn.qty == 0 {
        return Err(StockError::Validation(
            "Transaction quantity must be at least 1.".to_string(),
        ));
    }

    let item = table.get_mut(&txn.item_id)?;
    let current = item.quantity;

    let new_quantity = match txn.direction {
        Direction::Issue => {
            if txn.qty > current {
                warn!(item_id = %item.item_id, requested = txn.qty, available = current, "rejected issue");
                return Err(StockError::InsufficientStock {
                    item_id: item.item_id.to_string(),
                    requested: txn.qty,
                    available: current,
                });
            }
            current - txn.qty
        }
        Direction::Receive => current.checked_add(txn.qty).ok_or_else(|| {
            StockError::Validation(format!(
                "Cannot receive {}; quantity would exceed {}.",
                txn.qty,
                u32::MAX
            ))
        })?,
    };

    let entry = AuditEntry::new(now, txn.direction.action(), txn.qty, txn.reason.as_str());

    item.quantity = new_quantity;
    item.touch(now);
    item.remarks.push(entry.clone());

    info!(
        item_id = %item.item_id,
        direction = %txn.direction,
        qty = txn.qty,
        new_quantity,
        "posted transaction"
    );

    Ok(Posting {
        item_id: item.item_id.clone(),
        previous_quantity: current,
        new_quantity,
        entry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::summary;
    use crate::entities::item::ItemFields;
    use chrono::NaiveDate;

    fn at(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(8, minute, 0)
            .unwrap()
    }

    fn table_with(quantity: u32, reorder_level: u32) -> InventoryTable {
        let mut table = InventoryTable::new();
        table
            .add_item(
                ItemFields::new("Stapler")
                    .with_quantity(quantity)
                    .with_reorder_level(reorder_level),
                at(0),
            )
            .unwrap();
        table
    }

    #[test]
    fn test_issue_reduces_quantity_and_logs() {
        let mut table = table_with(5, 10);
        assert_eq!(summary(&table).low_stock_count, 1);

        let posting = post(&mut table, &Transaction::issue("STN-0001", 3, "office"), at(1)).unwrap();
        assert_eq!(posting.previous_quantity, 5);
        assert_eq!(posting.new_quantity, 2);

        let item = table.get("STN-0001").unwrap();
        assert_eq!(item.quantity, 2);
        assert_eq!(item.last_updated, "2024-02-29 08:01:00");
        assert!(item.remarks.to_string().contains("Issued 3 (office)"));
        assert_eq!(summary(&table).low_stock_count, 1);
    }

    #[test]
    fn test_receive_increases_quantity() {
        let mut table = table_with(5, 10);
        let posting = post(&mut table, &Transaction::receive("STN-0001", 20, "PO-4"), at(2)).unwrap();
        assert_eq!(posting.new_quantity, 25);
        assert_eq!(
            table.get("STN-0001").unwrap().remarks.to_string(),
            "[2024-02-29 08:02:00] Received 20 (PO-4)"
        );
        assert_eq!(summary(&table).low_stock_count, 0);
    }

    #[test]
    fn test_issue_then_receive_restores_quantity() {
        let mut table = table_with(9, 1);
        post(&mut table, &Transaction::issue("STN-0001", 4, "a"), at(1)).unwrap();
        post(&mut table, &Transaction::receive("STN-0001", 4, "b"), at(2)).unwrap();

        let item = table.get("STN-0001").unwrap();
        assert_eq!(item.quantity, 9);
        assert_eq!(item.remarks.entries().count(), 2);
        assert_eq!(
            item.remarks.to_string(),
            "[2024-02-29 08:01:00] Issued 4 (a) | [2024-02-29 08:02:00] Received 4 (b)"
        );
    }

    #[test]
    fn test_issue_entire_stock() {
        let mut table = table_with(7, 0);
        let posting = post(&mut table, &Transaction::issue("STN-0001", 7, ""), at(1)).unwrap();
        assert_eq!(posting.new_quantity, 0);
    }

    #[test]
    fn test_over_issue_leaves_item_unchanged() {
        let mut table = table_with(2, 5);
        let before = table.get("STN-0001").unwrap().clone();

        let err = post(&mut table, &Transaction::issue("STN-0001", 3, "too many"), at(9)).unwrap_err();
        assert_eq!(
            err,
            StockError::InsufficientStock {
                item_id: "STN-0001".to_string(),
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(err.to_string(), "Cannot issue 3; only 2 available.");
        assert_eq!(table.get("STN-0001").unwrap(), &before);
    }

    #[test]
    fn test_unknown_item() {
        let mut table = table_with(2, 5);
        let err = post(&mut table, &Transaction::receive("STN-0002", 1, ""), at(1)).unwrap_err();
        assert_eq!(err, StockError::NotFound("STN-0002".to_string()));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut table = table_with(2, 5);
        let err = post(&mut table, &Transaction::receive("STN-0001", 0, ""), at(1)).unwrap_err();
        assert!(matches!(err, StockError::Validation(_)));
        assert!(table.get("STN-0001").unwrap().remarks.is_empty());
    }

    #[test]
    fn test_receive_overflow_rejected() {
        let mut table = table_with(u32::MAX - 1, 0);
        let err = post(&mut table, &Transaction::receive("STN-0001", 2, ""), at(1)).unwrap_err();
        assert!(matches!(err, StockError::Validation(_)));
        assert_eq!(table.get("STN-0001").unwrap().quantity, u32::MAX - 1);
    }
}
