//! Entity types stored in the inventory file

pub mod item;
pub mod remarks;

pub use item::{InventoryItem, ItemFields};
pub use remarks::{Action, AuditEntry, Remarks, Segment};
