//! Core module - the inventory table, its storage and operations

pub mod config;
pub mod export;
pub mod identity;
pub mod query;
pub mod store;
pub mod table;
pub mod transaction;

pub use config::Config;
pub use identity::ItemId;
pub use query::{ItemFilter, Summary};
pub use store::{CsvStore, MemoryStore, RecordStore, Revision, StoreError};
pub use table::{InventoryTable, StockError};
pub use transaction::{Direction, Posting, Transaction};
