//! The in-memory inventory table and single-item CRUD operations

use chrono::NaiveDateTime;
use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::identity::{self, ItemId};
use crate::core::store::Revision;
use crate::entities::item::{InventoryItem, ItemFields};

/// Ordered collection of items keyed by `item_id`
#[derive(Debug, Clone, Default)]
pub struct InventoryTable {
    items: Vec<InventoryItem>,
    /// Revision of the backing file this table was loaded from
    revision: Option<Revision>,
}

impl InventoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<InventoryItem>) -> Self {
        Self {
            items,
            revision: None,
        }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn revision(&self) -> Option<&Revision> {
        self.revision.as_ref()
    }

    pub(crate) fn set_revision(&mut self, revision: Revision) {
        self.revision = Some(revision);
    }

    /// Drop the loaded revision so the next save overwrites unconditionally
    pub fn forget_revision(&mut self) {
        self.revision = None;
    }

    pub fn get(&self, item_id: &str) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.item_id == *item_id)
    }

    /// Mutable lookup by ID
    pub fn get_mut(&mut self, item_id: &str) -> Result<&mut InventoryItem, StockError> {
        self.items
            .iter_mut()
            .find(|item| item.item_id == *item_id)
            .ok_or_else(|| StockError::NotFound(item_id.to_string()))
    }

    /// The ID the next added item will receive
    pub fn next_id(&self) -> ItemId {
        identity::next_id(self.items.iter().map(|item| &item.item_id))
    }

    /// Add a new item, returning its generated ID
    pub fn add_item(&mut self, fields: ItemFields, now: NaiveDateTime) -> Result<ItemId, StockError> {
        if fields.name().is_none() {
            return Err(StockError::missing_name());
        }

        let item_id = self.next_id();
        let item = fields.into_item(item_id.clone(), now);
        info!(item_id = %item_id, name = %item.item_name, quantity = item.quantity, "added item");
        self.items.push(item);

        Ok(item_id)
    }

    /// Overwrite all mutable fields of an existing item
    pub fn update_item(
        &mut self,
        item_id: &str,
        fields: ItemFields,
        now: NaiveDateTime,
    ) -> Result<&InventoryItem, StockError> {
        if fields.name().is_none() {
            return Err(StockError::missing_name());
        }

        let item = self.get_mut(item_id)?;
        fields.apply_to(item, now);
        info!(item_id = %item.item_id, "updated item");

        Ok(item)
    }

    /// Remove the item with the given ID.
    ///
    /// Unknown IDs are a no-op; returns whether a row was removed.
    pub fn delete_item(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.item_id != *item_id);

        let removed = self.items.len() != before;
        if removed {
            info!(item_id, "deleted item");
        } else {
            debug!(item_id, "delete requested for unknown item");
        }
        removed
    }
}

impl<'a> IntoIterator for &'a InventoryTable {
    type Item = &'a InventoryItem;
    type IntoIter = std::slice::Iter<'a, InventoryItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Errors raised by inventory operations
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum StockError {
    #[error("{0}")]
    #[diagnostic(code(stn::validation))]
    Validation(String),

    #[error("no item with ID '{0}'")]
    #[diagnostic(
        code(stn::not_found),
        help("run `stn list` to see the available item IDs")
    )]
    NotFound(String),

    #[error("Cannot issue {requested}; only {available} available.")]
    #[diagnostic(code(stn::insufficient_stock))]
    InsufficientStock {
        item_id: String,
        requested: u32,
        available: u32,
    },
}

impl StockError {
    fn missing_name() -> Self {
        StockError::Validation("Item name is required.".to_string())
    }
}
