//! Inventory item - one row of the stock table

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::core::identity::ItemId;
use crate::entities::remarks::Remarks;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_UNIT: &str = "Nos";
pub const DEFAULT_LOCATION: &str = "Not specified";

/// Format used for `last_updated` and audit entry timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp the way it is stored in the inventory file
pub fn format_timestamp(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// A stationery item and its on-hand stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryItem {
    pub item_id: ItemId,
    pub item_name: String,
    pub category: String,
    pub unit: String,
    pub quantity: u32,
    /// Stock at or below this level counts as low
    pub reorder_level: u32,
    pub location: String,
    pub last_updated: String,
    pub remarks: Remarks,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    /// Refresh `last_updated`
    pub fn touch(&mut self, now: NaiveDateTime) {
        self.last_updated = format_timestamp(now);
    }
}

/// Caller-supplied values for creating or overwriting an item
///
/// Text fields are trimmed when applied; blank category, unit and location
/// fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFields {
    pub item_name: String,
    pub category: String,
    pub unit: String,
    pub location: String,
    pub quantity: u32,
    pub reorder_level: u32,
    pub remarks: String,
}

impl ItemFields {
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            ..Default::default()
        }
    }

    /// Pre-fill every field from an existing item
    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            item_name: item.item_name.clone(),
            category: item.category.clone(),
            unit: item.unit.clone(),
            location: item.location.clone(),
            quantity: item.quantity,
            reorder_level: item.reorder_level,
            remarks: item.remarks.to_string(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_reorder_level(mut self, reorder_level: u32) -> Self {
        self.reorder_level = reorder_level;
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = remarks.into();
        self
    }

    /// Trimmed item name, or `None` when it is blank
    pub fn name(&self) -> Option<&str> {
        let name = self.item_name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Build a new row under the given id
    pub(crate) fn into_item(self, item_id: ItemId, now: NaiveDateTime) -> InventoryItem {
        let mut item = InventoryItem {
            item_id,
            item_name: String::new(),
            category: String::new(),
            unit: String::new(),
            quantity: 0,
            reorder_level: 0,
            location: String::new(),
            last_updated: String::new(),
            remarks: Remarks::default(),
        };
        self.apply_to(&mut item, now);
        item
    }

    /// Overwrite every mutable field of `item`
    pub(crate) fn apply_to(self, item: &mut InventoryItem, now: NaiveDateTime) {
        item.item_name = self.item_name.trim().to_string();
        item.category = or_default(&self.category, DEFAULT_CATEGORY);
        item.unit = or_default(&self.unit, DEFAULT_UNIT);
        item.location = or_default(&self.location, DEFAULT_LOCATION);
        item.quantity = self.quantity;
        item.reorder_level = self.reorder_level;
        item.remarks = Remarks::parse(self.remarks.trim());
        item.touch(now);
    }
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
