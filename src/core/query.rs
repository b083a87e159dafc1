//! Filtering and summary figures over the inventory table

use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::table::InventoryTable;
use crate::entities::item::InventoryItem;

/// Row filter; empty sets impose no restriction and all parts are ANDed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub categories: Vec<String>,
    pub locations: Vec<String>,
    /// Keep only items with `quantity <= reorder_level`
    pub low_stock_only: bool,
}

impl ItemFilter {
    pub fn matches(&self, item: &InventoryItem) -> bool {
        (self.categories.is_empty() || self.categories.contains(&item.category))
            && (self.locations.is_empty() || self.locations.contains(&item.location))
            && (!self.low_stock_only || item.is_low_stock())
    }

    /// Matching rows in table order
    pub fn apply<'a>(&self, table: &'a InventoryTable) -> Vec<&'a InventoryItem> {
        table.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Stable sort by item name, as shown in listings
pub fn sort_by_name(items: &mut [&InventoryItem]) {
    items.sort_by(|a, b| a.item_name.cmp(&b.item_name));
}

/// Headline figures for the whole table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub distinct_items: usize,
    pub total_quantity: u64,
    pub low_stock_count: usize,
}

pub fn summary(table: &InventoryTable) -> Summary {
    Summary {
        distinct_items: table.len(),
        total_quantity: table.iter().map(|item| u64::from(item.quantity)).sum(),
        low_stock_count: table.iter().filter(|item| item.is_low_stock()).count(),
    }
}

/// Distinct non-empty categories, sorted
pub fn categories(table: &InventoryTable) -> Vec<String> {
    distinct(table.iter().map(|item| item.category.as_str()))
}

/// Distinct non-empty locations, sorted
pub fn locations(table: &InventoryTable) -> Vec<String> {
    distinct(table.iter().map(|item| item.location.as_str()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::item::ItemFields;
    use chrono::NaiveDate;

    fn table() -> InventoryTable {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let rows = [
            ("Gel Pen", "Pen", "Main Store", 50, 20),
            ("Ball Pen", "Pen", "Annex", 5, 20),
            ("A4 Paper", "Paper", "Main Store", 10, 10),
            ("File Folder", "File", "Annex", 30, 5),
            ("Sticky Notes", "", "", 0, 0),
        ];

        let mut table = InventoryTable::new();
        for (name, category, location, quantity, reorder) in rows {
            table
                .add_item(
                    ItemFields::new(name)
                        .with_category(category)
                        .with_location(location)
                        .with_quantity(quantity)
                        .with_reorder_level(reorder),
                    now,
                )
                .unwrap();
        }
        table
    }

    fn names(items: &[&InventoryItem]) -> Vec<String> {
        items.iter().map(|i| i.item_name.clone()).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let table = table();
        let rows = ItemFilter::default().apply(&table);
        assert_eq!(rows.len(), table.len());
        assert_eq!(rows[0].item_name, "Gel Pen");
        assert_eq!(rows[4].item_name, "Sticky Notes");
    }

    #[test]
    fn test_category_filter() {
        let table = table();
        let filter = ItemFilter {
            categories: vec!["Pen".to_string()],
            ..Default::default()
        };
        let rows = filter.apply(&table);
        assert_eq!(names(&rows), vec!["Gel Pen", "Ball Pen"]);
        assert!(rows.iter().all(|i| i.category == "Pen"));
    }

    #[test]
    fn test_low_stock_filter_is_exact() {
        let table = table();
        let filter = ItemFilter {
            low_stock_only: true,
            ..Default::default()
        };
        let rows = filter.apply(&table);
        let expected: Vec<&InventoryItem> = table
            .iter()
            .filter(|i| i.quantity <= i.reorder_level)
            .collect();
        assert_eq!(rows, expected);
        assert_eq!(names(&rows), vec!["Ball Pen", "A4 Paper", "Sticky Notes"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let table = table();
        let filter = ItemFilter {
            categories: vec!["Pen".to_string(), "Paper".to_string()],
            locations: vec!["Main Store".to_string()],
            low_stock_only: true,
        };
        assert_eq!(names(&filter.apply(&table)), vec!["A4 Paper"]);
    }

    #[test]
    fn test_blank_fields_match_their_defaults() {
        let table = table();
        let filter = ItemFilter {
            categories: vec!["Uncategorized".to_string()],
            ..Default::default()
        };
        assert_eq!(names(&filter.apply(&table)), vec!["Sticky Notes"]);
    }

    #[test]
    fn test_sort_by_name() {
        let table = table();
        let mut rows = ItemFilter::default().apply(&table);
        sort_by_name(&mut rows);
        assert_eq!(
            names(&rows),
            vec!["A4 Paper", "Ball Pen", "File Folder", "Gel Pen", "Sticky Notes"]
        );
    }

    #[test]
    fn test_summary() {
        let s = summary(&table());
        assert_eq!(
            s,
            Summary {
                distinct_items: 5,
                total_quantity: 95,
                low_stock_count: 3,
            }
        );
    }

    #[test]
    fn test_summary_of_empty_table() {
        assert_eq!(summary(&InventoryTable::new()), Summary::default());
    }

    #[test]
    fn test_facets_are_distinct_and_sorted() {
        let table = table();
        assert_eq!(categories(&table), vec!["File", "Paper", "Pen", "Uncategorized"]);
        assert_eq!(locations(&table), vec!["Annex", "Main Store", "Not specified"]);
    }
}
