//! Timestamped backup copies of the inventory

use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::store::{encode_items, StoreError};
use crate::core::table::InventoryTable;

/// File name stem shared by all backups
pub const EXPORT_STEM: &str = "stationery_inventory_backup";

/// `stationery_inventory_backup_YYYYMMDD_HHMMSS.csv`
pub fn export_file_name(now: NaiveDateTime) -> String {
    format!("{}_{}.csv", EXPORT_STEM, now.format("%Y%m%d_%H%M%S"))
}

/// The table in inventory file format
pub fn export_bytes(table: &InventoryTable) -> Result<Vec<u8>, StoreError> {
    encode_items(table.items()).map_err(|source| StoreError::Csv {
        location: "<export>".to_string(),
        source,
    })
}

/// Write a backup of `table` into `dir`, returning the file written.
///
/// The live inventory file is not touched.
pub fn export_to_dir(
    table: &InventoryTable,
    dir: &Path,
    now: NaiveDateTime,
) -> Result<PathBuf, StoreError> {
    let io_error = |source| StoreError::Io {
        location: dir.display().to_string(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_error)?;
    let path = dir.join(export_file_name(now));
    fs::write(&path, export_bytes(table)?).map_err(io_error)?;
    info!(path = %path.display(), rows = table.len(), "exported inventory");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::{CsvStore, RecordStore};
    use crate::entities::item::ItemFields;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 3)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(now()),
            "stationery_inventory_backup_20251103_140509.csv"
        );
    }

    #[test]
    fn test_export_matches_store_format_and_leaves_source_alone() {
        let tmp = tempdir().unwrap();
        let store = CsvStore::new(tmp.path().join("stock.csv"));
        let mut table = store.load().unwrap();
        table.add_item(ItemFields::new("Binder Clip").with_quantity(6), now()).unwrap();
        store.save(&mut table).unwrap();
        let source_before = fs::read(store.path()).unwrap();

        let path = export_to_dir(&table, &tmp.path().join("backups"), now()).unwrap();

        assert!(path.ends_with("stationery_inventory_backup_20251103_140509.csv"));
        assert_eq!(fs::read(&path).unwrap(), source_before);
        assert_eq!(fs::read(store.path()).unwrap(), source_before);
    }
}
