//! Record store - full-table load/save of the inventory CSV file
//!
//! The whole table is read at the start of a command and written back in
//! full afterwards. Each load records a [`Revision`] (SHA-256 of the bytes
//! read); `save` refuses to overwrite a file whose content changed since,
//! unless the table's revision was dropped with
//! [`InventoryTable::forget_revision`].

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use miette::Diagnostic;
use sha2::{Digest, Sha256};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::identity::ItemId;
use crate::core::table::InventoryTable;
use crate::entities::item::InventoryItem;
use crate::entities::remarks::Remarks;

/// Default name of the inventory file
pub const DEFAULT_DATA_FILE: &str = "stationery_inventory.csv";

/// Column schema of the inventory file, in order
pub const COLUMNS: [&str; 9] = [
    "item_id",
    "item_name",
    "category",
    "unit",
    "quantity",
    "reorder_level",
    "location",
    "last_updated",
    "remarks",
];

/// Content fingerprint of the backing file at load time
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision(String);

impl Revision {
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short form is enough to tell revisions apart in logs
        f.write_str(&self.0[..self.0.len().min(12)])
    }
}

/// Persistence boundary for the inventory table
pub trait RecordStore {
    /// Create the backing storage with the column header if it is absent
    fn initialize(&self) -> Result<(), StoreError>;

    /// Read every row, coercing malformed counts to 0
    fn load(&self) -> Result<InventoryTable, StoreError>;

    /// Replace the stored content with `table`.
    ///
    /// Fails with [`StoreError::Conflict`] when the table carries a revision
    /// that no longer matches the stored content. On success the table's
    /// revision is updated to the written content.
    fn save(&self, table: &mut InventoryTable) -> Result<(), StoreError>;
}

/// Errors raised by record stores
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("cannot access inventory file {location}: {source}")]
    #[diagnostic(code(stn::store::io))]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed inventory file {location}: {source}")]
    #[diagnostic(
        code(stn::store::csv),
        help("the file must be CSV with a header row naming the inventory columns")
    )]
    Csv {
        location: String,
        #[source]
        source: csv::Error,
    },

    #[error("inventory file {location} was changed by someone else since it was loaded")]
    #[diagnostic(
        code(stn::store::conflict),
        help("re-run the command to apply it to the latest data, or pass --force to overwrite")
    )]
    Conflict { location: String },
}

/// Inventory stored in a CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            location: self.location(),
            source,
        }
    }

    fn read_bytes(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

impl RecordStore for CsvStore {
    fn initialize(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let bytes = encode_header().map_err(|source| StoreError::Csv {
            location: self.location(),
            source,
        })?;
        fs::write(&self.path, bytes).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), "created inventory file");

        Ok(())
    }

    fn load(&self) -> Result<InventoryTable, StoreError> {
        self.initialize()?;
        let bytes = self.read_bytes()?.unwrap_or_default();
        decode_table(&bytes, &self.location())
    }

    fn save(&self, table: &mut InventoryTable) -> Result<(), StoreError> {
        if let Some(expected) = table.revision() {
            let current = self.read_bytes()?.map(|bytes| Revision::of(&bytes));
            if current.as_ref() != Some(expected) {
                warn!(path = %self.path.display(), loaded = %expected, "refusing to overwrite changed file");
                return Err(StoreError::Conflict {
                    location: self.location(),
                });
            }
        }

        let bytes = encode_items(table.items()).map_err(|source| StoreError::Csv {
            location: self.location(),
            source,
        })?;
        fs::write(&self.path, &bytes).map_err(|e| self.io_error(e))?;

        let revision = Revision::of(&bytes);
        debug!(path = %self.path.display(), rows = table.len(), revision = %revision, "saved inventory");
        table.set_revision(revision);

        Ok(())
    }
}

/// Inventory held in memory, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: RefCell<Option<Vec<u8>>>,
}

const MEMORY_LOCATION: &str = "<memory>";

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing CSV text
    pub fn with_contents(text: &str) -> Self {
        Self {
            contents: RefCell::new(Some(text.as_bytes().to_vec())),
        }
    }

    /// Current stored text, if initialized
    pub fn contents(&self) -> Option<String> {
        self.contents
            .borrow()
            .as_ref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Replace the stored text behind the back of any loaded table
    pub fn replace_contents(&self, text: &str) {
        *self.contents.borrow_mut() = Some(text.as_bytes().to_vec());
    }
}

impl RecordStore for MemoryStore {
    fn initialize(&self) -> Result<(), StoreError> {
        let mut contents = self.contents.borrow_mut();
        if contents.is_none() {
            let bytes = encode_header().map_err(|source| StoreError::Csv {
                location: MEMORY_LOCATION.to_string(),
                source,
            })?;
            *contents = Some(bytes);
        }
        Ok(())
    }

    fn load(&self) -> Result<InventoryTable, StoreError> {
        self.initialize()?;
        let contents = self.contents.borrow();
        decode_table(contents.as_deref().unwrap_or_default(), MEMORY_LOCATION)
    }

    fn save(&self, table: &mut InventoryTable) -> Result<(), StoreError> {
        if let Some(expected) = table.revision() {
            let current = self.contents.borrow().as_deref().map(Revision::of);
            if current.as_ref() != Some(expected) {
                return Err(StoreError::Conflict {
                    location: MEMORY_LOCATION.to_string(),
                });
            }
        }

        let bytes = encode_items(table.items()).map_err(|source| StoreError::Csv {
            location: MEMORY_LOCATION.to_string(),
            source,
        })?;
        table.set_revision(Revision::of(&bytes));
        *self.contents.borrow_mut() = Some(bytes);

        Ok(())
    }
}

/// Serialize items in the inventory file format, header included
pub fn encode_items<'a>(
    items: impl IntoIterator<Item = &'a InventoryItem>,
) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    write_items(&mut wtr, items)?;
    wtr.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Content of an inventory file with no rows
pub fn encode_header() -> Result<Vec<u8>, csv::Error> {
    encode_items(std::iter::empty::<&InventoryItem>())
}

/// Write the header and rows to an existing CSV writer
pub fn write_items<'a, W: io::Write>(
    wtr: &mut csv::Writer<W>,
    items: impl IntoIterator<Item = &'a InventoryItem>,
) -> Result<(), csv::Error> {
    wtr.write_record(COLUMNS)?;
    for item in items {
        let quantity = item.quantity.to_string();
        let reorder_level = item.reorder_level.to_string();
        let remarks = item.remarks.to_string();
        wtr.write_record([
            item.item_id.as_str(),
            item.item_name.as_str(),
            item.category.as_str(),
            item.unit.as_str(),
            quantity.as_str(),
            reorder_level.as_str(),
            item.location.as_str(),
            item.last_updated.as_str(),
            remarks.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parse inventory file bytes into a table stamped with their revision
pub fn decode_table(bytes: &[u8], location: &str) -> Result<InventoryTable, StoreError> {
    let items = decode_items(bytes, location).map_err(|source| StoreError::Csv {
        location: location.to_string(),
        source,
    })?;

    let mut table = InventoryTable::from_items(items);
    let revision = Revision::of(bytes);
    debug!(location, rows = table.len(), revision = %revision, "loaded inventory");
    table.set_revision(revision);

    Ok(table)
}

fn decode_items(bytes: &[u8], location: &str) -> Result<Vec<InventoryItem>, csv::Error> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();
    let header_map = build_header_map(&headers);

    let mut items = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (row_idx, result) in rdr.records().enumerate() {
        let row = row_idx + 2; // 1-indexed plus the header row
        let record = result?;
        let field = |name: &str| get_field(&record, &header_map, name).to_string();

        let item_id = field("item_id");
        if let Some(previous_row) = seen.insert(item_id.clone(), row) {
            warn!(location, row, previous_row, item_id = %item_id, "duplicate item ID");
        }

        items.push(InventoryItem {
            item_id: ItemId::from(item_id),
            item_name: field("item_name"),
            category: field("category"),
            unit: field("unit"),
            quantity: coerce_count(&field("quantity"), "quantity", row, location),
            reorder_level: coerce_count(&field("reorder_level"), "reorder_level", row, location),
            location: field("location"),
            last_updated: field("last_updated"),
            remarks: Remarks::parse(&field("remarks")),
        });
    }

    Ok(items)
}

/// Map lowercase, trimmed header names to column indexes
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect()
}

/// Raw field text, empty when the column or cell is missing
fn get_field<'r>(
    record: &'r StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> &'r str {
    header_map
        .get(name)
        .and_then(|&idx| record.get(idx))
        .unwrap_or("")
}

/// Read a non-negative count, substituting 0 for anything unreadable
fn coerce_count(raw: &str, column: &str, row: usize, location: &str) -> u32 {
    let text = raw.trim();
    if let Ok(n) = text.parse::<u32>() {
        return n;
    }

    // Spreadsheet tools like to write whole numbers as "3.0"
    if let Ok(value) = text.parse::<f64>() {
        if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) {
            return value.trunc() as u32;
        }
    }

    warn!(location, row, column, value = raw, "unreadable count, using 0");
    0
}
