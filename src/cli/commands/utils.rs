//! Shared utilities for CLI commands

use chrono::{Local, NaiveDateTime};
use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::store::{CsvStore, RecordStore};
use crate::core::table::InventoryTable;
use crate::core::Config;

/// Config and store for one command invocation
pub struct Session {
    pub config: Config,
    pub store: CsvStore,
}

impl Session {
    /// Resolve configuration and the inventory file for this invocation
    pub fn open(global: &GlobalOpts) -> Self {
        let config = Config::load().with_data_file(global.file.clone());
        let store = CsvStore::new(config.data_file());
        Self { config, store }
    }

    /// Read the full table
    pub fn load(&self) -> Result<InventoryTable> {
        Ok(self.store.load()?)
    }

    /// Write the table back; `force` skips the concurrent-change check
    pub fn commit(&self, table: &mut InventoryTable, force: bool) -> Result<()> {
        if force {
            table.forget_revision();
        }
        self.store.save(table)?;
        Ok(())
    }
}

/// Current local time, as stamped on changed rows
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
