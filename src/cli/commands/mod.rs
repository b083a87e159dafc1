//! CLI command implementations

pub mod utils;

pub mod add;
pub mod completions;
pub mod config;
pub mod delete;
pub mod export;
pub mod facets;
pub mod init;
pub mod list;
pub mod show;
pub mod summary;
pub mod txn;
pub mod update;
