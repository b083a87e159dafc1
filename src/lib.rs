//! stn: stationery stock tracker
//!
//! Keeps on-hand quantities of stationery items in a single CSV file and
//! records issue/receive transactions against them.

pub mod cli;
pub mod core;
pub mod entities;
