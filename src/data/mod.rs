//! Data storage
//!
//! SQLite storage for team and conference snapshots.

pub mod database;

pub use database::{Database, ImportFile, Snapshot};
