//! Database module
//!
//! This module provides all database functionality for callplan:
//!
//! - **core**: SQLite connection management, the table-spec catalog, and the
//!   schema provisioner
//!
//! # Architecture
//!
//! ```text
//! database/
//! └── core/           # Foundation
//!     ├── connection  # SQLite DatabaseConn wrapper
//!     ├── schema      # Ordered table-spec catalog (DDL + seed scripts)
//!     └── provision   # Drop-then-create-and-seed driver and report
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use callplan::database::CallplanDatabase;
//!
//! // Open (or create) the datastore and bring it to the seeded state
//! let db = CallplanDatabase::open_in_dir("~/.callplan")?;
//! let report = db.provision();
//! if !report.is_success() {
//!     for failure in report.failures() {
//!         eprintln!("table {} did not reach its seeded state", failure.table);
//!     }
//! }
//! ```

pub mod core;

pub use core::{
    find, validate_order, DatabaseConn, ProvisionReport, Provisioner, StepOutcome, TableOutcome,
    TableSpec, SEED_ROW_COUNTS, TABLE_SPECS,
};

use anyhow::{anyhow, Result};

/// Main callplan datastore handle
///
/// `CallplanDatabase` owns the single connection used for a provisioning run.
/// The connection is held for the lifetime of this value and released when it
/// is dropped, on every exit path.
pub struct CallplanDatabase {
    db: DatabaseConn,
}

impl CallplanDatabase {
    /// Open the callplan datastore at the specified path
    ///
    /// The file is created if it does not exist. No provisioning happens
    /// here; call [`provision`](Self::provision) to reset and seed the tables.
    pub fn open(path: &str) -> Result<Self> {
        let db = DatabaseConn::open_path(path)?;
        Ok(Self { db })
    }

    /// Open the callplan datastore from a data directory
    ///
    /// Creates the standard database file path: `{data_dir}/callplan.sqlite3`
    pub fn open_in_dir(data_dir: &str) -> Result<Self> {
        let path = format!("{}/callplan.sqlite3", data_dir);
        Self::open(&path)
    }

    /// Create an in-memory callplan datastore (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let db = DatabaseConn::open_in_memory()?;
        Ok(Self { db })
    }

    /// Reset and seed every table in the catalog
    ///
    /// Each table is dropped and recreated with its canonical seed rows, in
    /// dependency order. Statement failures are recorded in the report and do
    /// not stop the run.
    pub fn provision(&self) -> ProvisionReport {
        Provisioner::new(&self.db.conn).provision()
    }

    /// Get the underlying database connection (for verification queries)
    pub fn connection(&self) -> &rusqlite::Connection {
        &self.db.conn
    }

    /// Check if a table exists in the datastore
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        self.db.table_exists(table_name)
    }

    /// Get the row count for a table
    pub fn table_count(&self, table_name: &str) -> Result<u64> {
        self.db.table_count(table_name)
    }
}

/// Ensure the data directory exists
pub fn ensure_data_dir(data_dir: &str) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| anyhow!("Failed to create data directory '{}': {}", data_dir, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = CallplanDatabase::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_provision_full_catalog() {
        let db = CallplanDatabase::open_in_memory().unwrap();
        let report = db.provision();
        assert!(report.is_success());

        for (table, expected) in SEED_ROW_COUNTS {
            assert_eq!(db.table_count(table).unwrap(), *expected);
        }
    }

    #[test]
    fn test_connection_released_after_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("callplan.sqlite3");
        let path_str = path.to_str().unwrap();

        {
            let db = CallplanDatabase::open(path_str).unwrap();
            assert!(db.provision().is_success());
        }

        // A fresh open of the same store must succeed once the handle is gone.
        let db = CallplanDatabase::open(path_str).unwrap();
        assert!(db.table_exists("COMPANIES").unwrap());
        assert_eq!(db.table_count("COMPANIES").unwrap(), 3);
    }

    #[test]
    fn test_provision_twice_across_reopens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("callplan.sqlite3");
        let path_str = path.to_str().unwrap();

        {
            let db = CallplanDatabase::open(path_str).unwrap();
            assert!(db.provision().is_success());
        }

        let db = CallplanDatabase::open(path_str).unwrap();
        assert!(db.provision().is_success());
        for (table, expected) in SEED_ROW_COUNTS {
            assert_eq!(db.table_count(table).unwrap(), *expected);
        }
    }
}
