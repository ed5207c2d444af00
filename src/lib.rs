#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Callplan - a call-routing datastore provisioner
//!
//! Callplan initializes the SQLite datastore backing a small call-routing and
//! scheduling domain: companies, phone numbers, operators, weekly timetables,
//! the many-to-many associations between companies and timetables/operators,
//! and a key-value settings table. It can be used as both a command-line
//! application and a library.
//!
//! The core of the crate is the schema-and-seed bootstrap: an ordered catalog
//! of table specifications (each an idempotent drop statement plus a
//! create-and-seed script) and a provisioner that walks the catalog in
//! dependency order, bringing the datastore from any prior state to the
//! canonical fully-seeded state on every run.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `database` | SQLite catalog and provisioner only | `rusqlite` |
//! | `cli` | Full CLI binary with report tables | `clap`, `tabled` |
//!
//! # Architecture
//!
//! - **[`database`]**: All database functionality (always available)
//!   - `core::connection`: SQLite connection management
//!   - `core::schema`: the ordered table-spec catalog
//!   - `core::provision`: the drop-then-create-and-seed driver and report
//!
//! - **[`config`]**: Configuration management
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use callplan::CallplanDatabase;
//!
//! // Open or create the datastore
//! let db = CallplanDatabase::open_in_dir("~/.callplan")?;
//!
//! // Reset and seed every table, in dependency order
//! let report = db.provision();
//! for outcome in &report.outcomes {
//!     println!("{}: seeded={}", outcome.table, outcome.is_seeded());
//! }
//! ```

pub mod config;
pub mod database;

// =============================================================================
// Configuration (always available)
// =============================================================================

pub use config::CallplanConfig;

// =============================================================================
// Database Module - Re-export commonly used types (always available)
// =============================================================================

// Primary datastore handle
pub use database::CallplanDatabase;

// Core database types
pub use database::{DatabaseConn, ProvisionReport, Provisioner, StepOutcome, TableOutcome};

// Table catalog
pub use database::{find, validate_order, TableSpec, SEED_ROW_COUNTS, TABLE_SPECS};

// Helper
pub use database::ensure_data_dir;
