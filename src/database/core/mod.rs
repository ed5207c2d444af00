//! Core database infrastructure
//!
//! - **connection**: SQLite `DatabaseConn` wrapper
//! - **schema**: the ordered table-spec catalog (DDL and seed scripts)
//! - **provision**: the drop-then-create-and-seed driver and its report

pub mod connection;
pub mod provision;
pub mod schema;

pub use connection::DatabaseConn;
pub use provision::{ProvisionReport, Provisioner, StepOutcome, TableOutcome};
pub use schema::{find, validate_order, TableSpec, SEED_ROW_COUNTS, TABLE_SPECS};
