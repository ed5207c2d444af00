//! Schema provisioner
//!
//! The provisioner walks the table catalog in order and, for each table,
//! executes the drop statement followed by the create-and-seed script. Every
//! step is attempted independently: a failed statement is recorded in the
//! report with the underlying SQLite message, and the run moves on to the next
//! table. A run therefore always covers the whole catalog, and the report
//! tells the caller exactly which tables reached their seeded state.

use rusqlite::Connection;
use serde::Serialize;
use tracing::{error, info};

use super::schema::{TableSpec, TABLE_SPECS};

/// Outcome of a single drop or create-and-seed step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The statement executed successfully
    Ok,
    /// The statement failed; the SQLite error message is preserved
    Failed(String),
}

impl StepOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, StepOutcome::Ok)
    }
}

/// Per-table result of a provisioning run
///
/// A table is fully seeded only when both steps succeeded. A failed drop does
/// not skip the create step; the two outcomes are recorded separately.
#[derive(Debug, Clone, Serialize)]
pub struct TableOutcome {
    pub table: &'static str,
    pub drop: StepOutcome,
    pub create: StepOutcome,
}

impl TableOutcome {
    /// Whether the table reached its canonical seeded state
    pub fn is_seeded(&self) -> bool {
        self.drop.is_ok() && self.create.is_ok()
    }
}

/// Report for a full provisioning run
///
/// Contains one [`TableOutcome`] per catalog entry, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    pub outcomes: Vec<TableOutcome>,
}

impl ProvisionReport {
    /// Whether every table in the run reached its seeded state
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_seeded())
    }

    /// Tables that did not reach their seeded state
    pub fn failures(&self) -> Vec<&TableOutcome> {
        self.outcomes.iter().filter(|o| !o.is_seeded()).collect()
    }

    /// Outcome for a specific table, if it was part of the run
    pub fn outcome(&self, table: &str) -> Option<&TableOutcome> {
        self.outcomes.iter().find(|o| o.table == table)
    }
}

/// Schema provisioner for the call-routing datastore
///
/// Brings the datastore to the canonical seeded state regardless of its prior
/// contents. Repeated runs are safe: each table is dropped before it is
/// recreated, so seed rows never accumulate across runs.
pub struct Provisioner<'a> {
    conn: &'a Connection,
}

impl<'a> Provisioner<'a> {
    /// Create a new provisioner for the given connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Provision the full table catalog
    pub fn provision(&self) -> ProvisionReport {
        self.provision_specs(TABLE_SPECS)
    }

    /// Provision an explicit catalog slice
    ///
    /// The slice must be in dependency order; see
    /// [`validate_order`](super::schema::validate_order).
    pub fn provision_specs(&self, specs: &[TableSpec]) -> ProvisionReport {
        let mut outcomes = Vec::with_capacity(specs.len());

        for spec in specs {
            let drop = self.run_step(spec.name, "drop", spec.drop_sql);
            let create = self.run_step(spec.name, "create-and-seed", spec.create_sql);

            let outcome = TableOutcome {
                table: spec.name,
                drop,
                create,
            };
            if outcome.is_seeded() {
                info!("Table {} provisioned", spec.name);
            }
            outcomes.push(outcome);
        }

        ProvisionReport { outcomes }
    }

    fn run_step(&self, table: &str, step: &str, sql: &str) -> StepOutcome {
        match self.conn.execute_batch(sql) {
            Ok(()) => StepOutcome::Ok,
            Err(e) => {
                let msg = e.to_string();
                error!("{} statement for table {} failed: {}", step, table, msg);
                StepOutcome::Failed(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::core::schema::SEED_ROW_COUNTS;
    use crate::database::core::DatabaseConn;

    fn provisioned_db() -> DatabaseConn {
        let db = DatabaseConn::open_in_memory().unwrap();
        let report = Provisioner::new(&db.conn).provision();
        assert!(report.is_success());
        db
    }

    #[test]
    fn test_provision_seeds_all_tables() {
        let db = provisioned_db();
        for (table, expected) in SEED_ROW_COUNTS {
            assert_eq!(
                db.table_count(table).unwrap(),
                *expected,
                "unexpected row count in {table}"
            );
        }
    }

    #[test]
    fn test_provision_is_idempotent() {
        let db = provisioned_db();
        let report = Provisioner::new(&db.conn).provision();
        assert!(report.is_success());

        for (table, expected) in SEED_ROW_COUNTS {
            assert_eq!(db.table_count(table).unwrap(), *expected);
        }
    }

    #[test]
    fn test_seeded_companies_scenario() {
        let db = provisioned_db();

        let mut stmt = db
            .conn
            .prepare("SELECT NAME FROM COMPANIES ORDER BY COMPANY_ID")
            .unwrap();
        let names: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(names, vec!["Company_1", "Company_2", "Company_3"]);

        let n2: i64 = db
            .conn
            .query_row("SELECT VALUE FROM SETTINGS WHERE NAME='N2'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(n2, 60);
    }

    #[test]
    fn test_seeded_rows_are_referentially_valid() {
        let db = provisioned_db();

        // Every FK value must join to an existing PK in the referenced table.
        let dangling_checks = [
            "SELECT COUNT(*) FROM NUMBERS n
             LEFT JOIN COMPANIES c ON n.COMPANY_FK = c.COMPANY_ID
             WHERE c.COMPANY_ID IS NULL",
            "SELECT COUNT(*) FROM COMPANY_TIMETABLE ct
             LEFT JOIN COMPANIES c ON ct.COMPANY_FK = c.COMPANY_ID
             WHERE c.COMPANY_ID IS NULL",
            "SELECT COUNT(*) FROM COMPANY_TIMETABLE ct
             LEFT JOIN TIMETABLE t ON ct.TIMETABLE_FK = t.TIMETABLE_ID
             WHERE t.TIMETABLE_ID IS NULL",
            "SELECT COUNT(*) FROM COMPANY_OPERATOR co
             LEFT JOIN COMPANIES c ON co.COMPANY_FK = c.COMPANY_ID
             WHERE c.COMPANY_ID IS NULL",
            "SELECT COUNT(*) FROM COMPANY_OPERATOR co
             LEFT JOIN OPERATORS o ON co.OPERATOR_FK = o.OPERATOR_ID
             WHERE o.OPERATOR_ID IS NULL",
        ];

        for sql in dangling_checks {
            let dangling: i64 = db.conn.query_row(sql, [], |row| row.get(0)).unwrap();
            assert_eq!(dangling, 0, "dangling foreign keys found by: {sql}");
        }
    }

    #[test]
    fn test_timetable_includes_sunday_closed_row() {
        let db = provisioned_db();

        let count: i64 = db
            .conn
            .query_row(
                "SELECT COUNT(*) FROM TIMETABLE
                 WHERE DAY='Sunday' AND START_TIME='00:00' AND END_TIME='00:00'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_failed_table_does_not_block_others() {
        let db = DatabaseConn::open_in_memory().unwrap();

        let specs = [
            TableSpec {
                name: "COMPANIES",
                depends_on: &[],
                drop_sql: "DROP TABLE IF EXISTS COMPANIES;",
                create_sql: "CREATE TABLE COMPANIES (COMPANY_ID INTEGER PRIMARY KEY AUTOINCREMENT, NAME TEXT);
                             INSERT INTO COMPANIES (NAME) VALUES ('Company_1');",
            },
            TableSpec {
                name: "TIMETABLE",
                depends_on: &[],
                drop_sql: "DROP TABLE IF EXISTS TIMETABLE;",
                // Deliberately malformed
                create_sql: "CREATE TABLE TIMETABLE (NOT VALID SQL",
            },
            TableSpec {
                name: "OPERATORS",
                depends_on: &[],
                drop_sql: "DROP TABLE IF EXISTS OPERATORS;",
                create_sql: "CREATE TABLE OPERATORS (OPERATOR_ID INTEGER PRIMARY KEY AUTOINCREMENT, NAME TEXT);
                             INSERT INTO OPERATORS (NAME) VALUES ('Operator_1');",
            },
        ];

        let report = Provisioner::new(&db.conn).provision_specs(&specs);
        assert!(!report.is_success());

        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].table, "TIMETABLE");
        assert!(failures[0].drop.is_ok());
        assert!(matches!(failures[0].create, StepOutcome::Failed(_)));

        // Independent tables still reached their seeded state.
        assert_eq!(db.table_count("COMPANIES").unwrap(), 1);
        assert_eq!(db.table_count("OPERATORS").unwrap(), 1);
        assert!(!db.table_exists("TIMETABLE").unwrap());
    }

    #[test]
    fn test_provision_replaces_stale_rows() {
        let db = provisioned_db();

        // Mutate the store out from under the catalog, then reprovision.
        db.execute("INSERT INTO SETTINGS (NAME,VALUE) VALUES ('stale', 1)")
            .unwrap();
        db.execute("DELETE FROM OPERATORS WHERE OPERATOR_ID = 1")
            .unwrap();
        assert_eq!(db.table_count("SETTINGS").unwrap(), 3);

        let report = Provisioner::new(&db.conn).provision();
        assert!(report.is_success());

        assert_eq!(db.table_count("SETTINGS").unwrap(), 2);
        assert_eq!(db.table_count("OPERATORS").unwrap(), 4);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let db = DatabaseConn::open_in_memory().unwrap();
        let report = Provisioner::new(&db.conn).provision();

        let json = serde_json::to_value(&report).unwrap();
        let outcomes = json["outcomes"].as_array().unwrap();
        assert_eq!(outcomes.len(), TABLE_SPECS.len());
        assert_eq!(outcomes[0]["table"], "SETTINGS");
        assert_eq!(outcomes[0]["drop"]["status"], "ok");
    }
}
