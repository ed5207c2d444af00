//! Schema catalog for the call-routing datastore
//!
//! All tables are defined here as an ordered catalog of [`TableSpec`] entries.
//! Each entry pairs an idempotent drop statement with a create-and-seed script,
//! and names the tables it references via foreign keys. The catalog order is the
//! provisioning order: a referenced table always appears before any table that
//! references it, so every foreign-key value inserted by a seed script points at
//! a row that already exists.
//!
//! The schema text (table names, column names and types, seed values) matches
//! the datastore layout expected by existing tooling and must not drift.

use anyhow::{anyhow, Result};

/// A single table's provisioning specification
///
/// The `drop_sql` statement uses `DROP TABLE IF EXISTS`, so it succeeds whether
/// or not the table is present; rerunning the catalog never requires a
/// pre-flight existence check. The `create_sql` script recreates the table and
/// inserts its canonical seed rows in one batch.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    /// Table name as it appears in the datastore
    pub name: &'static str,
    /// Names of tables this table references via foreign keys
    pub depends_on: &'static [&'static str],
    /// Idempotent drop statement
    pub drop_sql: &'static str,
    /// Create-and-seed script (CREATE TABLE followed by its INSERTs)
    pub create_sql: &'static str,
}

/// The ordered table catalog
///
/// Provisioning walks this slice front to back. SETTINGS has no dependencies;
/// COMPANIES, TIMETABLE, and OPERATORS must all be seeded before the NUMBERS
/// table and the two association tables that reference them.
pub const TABLE_SPECS: &[TableSpec] = &[
    TableSpec {
        name: "SETTINGS",
        depends_on: &[],
        drop_sql: "DROP TABLE IF EXISTS SETTINGS;",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS SETTINGS(
                ID                INTEGER PRIMARY KEY AUTOINCREMENT,
                NAME              TEXT,
                VALUE             INT);
            INSERT INTO SETTINGS (NAME,VALUE) VALUES ('N', 50);
            INSERT INTO SETTINGS (NAME,VALUE) VALUES ('N2', 60);
        "#,
    },
    TableSpec {
        name: "COMPANIES",
        depends_on: &[],
        drop_sql: "DROP TABLE IF EXISTS COMPANIES;",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS COMPANIES(
                COMPANY_ID        INTEGER PRIMARY KEY AUTOINCREMENT,
                NAME              TEXT);
            INSERT INTO COMPANIES (NAME) VALUES ('Company_1');
            INSERT INTO COMPANIES (NAME) VALUES ('Company_2');
            INSERT INTO COMPANIES (NAME) VALUES ('Company_3');
        "#,
    },
    TableSpec {
        name: "TIMETABLE",
        depends_on: &[],
        drop_sql: "DROP TABLE IF EXISTS TIMETABLE;",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS TIMETABLE(
                TIMETABLE_ID      INTEGER PRIMARY KEY AUTOINCREMENT,
                DAY               TEXT,
                START_TIME  NUMERIC,
                END_TIME    NUMERIC);
            INSERT INTO TIMETABLE (DAY,START_TIME,END_TIME) VALUES ('Monday', '13:30', '14:05');
            INSERT INTO TIMETABLE (DAY,START_TIME,END_TIME) VALUES ('Monday', '16:30', '17:00');
            INSERT INTO TIMETABLE (DAY,START_TIME,END_TIME) VALUES ('Tuesday', '15:25', '16:00');
            INSERT INTO TIMETABLE (DAY,START_TIME,END_TIME) VALUES ('Wednesday', '10:15', '11:00');
            INSERT INTO TIMETABLE (DAY,START_TIME,END_TIME) VALUES ('Thursday', '09:45', '10:05');
            INSERT INTO TIMETABLE (DAY,START_TIME,END_TIME) VALUES ('Thursday', '19:05', '20:05');
            INSERT INTO TIMETABLE (DAY,START_TIME,END_TIME) VALUES ('Friday', '11:35', '12:05');
            INSERT INTO TIMETABLE (DAY,START_TIME,END_TIME) VALUES ('Saturday', '14:20', '15:20');
            INSERT INTO TIMETABLE (DAY,START_TIME,END_TIME) VALUES ('Sunday', '00:00', '00:00');
        "#,
    },
    TableSpec {
        name: "NUMBERS",
        depends_on: &["COMPANIES"],
        drop_sql: "DROP TABLE IF EXISTS NUMBERS;",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS NUMBERS(
                NUMBER_ID         INTEGER PRIMARY KEY AUTOINCREMENT,
                ABONENT_NAME      TEXT,
                NUMBER            INT,
                COMPANY_FK        INT,
                FOREIGN KEY(COMPANY_FK) REFERENCES COMPANIES(COMPANY_ID));
            INSERT INTO NUMBERS (ABONENT_NAME,NUMBER,COMPANY_FK) VALUES ('Abonent_1', 375292597843,1);
            INSERT INTO NUMBERS (ABONENT_NAME,NUMBER,COMPANY_FK) VALUES ('Abonent_2', 375292597844,1);
            INSERT INTO NUMBERS (ABONENT_NAME,NUMBER,COMPANY_FK) VALUES ('Abonent_3', 375292597845,1);
            INSERT INTO NUMBERS (ABONENT_NAME,NUMBER,COMPANY_FK) VALUES ('Abonent_4', 375292597846,2);
            INSERT INTO NUMBERS (ABONENT_NAME,NUMBER,COMPANY_FK) VALUES ('Abonent_5', 375292597847,2);
            INSERT INTO NUMBERS (ABONENT_NAME,NUMBER,COMPANY_FK) VALUES ('Abonent_6', 375292597848,3);
            INSERT INTO NUMBERS (ABONENT_NAME,NUMBER,COMPANY_FK) VALUES ('Abonent_7', 375292597849,3);
        "#,
    },
    TableSpec {
        name: "OPERATORS",
        depends_on: &[],
        drop_sql: "DROP TABLE IF EXISTS OPERATORS;",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS OPERATORS(
                OPERATOR_ID       INTEGER PRIMARY KEY AUTOINCREMENT,
                NAME              TEXT,
                STATUS            INT);
            INSERT INTO OPERATORS (NAME,STATUS) VALUES ('Operator_1', 0);
            INSERT INTO OPERATORS (NAME,STATUS) VALUES ('Operator_2', 0);
            INSERT INTO OPERATORS (NAME,STATUS) VALUES ('Operator_3', 0);
            INSERT INTO OPERATORS (NAME,STATUS) VALUES ('Operator_4', 0);
        "#,
    },
    TableSpec {
        name: "COMPANY_TIMETABLE",
        depends_on: &["COMPANIES", "TIMETABLE"],
        drop_sql: "DROP TABLE IF EXISTS COMPANY_TIMETABLE;",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS COMPANY_TIMETABLE(
                COMPANY_FK          INT,
                TIMETABLE_FK        INT,
                FOREIGN KEY(COMPANY_FK) REFERENCES COMPANIES(COMPANY_ID),
                FOREIGN KEY(TIMETABLE_FK) REFERENCES TIMETABLE(TIMETABLE_ID));
            INSERT INTO COMPANY_TIMETABLE (COMPANY_FK,TIMETABLE_FK) VALUES (1, 1);
            INSERT INTO COMPANY_TIMETABLE (COMPANY_FK,TIMETABLE_FK) VALUES (1, 2);
            INSERT INTO COMPANY_TIMETABLE (COMPANY_FK,TIMETABLE_FK) VALUES (2, 1);
        "#,
    },
    TableSpec {
        name: "COMPANY_OPERATOR",
        depends_on: &["COMPANIES", "OPERATORS"],
        drop_sql: "DROP TABLE IF EXISTS COMPANY_OPERATOR;",
        create_sql: r#"
            CREATE TABLE IF NOT EXISTS COMPANY_OPERATOR(
                COMPANY_FK          INT,
                OPERATOR_FK         INT,
                FOREIGN KEY(COMPANY_FK) REFERENCES COMPANIES(COMPANY_ID),
                FOREIGN KEY(OPERATOR_FK) REFERENCES OPERATORS(OPERATOR_ID));
            INSERT INTO COMPANY_OPERATOR (COMPANY_FK,OPERATOR_FK) VALUES (1, 1);
            INSERT INTO COMPANY_OPERATOR (COMPANY_FK,OPERATOR_FK) VALUES (1, 2);
            INSERT INTO COMPANY_OPERATOR (COMPANY_FK,OPERATOR_FK) VALUES (2, 3);
        "#,
    },
];

/// Expected seed row count per table after a fully successful run
pub const SEED_ROW_COUNTS: &[(&str, u64)] = &[
    ("SETTINGS", 2),
    ("COMPANIES", 3),
    ("TIMETABLE", 9),
    ("NUMBERS", 7),
    ("OPERATORS", 4),
    ("COMPANY_TIMETABLE", 3),
    ("COMPANY_OPERATOR", 3),
];

/// Look up a table specification by name
pub fn find(name: &str) -> Option<&'static TableSpec> {
    TABLE_SPECS.iter().find(|spec| spec.name == name)
}

/// Validate that a catalog is in dependency order
///
/// Every name in a spec's `depends_on` must belong to a spec that appears
/// earlier in the slice. The shipped [`TABLE_SPECS`] catalog is checked by
/// tests; callers supplying their own catalog can check it here before
/// provisioning.
pub fn validate_order(specs: &[TableSpec]) -> Result<()> {
    let mut seen: Vec<&str> = Vec::with_capacity(specs.len());
    for spec in specs {
        for dep in spec.depends_on {
            if !seen.contains(dep) {
                return Err(anyhow!(
                    "Table '{}' depends on '{}', which does not precede it in the catalog",
                    spec.name,
                    dep
                ));
            }
        }
        seen.push(spec.name);
    }
    Ok(())
}
