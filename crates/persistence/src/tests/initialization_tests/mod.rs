// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection and schema set-up tests.
//!
//! Every other persistence test also exercises connection set-up and
//! migrations through `Persistence::new_in_memory()`.

use crate::error::PersistenceError;
use crate::{LEAVE_TABLES, Persistence};
use diesel::RunQueryDsl;
use crate::tests::{PRIYA, create_test_persistence};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_fresh_database_passes_schema_check() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_schema().is_ok());
    assert!(LEAVE_TABLES.contains(&"leave_applications"));
}

#[test]
fn test_schema_check_requires_foreign_keys() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    diesel::sql_query("PRAGMA foreign_keys = OFF")
        .execute(&mut persistence.conn)
        .unwrap();

    assert_eq!(
        persistence.verify_schema(),
        Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
    );
}

#[test]
fn test_schema_check_names_missing_table() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    diesel::sql_query("DROP TABLE holidays")
        .execute(&mut persistence.conn)
        .unwrap();

    assert_eq!(
        persistence.verify_schema(),
        Err(PersistenceError::InitializationError(String::from(
            "ledger table holidays is missing"
        )))
    );
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut seeded: Persistence = create_test_persistence();
    let mut empty: Persistence = Persistence::new_in_memory().unwrap();

    assert!(seeded.employee(PRIYA).unwrap().is_some());
    assert!(empty.employee(PRIYA).unwrap().is_none());
    assert!(empty.employees().unwrap().is_empty());
}

#[test]
fn test_file_database_survives_reopen() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "leave_ledger_reopen_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        persistence.seed(&crate::tests::create_test_seed()).unwrap();
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.employees().unwrap().len(), 4);

    drop(reopened);
    let _ = std::fs::remove_file(&path);
}
