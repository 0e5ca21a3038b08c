// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Opening the ledger database.
//!
//! Diesel has no DSL for PRAGMA statements or `sqlite_master`, so this is the
//! only module that issues raw SQL.

use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use diesel::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use std::fmt;
use tracing::{debug, info};

use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Tables the ledger reads and writes once migrations have run.
///
/// `leave_balances`, `monthly_cl_accrual` and `leave_applications` all
/// reference `employees`; the foreign keys are what stop an application from
/// naming an approver that was never seeded.
pub const LEAVE_TABLES: [&str; 5] = [
    "employees",
    "holidays",
    "leave_balances",
    "monthly_cl_accrual",
    "leave_applications",
];

/// Where the ledger database lives.
#[derive(Debug, Clone, Copy)]
pub enum Location<'a> {
    /// A private shared-cache in-memory database, keyed by a process-unique number.
    Memory(u64),
    /// A database file on disk.
    File(&'a str),
}

impl Location<'_> {
    fn url(self) -> String {
        match self {
            Self::Memory(id) => format!("file:leave_ledger_{id}?mode=memory&cache=shared"),
            Self::File(path) => path.to_string(),
        }
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory(id) => write!(f, "in-memory ledger #{id}"),
            Self::File(path) => write!(f, "{path}"),
        }
    }
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Connects, migrates and checks the schema.
///
/// File databases are switched to WAL journaling.
///
/// # Errors
///
/// Returns an error if the connection, a PRAGMA, the migrations or the
/// schema check fails.
pub fn open(location: Location<'_>) -> Result<SqliteConnection, PersistenceError> {
    let mut conn: SqliteConnection = SqliteConnection::establish(&location.url())?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    if let Location::File(_) = location {
        diesel::sql_query("PRAGMA journal_mode = WAL")
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    debug!(applied, "Ran ledger migrations");

    verify_schema(&mut conn)?;
    info!(%location, "Leave ledger database ready");
    Ok(conn)
}

/// Confirms foreign keys are enforced and every ledger table exists.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` if the
/// connection does not enforce foreign keys, or
/// `PersistenceError::InitializationError` naming the first missing table.
pub fn verify_schema(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    let present: Vec<String> =
        diesel::sql_query("SELECT name FROM sqlite_master WHERE type = 'table'")
            .load::<TableName>(conn)?
            .into_iter()
            .map(|row| row.name)
            .collect();
    if let Some(missing) = LEAVE_TABLES
        .iter()
        .find(|table| !present.iter().any(|name| name == *table))
    {
        return Err(PersistenceError::InitializationError(format!(
            "ledger table {missing} is missing"
        )));
    }
    Ok(())
}
