// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Leave Ledger.
//!
//! This crate stores employees, holidays, leave applications and balance
//! records in `SQLite` through Diesel, and implements the engine's storage
//! ports on top of them.
//!
//! ## Transactions
//!
//! [`Persistence`] implements [`leave_ledger::UnitOfWork`]. Each engine
//! operation runs inside a single `SQLite` transaction: the balance reads
//! that feed validation, the balance write and the application write commit
//! together, and any error rolls all of them back.
//!
//! ## Storage conventions
//!
//! - Dates are ISO-8601 `YYYY-MM-DD` text
//! - Day quantities are integer half-day counts
//! - Foreign keys are enforced and verified at start-up
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller its own shared-cache
//! in-memory database, so tests never see each other's data.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use leave_ledger::{CoreError, LeaveStore, StoreError, UnitOfWork};
use leave_ledger_domain::{Employee, EmployeeId, OrgIndex};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use tracing::{info, warn};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod connection;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod seed;
mod store;

#[cfg(test)]
mod tests;

use connection::Location;

pub use connection::LEAVE_TABLES;
pub use error::PersistenceError;
pub use seed::{SeedData, SeedEmployee, SeedHoliday};
pub use store::SqliteLeaveStore;

/// Failure inside a unit of work: either the engine refused the operation or
/// the database failed underneath it.
#[derive(Debug)]
enum TransactionError {
    Core(CoreError),
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for TransactionError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err)
    }
}

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let conn: SqliteConnection = connection::open(Location::Memory(db_id))?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = connection::open(Location::File(path_str))?;
        Ok(Self { conn })
    }

    /// Checks that foreign keys are enforced and every ledger table exists.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first problem found.
    pub fn verify_schema(&mut self) -> Result<(), PersistenceError> {
        connection::verify_schema(&mut self.conn)
    }

    // ========================================================================
    // Directory
    // ========================================================================

    /// Loads seed data in one transaction.
    ///
    /// The hierarchy is validated before anything is written. Employees are
    /// inserted first and their managers linked afterwards, so seed order
    /// does not matter.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidSeed` for inconsistent seed data, or
    /// a database error if a write fails.
    pub fn seed(&mut self, data: &SeedData) -> Result<(), PersistenceError> {
        let org: OrgIndex = data.org_index()?;
        let holidays: Vec<(Date, String)> = data.holiday_dates()?;

        self.conn.transaction(|conn| {
            for employee in org.iter() {
                let unlinked: Employee = Employee {
                    reporting_to: None,
                    ..employee.clone()
                };
                mutations::directory::upsert_employee(conn, &unlinked)?;
            }
            for employee in org.iter() {
                mutations::directory::set_reporting_to(conn, employee.id, employee.reporting_to)?;
            }
            for (date, name) in &holidays {
                mutations::directory::upsert_holiday(conn, *date, name)?;
            }
            Ok::<(), PersistenceError>(())
        })?;

        info!(
            employees = org.len(),
            holidays = holidays.len(),
            "Loaded seed data"
        );
        Ok(())
    }

    /// Adds or updates one employee.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidSeed` if the change would create a
    /// reporting cycle or reference an unknown manager, or a database error.
    pub fn upsert_employee(&mut self, employee: &Employee) -> Result<(), PersistenceError> {
        self.conn.transaction(|conn| {
            let mut org: OrgIndex = OrgIndex::from_employees(queries::directory::list_employees(conn)?)
                .map_err(|e| PersistenceError::CorruptRecord(e.to_string()))?;
            let unknown_manager: Option<EmployeeId> = employee
                .reporting_to
                .filter(|manager| *manager != employee.id && org.employee(*manager).is_none());
            if let Some(manager) = unknown_manager {
                return Err(PersistenceError::InvalidSeed(format!(
                    "employee {} reports to unknown employee {manager}",
                    employee.id
                )));
            }
            org.upsert(employee.clone())
                .map_err(|e| PersistenceError::InvalidSeed(e.to_string()))?;
            mutations::directory::upsert_employee(conn, employee)
        })
    }

    /// Adds a holiday.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn add_holiday(&mut self, date: Date, name: &str) -> Result<(), PersistenceError> {
        mutations::directory::upsert_holiday(&mut self.conn, date, name)
    }

    /// Looks up an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, PersistenceError> {
        queries::directory::find_employee(&mut self.conn, id)
    }

    /// Lists every employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn employees(&mut self) -> Result<Vec<Employee>, PersistenceError> {
        queries::directory::list_employees(&mut self.conn)
    }
}

impl UnitOfWork for Persistence {
    fn run<T, F>(&mut self, work: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut dyn LeaveStore) -> Result<T, CoreError>,
    {
        let outcome: Result<T, TransactionError> = self.conn.transaction(|conn| {
            let mut store: SqliteLeaveStore<'_> = SqliteLeaveStore::new(conn);
            work(&mut store).map_err(TransactionError::Core)
        });

        match outcome {
            Ok(value) => Ok(value),
            Err(TransactionError::Core(err)) => Err(err),
            Err(TransactionError::Database(err)) => {
                warn!(error = %err, "Leave transaction failed");
                Err(CoreError::Internal(StoreError::Unavailable(err.to_string())))
            }
        }
    }
}
