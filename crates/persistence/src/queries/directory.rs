// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee and holiday queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger_domain::{Employee, EmployeeId, HolidaySet, parse_iso_date};
use time::Date;
use tracing::debug;

use crate::data_models::{EmployeeRow, format_date};
use crate::diesel_schema::{employees, holidays};
use crate::error::PersistenceError;

/// Retrieves an employee by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `id` - The employee ID
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the employee is not found.
pub fn find_employee(
    conn: &mut SqliteConnection,
    id: EmployeeId,
) -> Result<Option<Employee>, PersistenceError> {
    debug!(employee_id = %id, "Looking up employee");

    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_id.eq(id.value()))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Employee::try_from).transpose()
}

/// Lists the direct reports of an employee, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_subordinates(
    conn: &mut SqliteConnection,
    manager: EmployeeId,
) -> Result<Vec<Employee>, PersistenceError> {
    employees::table
        .filter(employees::reporting_to.eq(manager.value()))
        .order(employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load::<EmployeeRow>(conn)?
        .into_iter()
        .map(Employee::try_from)
        .collect()
}

/// Lists every employee, ordered by ID.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_employees(conn: &mut SqliteConnection) -> Result<Vec<Employee>, PersistenceError> {
    employees::table
        .order(employees::employee_id.asc())
        .select(EmployeeRow::as_select())
        .load::<EmployeeRow>(conn)?
        .into_iter()
        .map(Employee::try_from)
        .collect()
}

/// Loads the holidays from `start` through `end`.
///
/// # Errors
///
/// Returns an error if the query fails or a stored date cannot be parsed.
pub fn holidays_between(
    conn: &mut SqliteConnection,
    start: Date,
    end: Date,
) -> Result<HolidaySet, PersistenceError> {
    let dates: Vec<String> = holidays::table
        .filter(holidays::holiday_date.ge(format_date(start)?))
        .filter(holidays::holiday_date.le(format_date(end)?))
        .select(holidays::holiday_date)
        .load(conn)?;

    debug!(
        start = %start,
        end = %end,
        count = dates.len(),
        "Loaded holidays"
    );

    let mut set: HolidaySet = HolidaySet::new();
    for date in dates {
        set.insert(parse_iso_date(&date)?);
    }
    Ok(set)
}
