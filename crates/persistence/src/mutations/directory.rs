// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee and holiday mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger_domain::{Employee, EmployeeId};
use time::Date;
use tracing::info;

use crate::data_models::{EmployeeRow, HolidayRow, format_date};
use crate::diesel_schema::{employees, holidays};
use crate::error::PersistenceError;

/// Inserts an employee or replaces the stored attributes of an existing one.
///
/// The manager referenced by `reporting_to` must already exist.
///
/// # Errors
///
/// Returns an error if the write fails, including when the manager does
/// not exist.
pub fn upsert_employee(conn: &mut SqliteConnection, employee: &Employee) -> Result<(), PersistenceError> {
    let row: EmployeeRow = EmployeeRow::from_employee(employee)?;

    diesel::insert_into(employees::table)
        .values(&row)
        .on_conflict(employees::employee_id)
        .do_update()
        .set((
            employees::full_name.eq(&row.full_name),
            employees::role.eq(&row.role),
            employees::gender.eq(&row.gender),
            employees::join_date.eq(&row.join_date),
            employees::department.eq(row.department.clone()),
            employees::reporting_to.eq(row.reporting_to),
        ))
        .execute(conn)?;

    info!(
        employee_id = %employee.id,
        role = %employee.role,
        "Stored employee"
    );
    Ok(())
}

/// Points an employee at a new manager.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the employee does not exist, or
/// another error if the update fails.
pub fn set_reporting_to(
    conn: &mut SqliteConnection,
    id: EmployeeId,
    manager: Option<EmployeeId>,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(id.value()))
        .set(employees::reporting_to.eq(manager.map(EmployeeId::value)))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Employee {id}")));
    }
    Ok(())
}

/// Adds a holiday, replacing the name of an existing one on the same date.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn upsert_holiday(conn: &mut SqliteConnection, date: Date, name: &str) -> Result<(), PersistenceError> {
    let row: HolidayRow = HolidayRow {
        holiday_date: format_date(date)?,
        name: name.to_string(),
    };

    diesel::insert_into(holidays::table)
        .values(&row)
        .on_conflict(holidays::holiday_date)
        .do_update()
        .set(holidays::name.eq(&row.name))
        .execute(conn)?;

    info!(date = %date, name, "Stored holiday");
    Ok(())
}
