// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave application queries.
//!
//! Every filter that takes a `statuses` slice treats an empty slice as
//! "any status". Results are ordered by application ID.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use leave_ledger_domain::{ApplicationId, EmployeeId, LeaveApplication, LeaveStatus, LeaveType};
use time::Date;
use tracing::debug;

use crate::data_models::{ApplicationRow, format_date};
use crate::diesel_schema::leave_applications;
use crate::error::PersistenceError;

type BoxedApplications<'a> = leave_applications::BoxedQuery<'a, Sqlite>;

fn with_statuses<'a>(query: BoxedApplications<'a>, statuses: &[LeaveStatus]) -> BoxedApplications<'a> {
    if statuses.is_empty() {
        return query;
    }
    let codes: Vec<&'static str> = statuses.iter().map(LeaveStatus::as_str).collect();
    query.filter(leave_applications::status.eq_any(codes))
}

fn load(
    conn: &mut SqliteConnection,
    query: BoxedApplications<'_>,
) -> Result<Vec<LeaveApplication>, PersistenceError> {
    query
        .order(leave_applications::application_id.asc())
        .select(ApplicationRow::as_select())
        .load::<ApplicationRow>(conn)?
        .into_iter()
        .map(LeaveApplication::try_from)
        .collect()
}

/// Retrieves an application by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the application is not found.
pub fn find_application(
    conn: &mut SqliteConnection,
    id: ApplicationId,
) -> Result<Option<LeaveApplication>, PersistenceError> {
    let row: Option<ApplicationRow> = leave_applications::table
        .filter(leave_applications::application_id.eq(id.value()))
        .select(ApplicationRow::as_select())
        .first(conn)
        .optional()?;

    row.map(LeaveApplication::try_from).transpose()
}

/// Lists an employee's applications.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_for_employee(
    conn: &mut SqliteConnection,
    employee: EmployeeId,
    statuses: &[LeaveStatus],
) -> Result<Vec<LeaveApplication>, PersistenceError> {
    let query: BoxedApplications<'_> = leave_applications::table
        .filter(leave_applications::employee_id.eq(employee.value()))
        .into_boxed();
    load(conn, with_statuses(query, statuses))
}

/// Lists an employee's applications sharing at least one day with `start..=end`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_overlapping(
    conn: &mut SqliteConnection,
    employee: EmployeeId,
    start: Date,
    end: Date,
    statuses: &[LeaveStatus],
) -> Result<Vec<LeaveApplication>, PersistenceError> {
    let query: BoxedApplications<'_> = leave_applications::table
        .filter(leave_applications::employee_id.eq(employee.value()))
        .filter(leave_applications::start_date.le(format_date(end)?))
        .filter(leave_applications::end_date.ge(format_date(start)?))
        .into_boxed();
    let found: Vec<LeaveApplication> = load(conn, with_statuses(query, statuses))?;

    debug!(
        employee_id = %employee,
        start = %start,
        end = %end,
        count = found.len(),
        "Checked for overlapping applications"
    );
    Ok(found)
}

/// Lists an employee's applications of the given types starting within `start..=end`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_starting_between(
    conn: &mut SqliteConnection,
    employee: EmployeeId,
    leave_types: &[LeaveType],
    start: Date,
    end: Date,
    statuses: &[LeaveStatus],
) -> Result<Vec<LeaveApplication>, PersistenceError> {
    let codes: Vec<&'static str> = leave_types.iter().map(|t| t.code()).collect();
    let query: BoxedApplications<'_> = leave_applications::table
        .filter(leave_applications::employee_id.eq(employee.value()))
        .filter(leave_applications::leave_type.eq_any(codes))
        .filter(leave_applications::start_date.ge(format_date(start)?))
        .filter(leave_applications::start_date.le(format_date(end)?))
        .into_boxed();
    load(conn, with_statuses(query, statuses))
}

/// Lists the applications routed to an approver with a given status.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_for_approver(
    conn: &mut SqliteConnection,
    approver: EmployeeId,
    status: LeaveStatus,
) -> Result<Vec<LeaveApplication>, PersistenceError> {
    let query: BoxedApplications<'_> = leave_applications::table
        .filter(leave_applications::approver_id.eq(approver.value()))
        .filter(leave_applications::status.eq(status.as_str()))
        .into_boxed();
    load(conn, query)
}

/// Counts the applications routed to an approver with a given status.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_for_approver(
    conn: &mut SqliteConnection,
    approver: EmployeeId,
    status: LeaveStatus,
) -> Result<u64, PersistenceError> {
    let count: i64 = leave_applications::table
        .filter(leave_applications::approver_id.eq(approver.value()))
        .filter(leave_applications::status.eq(status.as_str()))
        .count()
        .get_result(conn)?;

    u64::try_from(count).map_err(|_| PersistenceError::CorruptRecord(format!("negative count {count}")))
}

/// Lists the applications filed under a department with a given status.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_for_department(
    conn: &mut SqliteConnection,
    department: &str,
    status: LeaveStatus,
) -> Result<Vec<LeaveApplication>, PersistenceError> {
    let query: BoxedApplications<'_> = leave_applications::table
        .filter(leave_applications::department.eq(department.to_string()))
        .filter(leave_applications::status.eq(status.as_str()))
        .into_boxed();
    load(conn, query)
}

/// Lists the approved applications of a department that cover `date`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_approved_covering(
    conn: &mut SqliteConnection,
    department: &str,
    date: Date,
) -> Result<Vec<LeaveApplication>, PersistenceError> {
    let day: String = format_date(date)?;
    let query: BoxedApplications<'_> = leave_applications::table
        .filter(leave_applications::department.eq(department.to_string()))
        .filter(leave_applications::status.eq(LeaveStatus::Approved.as_str()))
        .filter(leave_applications::start_date.le(day.clone()))
        .filter(leave_applications::end_date.ge(day))
        .into_boxed();
    load(conn, query)
}
