// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger_domain::{ApplicationId, LeaveApplication, NewLeaveApplication};
use tracing::{debug, info};

use crate::data_models::{NewApplicationRow, days_to_column};
use crate::diesel_schema::leave_applications;
use crate::error::PersistenceError;

/// Inserts a new pending application.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `application` - The validated application
///
/// # Errors
///
/// Returns an error if the row cannot be inserted, including when the
/// applicant or approver does not exist.
pub fn insert_application(
    conn: &mut SqliteConnection,
    application: NewLeaveApplication,
) -> Result<LeaveApplication, PersistenceError> {
    let row: NewApplicationRow = NewApplicationRow::from_new(&application)?;

    let application_id: i64 = diesel::insert_into(leave_applications::table)
        .values(&row)
        .returning(leave_applications::application_id)
        .get_result(conn)?;

    info!(
        application_id,
        employee_id = %application.employee_id,
        leave_type = %application.leave_type,
        "Inserted leave application"
    );

    Ok(LeaveApplication::from_new(
        ApplicationId::new(application_id),
        application,
    ))
}

/// Writes back the status and remaining balance of an application.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row matches, or another error
/// if the update fails.
pub fn update_application(
    conn: &mut SqliteConnection,
    application: &LeaveApplication,
) -> Result<(), PersistenceError> {
    let remaining: Option<i32> = application
        .remaining_leaves
        .map(days_to_column)
        .transpose()?;

    let updated: usize = diesel::update(leave_applications::table)
        .filter(leave_applications::application_id.eq(application.id.value()))
        .set((
            leave_applications::status.eq(application.status.as_str()),
            leave_applications::remaining_leaves_halves.eq(remaining),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Leave application {}",
            application.id
        )));
    }

    debug!(
        application_id = %application.id,
        status = %application.status,
        "Updated leave application"
    );
    Ok(())
}
