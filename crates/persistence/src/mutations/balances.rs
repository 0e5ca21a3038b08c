// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger_domain::{EmployeeId, LeaveBalance};
use tracing::debug;

use crate::data_models::{AccrualRow, BalanceRow, days_to_column};
use crate::diesel_schema::{leave_balances, monthly_cl_accrual};
use crate::error::PersistenceError;

/// Stores an employee's balance record, replacing its accrual map.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `id` - The employee the record belongs to
/// * `balance` - The record to store
///
/// # Errors
///
/// Returns an error if a write fails or a count does not fit its column.
pub fn save_balance(
    conn: &mut SqliteConnection,
    id: EmployeeId,
    balance: &LeaveBalance,
) -> Result<(), PersistenceError> {
    let row: BalanceRow = BalanceRow::from_balance(id, balance)?;

    diesel::insert_into(leave_balances::table)
        .values(&row)
        .on_conflict(leave_balances::employee_id)
        .do_update()
        .set(&row)
        .execute(conn)?;

    diesel::delete(monthly_cl_accrual::table.filter(monthly_cl_accrual::employee_id.eq(id.value())))
        .execute(conn)?;

    let accruals: Vec<AccrualRow> = balance
        .monthly_cl_accrual
        .iter()
        .map(|(month, accrued)| {
            Ok(AccrualRow {
                employee_id: id.value(),
                month: i32::from(*month),
                accrued_halves: days_to_column(*accrued)?,
            })
        })
        .collect::<Result<Vec<AccrualRow>, PersistenceError>>()?;

    if !accruals.is_empty() {
        diesel::insert_into(monthly_cl_accrual::table)
            .values(&accruals)
            .execute(conn)?;
    }

    debug!(
        employee_id = %id,
        months = accruals.len(),
        "Saved leave balance"
    );
    Ok(())
}
