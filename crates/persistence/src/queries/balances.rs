// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use leave_ledger_domain::{EmployeeId, LeaveBalance};

use crate::data_models::{AccrualRow, BalanceRow};
use crate::diesel_schema::{leave_balances, monthly_cl_accrual};
use crate::error::PersistenceError;

/// Loads an employee's balance record together with its accrual map.
///
/// An employee without a stored record gets an empty one.
///
/// # Errors
///
/// Returns an error if the query fails or the stored record is corrupt.
pub fn load_balance(
    conn: &mut SqliteConnection,
    id: EmployeeId,
) -> Result<LeaveBalance, PersistenceError> {
    let row: Option<BalanceRow> = leave_balances::table
        .filter(leave_balances::employee_id.eq(id.value()))
        .select(BalanceRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(LeaveBalance::default());
    };

    let accruals: Vec<AccrualRow> = monthly_cl_accrual::table
        .filter(monthly_cl_accrual::employee_id.eq(id.value()))
        .order(monthly_cl_accrual::month.asc())
        .select(AccrualRow::as_select())
        .load(conn)?;

    row.into_balance(accruals)
}
