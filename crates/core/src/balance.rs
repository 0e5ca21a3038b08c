// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Balance recomputation shared by every operation.

use crate::error::CoreError;
use crate::ports::LeaveStore;
use leave_ledger_domain::{
    BalanceReport, Days, Employee, EmployeeId, HolidaySet, LeaveApplication, LeaveBalance,
    LeaveBucket, LeaveStatus, UsageTotals, build_balance_report, cl_start_month, month_bounds,
    policy::CL_MONTHLY_ACCRUAL, year_bounds,
};
use time::Date;
use tracing::debug;

/// Loads an employee or fails with `CoreError::NotFound`.
pub(crate) fn load_employee(
    store: &mut dyn LeaveStore,
    id: EmployeeId,
) -> Result<Employee, CoreError> {
    store.employee(id)?.ok_or(CoreError::NotFound {
        resource: "Employee",
        id: id.value(),
    })
}

/// Loads the holidays relevant to an operation evaluated on `today`.
///
/// Covers the previous, current and next calendar years, widened to
/// `from..=through` when a request reaches further.
pub(crate) fn load_calendar(
    store: &mut dyn LeaveStore,
    today: Date,
    from: Date,
    through: Date,
) -> Result<HolidaySet, CoreError> {
    let (first, _) = year_bounds(today.year() - 1)?;
    let (_, last) = year_bounds(today.year() + 1)?;
    Ok(store.holidays_between(first.min(from), last.max(through))?)
}

/// A balance record brought up to date with the application history.
pub(crate) struct RefreshedBalance {
    pub(crate) balance: LeaveBalance,
    pub(crate) usage: UsageTotals,
}

/// Rolls the stored balance over to the current year, recomputes it from
/// `history` and saves it if anything changed.
pub(crate) fn refresh_balance(
    store: &mut dyn LeaveStore,
    employee: &Employee,
    history: &[LeaveApplication],
    calendar: &HolidaySet,
    today: Date,
) -> Result<RefreshedBalance, CoreError> {
    let mut balance: LeaveBalance = store.load_balance(employee.id)?;
    let rolled_over: bool = balance.ensure_current_year(today, employee.join_date);
    let usage: UsageTotals = UsageTotals::from_applications(history, today.year(), calendar);
    let recomputed: bool = balance.refresh(&usage, today);

    if rolled_over || recomputed {
        store.save_balance(employee.id, &balance)?;
        debug!(
            employee_id = %employee.id,
            rolled_over,
            casual_remaining = %balance.casual_leave_remaining,
            earned_remaining = %balance.earned_leave_remaining,
            "Saved refreshed leave balance"
        );
    }

    Ok(RefreshedBalance { balance, usage })
}

/// Refreshes an employee's balance and returns what is left in `bucket`.
pub(crate) fn remaining_after_refresh(
    store: &mut dyn LeaveStore,
    employee: &Employee,
    bucket: LeaveBucket,
    today: Date,
) -> Result<Days, CoreError> {
    let history: Vec<LeaveApplication> =
        store.applications_of(employee.id, &LeaveStatus::RESERVED)?;
    let calendar: HolidaySet = load_calendar(store, today, today, today)?;
    let refreshed: RefreshedBalance = refresh_balance(store, employee, &history, &calendar, today)?;
    Ok(refreshed.balance.remaining(bucket))
}

/// The balance view of `actor`.
pub(crate) fn balance_report(
    store: &mut dyn LeaveStore,
    actor: EmployeeId,
    today: Date,
) -> Result<BalanceReport, CoreError> {
    let employee: Employee = load_employee(store, actor)?;
    if !employee.role.can_apply_for_leave() {
        return Ok(BalanceReport::default());
    }

    let history: Vec<LeaveApplication> = store.applications_of(actor, &LeaveStatus::RESERVED)?;
    let calendar: HolidaySet = load_calendar(store, today, today, today)?;
    let refreshed: RefreshedBalance = refresh_balance(store, &employee, &history, &calendar, today)?;
    Ok(build_balance_report(&employee, &refreshed.balance, today))
}

/// Casual leave available to `actor` for a given month.
///
/// This is the leave accrued from the employee's start month through
/// `month`, less casual leave reserved in `year`. Months before the employee
/// joined have nothing available.
pub(crate) fn available_cl_for_month(
    store: &mut dyn LeaveStore,
    actor: EmployeeId,
    year: i32,
    month: u8,
    today: Date,
) -> Result<Days, CoreError> {
    month_bounds(year, month)?;
    let employee: Employee = load_employee(store, actor)?;
    let Some(start_month) = cl_start_month(employee.join_date, year) else {
        return Ok(Days::ZERO);
    };
    if month < start_month {
        return Ok(Days::ZERO);
    }

    let accrued: Days = (start_month..=month).map(|_| CL_MONTHLY_ACCRUAL).sum();
    let history: Vec<LeaveApplication> = store.applications_of(actor, &LeaveStatus::RESERVED)?;
    let (year_start, year_end) = year_bounds(year)?;
    let calendar: HolidaySet = load_calendar(store, today, year_start, year_end)?;
    let used: Days = UsageTotals::from_applications(&history, year, &calendar).casual;
    Ok(accrued.saturating_sub(used))
}
