// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::balance::{RefreshedBalance, load_calendar, load_employee, refresh_balance};
use crate::error::CoreError;
use crate::ports::LeaveStore;
use leave_ledger_domain::policy::{
    self, CasualLeaveCheck, EarnedLeaveCheck, check_annual_ceiling, check_bucket_balance,
};
use leave_ledger_domain::{
    Days, DomainError, Employee, EmployeeId, HolidayCalendar, HolidaySet, LeaveApplication,
    LeaveBucket, LeaveDraft, LeaveStatus, LeaveType, LeaveTypeRules, NewLeaveApplication,
    OverlapConflict, month_bounds, required_days,
};
use time::Date;
use tracing::{debug, error, info};

/// Validates a leave draft and stores it as a pending application.
///
/// Rules are evaluated in a fixed order and the first failure is returned:
///
/// 1. The applicant's role must carry a leave entitlement.
/// 2. The start date must respect the type's backdating window, and the
///    end date must not precede the start date.
/// 3. Maternity and paternity leave are gender restricted.
/// 4. Fixed-duration leave has its end date computed from the start date.
/// 5. The applicant must have a manager to route the request to.
/// 6. Half-day leave cannot fall on a holiday or on a day that already
///    carries a reserved half-day leave.
/// 7. The range must not overlap a reserved application.
/// 8. Casual and earned leave rules are applied to the required days.
/// 9. The live bucket balance and annual ceiling must cover the request.
///    For casual leave this is the balance accrued through the current
///    month, on top of the target-month accrual checked in step 8.
///
/// # Arguments
///
/// * `store` - The store, inside the current transaction
/// * `actor` - The applying employee
/// * `draft` - The requested leave
/// * `today` - The evaluation date
///
/// # Errors
///
/// Returns `CoreError::Validation` with the failing rule,
/// `CoreError::Configuration` if no approver can be resolved,
/// `CoreError::NotFound` if the applicant does not exist, or
/// `CoreError::Internal` if the store fails.
pub(crate) fn apply_leave(
    store: &mut dyn LeaveStore,
    actor: EmployeeId,
    draft: &LeaveDraft,
    today: Date,
) -> Result<LeaveApplication, CoreError> {
    let employee: Employee = load_employee(store, actor)?;
    let leave_type: LeaveType = draft.leave_type;
    let rules: &LeaveTypeRules = leave_type.rules();
    let start_date: Date = draft.start_date;

    policy::check_role(&employee)?;
    policy::check_start_date(leave_type, start_date, today)?;

    let requested_end: Date = if rules.half_day {
        start_date
    } else {
        draft.end_date.unwrap_or(start_date)
    };
    if !rules.half_day && rules.fixed_duration.is_none() {
        policy::check_date_order(start_date, requested_end)?;
    }

    policy::check_gender(leave_type, employee.gender)?;
    let end_date: Date = policy::fixed_end_date(leave_type, start_date)?.unwrap_or(requested_end);

    let approver_id: EmployeeId = resolve_approver(store, &employee)?;
    let calendar: HolidaySet = load_calendar(store, today, start_date, end_date)?;

    if rules.half_day {
        check_half_day(store, actor, start_date, &calendar)?;
    }
    check_overlap(store, actor, start_date, end_date)?;

    let required: Days = required_days(leave_type, start_date, end_date, rules.half_day, &calendar);
    debug!(
        employee_id = %actor,
        leave_type = %leave_type,
        required = %required,
        "Computed required leave days"
    );

    let history: Vec<LeaveApplication> = store.applications_of(actor, &LeaveStatus::RESERVED)?;
    let refreshed: RefreshedBalance = refresh_balance(store, &employee, &history, &calendar, today)?;

    let bucket: LeaveBucket = rules.bucket;
    let available: Days = match bucket {
        LeaveBucket::CasualLeave => {
            let check: CasualLeaveCheck = casual_leave_check(
                store, &employee, draft, required, today, &history, &calendar, &refreshed,
            )?;
            policy::check_casual_leave(&check)?;
            // Advance leave is bounded by what has accrued so far.
            check.available().min(refreshed.balance.remaining(bucket))
        }
        LeaveBucket::EarnedLeave => {
            let check: EarnedLeaveCheck = EarnedLeaveCheck {
                leave_type,
                today,
                start_date,
                required,
                usage: refreshed.usage.earned,
            };
            policy::check_earned_leave(&check)?;
            check.available().unwrap_or(Days::ZERO)
        }
        LeaveBucket::MaternityLeave | LeaveBucket::PaternityLeave | LeaveBucket::LeaveWithoutPay => {
            refreshed.balance.remaining(bucket)
        }
    };

    if bucket != LeaveBucket::LeaveWithoutPay {
        check_bucket_balance(bucket, required, available)?;
    }
    check_annual_ceiling(bucket, refreshed.usage.used(bucket), required)?;

    let new_application: NewLeaveApplication = NewLeaveApplication {
        employee_id: actor,
        leave_type,
        start_date,
        end_date,
        reason: draft.reason.clone(),
        applied_on: today,
        approver_id,
        remaining_leaves: refreshed.balance.remaining(bucket).saturating_sub(required),
        is_half_day: rules.half_day,
        department: employee.department.clone(),
    };
    let saved: LeaveApplication = store.insert_application(new_application)?;

    info!(
        application_id = %saved.id,
        employee_id = %actor,
        approver_id = %approver_id,
        leave_type = %leave_type,
        start_date = %start_date,
        end_date = %end_date,
        "Leave application submitted"
    );
    Ok(saved)
}

fn resolve_approver(store: &mut dyn LeaveStore, employee: &Employee) -> Result<EmployeeId, CoreError> {
    let Some(manager) = store.manager_of(employee.id)? else {
        error!(
            employee_id = %employee.id,
            reporting_to = ?employee.reporting_to,
            "Employee has no resolvable approver"
        );
        return Err(CoreError::Configuration(format!(
            "Employee {} has no reporting manager to approve leave",
            employee.id
        )));
    };
    Ok(manager.id)
}

fn check_half_day(
    store: &mut dyn LeaveStore,
    actor: EmployeeId,
    date: Date,
    calendar: &dyn HolidayCalendar,
) -> Result<(), CoreError> {
    if calendar.is_holiday(date) {
        return Err(DomainError::HalfDayOnHoliday { date }.into());
    }
    let same_day: Vec<LeaveApplication> =
        store.overlapping(actor, date, date, &LeaveStatus::RESERVED)?;
    if same_day.iter().any(|existing| existing.is_half_day) {
        return Err(DomainError::DuplicateHalfDay { date }.into());
    }
    Ok(())
}

fn check_overlap(
    store: &mut dyn LeaveStore,
    actor: EmployeeId,
    start_date: Date,
    end_date: Date,
) -> Result<(), CoreError> {
    let conflicts: Vec<OverlapConflict> = store
        .overlapping(actor, start_date, end_date, &LeaveStatus::RESERVED)?
        .into_iter()
        .map(|existing| OverlapConflict {
            application_id: existing.id,
            leave_type: existing.leave_type,
            start_date: existing.start_date,
            end_date: existing.end_date,
        })
        .collect();
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(DomainError::OverlappingLeave { conflicts }.into())
    }
}

#[allow(clippy::too_many_arguments)]
fn casual_leave_check(
    store: &mut dyn LeaveStore,
    employee: &Employee,
    draft: &LeaveDraft,
    required: Days,
    today: Date,
    history: &[LeaveApplication],
    calendar: &HolidaySet,
    refreshed: &RefreshedBalance,
) -> Result<CasualLeaveCheck, CoreError> {
    let start_date: Date = draft.start_date;
    let month: u8 = start_date.month() as u8;
    let (month_start, month_end) = month_bounds(start_date.year(), month)?;

    let casual_types: Vec<LeaveType> = LeaveBucket::CasualLeave.leave_types();
    let reserved_in_month: Days = store
        .starting_between(
            employee.id,
            &casual_types,
            month_start,
            month_end,
            &LeaveStatus::RESERVED,
        )?
        .iter()
        .map(|existing| existing.required_days(calendar))
        .sum();

    let latest_advance_start: Option<Date> = history
        .iter()
        .filter(|existing| existing.leave_type.bucket() == LeaveBucket::CasualLeave)
        .filter(|existing| existing.start_date > today)
        .map(|existing| existing.start_date)
        .max();

    let accrued_through_month: Days = if start_date.year() == today.year() {
        refreshed.balance.accrued_cl_through(month)
    } else {
        Days::ZERO
    };

    Ok(CasualLeaveCheck {
        leave_type: draft.leave_type,
        today,
        join_date: employee.join_date,
        start_date,
        required,
        reserved_in_month,
        reserved_this_year: refreshed.usage.casual,
        accrued_through_month,
        latest_advance_start,
    })
}
