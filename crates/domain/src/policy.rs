// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave policy constants and the pure rules that enforce them.
//!
//! The checks in this module take every input they need as plain values.
//! Gathering those values (usage totals, the latest advance leave, the
//! accrued casual leave) is the engine's job; deciding whether a request
//! is acceptable is done here.

use crate::balance::EarnedLeaveUsage;
use crate::calendar::{YearHalf, add_days, inclusive_day_count};
use crate::days::Days;
use crate::error::DomainError;
use crate::leave_type::{LeaveBucket, LeaveType};
use crate::types::{Employee, Gender};
use time::Date;

/// Days before today a casual leave may start.
pub const CL_BACKDATE_DAYS: u8 = 6;

/// Casual leave accrued for each month of service.
pub const CL_MONTHLY_ACCRUAL: Days = Days::whole(1);

/// Casual leave that may be taken in a single month.
pub const CL_MONTHLY_CAP: Days = Days::whole(1);

/// Earned leave allotted to each half of the year.
pub const EL_HALF_ALLOTMENT: Days = Days::whole(10);

/// Earned leave that may be taken across a whole year.
pub const EL_ANNUAL_CEILING: Days = Days::whole(20);

/// Inclusive length of a maternity leave.
pub const ML_DURATION_DAYS: u32 = 182;

/// Inclusive length of a paternity leave.
pub const PL_DURATION_DAYS: u32 = 15;

/// Leave without pay that may be taken in a year.
pub const LWP_ANNUAL_CEILING: Days = Days::whole(300);

/// Days after an approved leave ends during which it may still be cancelled.
pub const CANCELLATION_GRACE_DAYS: i64 = 15;

// ============================================================================
// Request shape
// ============================================================================

/// Rejects roles that hold no leave entitlement.
///
/// # Errors
///
/// Returns `DomainError::RoleNotEligible` for administrator roles.
pub const fn check_role(employee: &Employee) -> Result<(), DomainError> {
    if employee.role.can_apply_for_leave() {
        Ok(())
    } else {
        Err(DomainError::RoleNotEligible {
            role: employee.role,
        })
    }
}

/// Checks the start date against today and the type's backdating window.
///
/// # Errors
///
/// Returns `DomainError::StartDateInPast` for types that cannot be backdated,
/// or `DomainError::BackdateWindowExceeded` when the window is exceeded.
pub fn check_start_date(leave_type: LeaveType, start_date: Date, today: Date) -> Result<(), DomainError> {
    let backdate_days: u8 = leave_type.rules().backdate_days;
    if backdate_days == 0 {
        if start_date < today {
            return Err(DomainError::StartDateInPast { start_date, today });
        }
        return Ok(());
    }

    let earliest: Date = add_days(today, -i64::from(backdate_days))?;
    if start_date < earliest {
        return Err(DomainError::BackdateWindowExceeded {
            start_date,
            earliest,
        });
    }
    Ok(())
}

/// Rejects an end date that precedes the start date.
///
/// # Errors
///
/// Returns `DomainError::EndBeforeStart`.
pub fn check_date_order(start_date: Date, end_date: Date) -> Result<(), DomainError> {
    if end_date < start_date {
        return Err(DomainError::EndBeforeStart {
            start_date,
            end_date,
        });
    }
    Ok(())
}

/// Enforces the gender restriction of maternity and paternity leave.
///
/// # Errors
///
/// Returns `DomainError::GenderRestricted` if the type is not available to `gender`.
pub fn check_gender(leave_type: LeaveType, gender: Gender) -> Result<(), DomainError> {
    match leave_type.rules().gender {
        Some(required) if required != gender => Err(DomainError::GenderRestricted {
            leave_type,
            required,
        }),
        _ => Ok(()),
    }
}

/// Computes the end date of a fixed-duration leave.
///
/// Returns `None` for types without a fixed duration.
///
/// # Errors
///
/// Returns `DomainError::FixedDurationMismatch` if the computed range does not
/// span exactly the fixed number of days, or `DomainError::DateArithmeticOverflow`.
pub fn fixed_end_date(leave_type: LeaveType, start_date: Date) -> Result<Option<Date>, DomainError> {
    let Some(duration) = leave_type.rules().fixed_duration else {
        return Ok(None);
    };

    let end_date: Date = add_days(start_date, i64::from(duration) - 1)?;
    let actual: u32 = inclusive_day_count(start_date, end_date);
    if actual != duration {
        return Err(DomainError::FixedDurationMismatch {
            leave_type,
            expected: duration,
            actual,
        });
    }
    Ok(Some(end_date))
}

fn check_current_year(leave_type: LeaveType, start_date: Date, today: Date) -> Result<(), DomainError> {
    if start_date.year() != today.year() {
        return Err(DomainError::OutsideCurrentYear {
            leave_type,
            requested_year: start_date.year(),
            current_year: today.year(),
        });
    }
    Ok(())
}

// ============================================================================
// Casual leave
// ============================================================================

/// Everything needed to decide a casual leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasualLeaveCheck {
    /// Requested type (CL or half-day CL).
    pub leave_type: LeaveType,
    /// Evaluation date.
    pub today: Date,
    /// The applicant's join date.
    pub join_date: Date,
    /// Requested start date.
    pub start_date: Date,
    /// Days the request consumes.
    pub required: Days,
    /// Casual leave already reserved in the target month.
    pub reserved_in_month: Days,
    /// Casual leave already reserved in the current year.
    pub reserved_this_year: Days,
    /// Casual leave accrued from the start month through the target month.
    pub accrued_through_month: Days,
    /// Start of the latest reserved casual leave that begins after today.
    pub latest_advance_start: Option<Date>,
}

impl CasualLeaveCheck {
    /// Casual leave still available for the target month.
    #[must_use]
    pub const fn available(&self) -> Days {
        self.accrued_through_month
            .saturating_sub(self.reserved_this_year)
    }
}

/// Applies the casual leave rules.
///
/// Rules, in order:
/// 1. The leave must fall in the current year.
/// 2. In the join year, the target month must not precede the join month.
/// 3. At most one casual leave day per month.
/// 4. An earlier month cannot be taken while an advance leave exists for a
///    later month.
/// 5. Accrued leave through the target month, less leave already reserved,
///    must cover the request.
///
/// # Errors
///
/// Returns the `DomainError` for the first rule that fails.
pub fn check_casual_leave(check: &CasualLeaveCheck) -> Result<(), DomainError> {
    check_current_year(check.leave_type, check.start_date, check.today)?;

    let month: u8 = check.start_date.month() as u8;
    let join_month: u8 = check.join_date.month() as u8;
    let joined_later: bool = check.join_date.year() > check.start_date.year();
    let joined_this_year_later_month: bool =
        check.join_date.year() == check.start_date.year() && month < join_month;
    if joined_later || joined_this_year_later_month {
        return Err(DomainError::BeforeJoinMonth { month, join_month });
    }

    if check.reserved_in_month + check.required > CL_MONTHLY_CAP {
        return Err(DomainError::MonthlyClCapExceeded {
            year: check.start_date.year(),
            month,
            used: check.reserved_in_month,
        });
    }

    if let Some(latest_advance) = check.latest_advance_start {
        let same_month: bool = latest_advance.year() == check.start_date.year()
            && latest_advance.month() == check.start_date.month();
        if check.start_date < latest_advance && !same_month {
            return Err(DomainError::AdvanceClOrdering {
                latest_advance,
                start_date: check.start_date,
            });
        }
    }

    let available: Days = check.available();
    if available < check.required {
        return Err(DomainError::InsufficientBalance {
            bucket: LeaveBucket::CasualLeave,
            requested: check.required,
            available,
        });
    }
    Ok(())
}

// ============================================================================
// Earned leave
// ============================================================================

/// Everything needed to decide an earned leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarnedLeaveCheck {
    /// Requested type (EL or half-day EL).
    pub leave_type: LeaveType,
    /// Evaluation date.
    pub today: Date,
    /// Requested start date.
    pub start_date: Date,
    /// Days the request consumes.
    pub required: Days,
    /// Earned leave already reserved this year, by half.
    pub usage: EarnedLeaveUsage,
}

impl EarnedLeaveCheck {
    /// Earned leave that a request in the target half may still draw.
    ///
    /// Returns `None` when the target half is closed to new requests.
    #[must_use]
    pub fn available(&self) -> Option<Days> {
        let used_first: Days = self.usage.first_half;
        let used_second: Days = self.usage.second_half;
        let annual_left: Days = EL_ANNUAL_CEILING.saturating_sub(used_first + used_second);

        match (YearHalf::of(self.start_date), YearHalf::of(self.today)) {
            (YearHalf::First, YearHalf::Second) => None,
            (YearHalf::First, YearHalf::First) => Some(
                EL_HALF_ALLOTMENT
                    .saturating_sub(used_second)
                    .saturating_sub(used_first),
            ),
            (YearHalf::Second, YearHalf::First) => Some(annual_left),
            (YearHalf::Second, YearHalf::Second) => {
                let half_left: Days =
                    (EL_HALF_ALLOTMENT + self.usage.carryover()).saturating_sub(used_second);
                Some(half_left.min(annual_left))
            }
        }
    }
}

/// Applies the earned leave rules.
///
/// The first half of the year (January to June) carries an allotment of 10
/// days and the second half 10 days plus any unused first-half allotment,
/// never exceeding 20 days across the year. First-half leave cannot be
/// requested once the second half has begun.
///
/// # Errors
///
/// Returns `DomainError::OutsideCurrentYear`, `DomainError::FirstHalfClosed`,
/// or `DomainError::InsufficientBalance`.
pub fn check_earned_leave(check: &EarnedLeaveCheck) -> Result<(), DomainError> {
    check_current_year(check.leave_type, check.start_date, check.today)?;

    let Some(available) = check.available() else {
        return Err(DomainError::FirstHalfClosed {
            start_date: check.start_date,
        });
    };
    if check.required > available {
        return Err(DomainError::InsufficientBalance {
            bucket: LeaveBucket::EarnedLeave,
            requested: check.required,
            available,
        });
    }
    Ok(())
}

// ============================================================================
// Bucket limits
// ============================================================================

/// Checks a request against the live balance of its bucket.
///
/// # Errors
///
/// Returns `DomainError::InsufficientBalance` if `available` is short.
pub const fn check_bucket_balance(
    bucket: LeaveBucket,
    required: Days,
    available: Days,
) -> Result<(), DomainError> {
    if available.halves() < required.halves() {
        return Err(DomainError::InsufficientBalance {
            bucket,
            requested: required,
            available,
        });
    }
    Ok(())
}

/// Checks cumulative usage against the bucket's annual ceiling, if any.
///
/// # Errors
///
/// Returns `DomainError::AnnualCapExceeded` if the request would exceed it.
pub fn check_annual_ceiling(bucket: LeaveBucket, used: Days, required: Days) -> Result<(), DomainError> {
    match bucket.annual_ceiling() {
        Some(ceiling) if used + required > ceiling => Err(DomainError::AnnualCapExceeded {
            bucket,
            ceiling,
            used,
            requested: required,
        }),
        _ => Ok(()),
    }
}
