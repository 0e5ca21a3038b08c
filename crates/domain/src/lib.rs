// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod application;
mod balance;
mod calendar;
mod days;
mod error;
mod hierarchy;
mod leave_type;
pub mod policy;
mod types;

#[cfg(test)]
mod tests;

pub use application::{LeaveApplication, LeaveDraft, NewLeaveApplication, ranges_overlap};
pub use balance::{
    BalanceReport, BucketSummary, EarnedLeaveDetail, EarnedLeaveUsage, LeaveBalance, UsageTotals,
    build_balance_report, cl_annual_total, cl_start_month,
};
pub use calendar::{
    HolidayCalendar, HolidaySet, YearHalf, add_days, inclusive_day_count, month_bounds,
    parse_iso_date, required_days, working_day_count, year_bounds,
};
pub use days::Days;
pub use error::{DomainError, OverlapConflict};
pub use hierarchy::OrgIndex;
pub use leave_type::{DayCountRule, LeaveBucket, LeaveType, LeaveTypeRules};
pub use types::{ApplicationId, Employee, EmployeeId, Gender, LeaveStatus, Role};
