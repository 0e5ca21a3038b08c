// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::days::Days;
use crate::leave_type::{LeaveBucket, LeaveType};
use crate::types::{ApplicationId, Gender, Role};
use time::Date;

/// An existing reserved application that collides with a new request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConflict {
    /// The conflicting application.
    pub application_id: ApplicationId,
    /// Its leave type.
    pub leave_type: LeaveType,
    /// First day of the conflicting range.
    pub start_date: Date,
    /// Last day of the conflicting range.
    pub end_date: Date,
}

/// Errors that can occur during domain validation.
///
/// Every variant names a specific policy reason so callers can report
/// exactly why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The employee's role may not apply for leave.
    RoleNotEligible {
        /// The barred role.
        role: Role,
    },
    /// The start date is before today for a type that cannot be backdated.
    StartDateInPast {
        /// The requested start date.
        start_date: Date,
        /// The date the request was evaluated on.
        today: Date,
    },
    /// The start date is older than the backdating window allows.
    BackdateWindowExceeded {
        /// The requested start date.
        start_date: Date,
        /// The earliest permitted start date.
        earliest: Date,
    },
    /// The end date precedes the start date.
    EndBeforeStart {
        /// The requested start date.
        start_date: Date,
        /// The requested end date.
        end_date: Date,
    },
    /// The leave type is restricted to a specific gender.
    GenderRestricted {
        /// The requested leave type.
        leave_type: LeaveType,
        /// The gender the type is restricted to.
        required: Gender,
    },
    /// A fixed-duration leave did not produce the expected day count.
    FixedDurationMismatch {
        /// The requested leave type.
        leave_type: LeaveType,
        /// The required inclusive day count.
        expected: u32,
        /// The computed inclusive day count.
        actual: u32,
    },
    /// A half-day leave was requested on a holiday.
    HalfDayOnHoliday {
        /// The requested date.
        date: Date,
    },
    /// A reserved half-day leave already exists on the date.
    DuplicateHalfDay {
        /// The requested date.
        date: Date,
    },
    /// The request overlaps one or more reserved applications.
    OverlappingLeave {
        /// The conflicting applications.
        conflicts: Vec<OverlapConflict>,
    },
    /// The bucket does not hold enough leave for the request.
    InsufficientBalance {
        /// The bucket drawn from.
        bucket: LeaveBucket,
        /// The requested amount.
        requested: Days,
        /// The amount still available.
        available: Days,
    },
    /// The request would take the bucket past its annual ceiling.
    AnnualCapExceeded {
        /// The bucket drawn from.
        bucket: LeaveBucket,
        /// The annual ceiling.
        ceiling: Days,
        /// The amount already reserved this year.
        used: Days,
        /// The requested amount.
        requested: Days,
    },
    /// More than one casual leave day in a single month.
    MonthlyClCapExceeded {
        /// The target year.
        year: i32,
        /// The target month (1-12).
        month: u8,
        /// The amount already reserved in that month.
        used: Days,
    },
    /// The leave falls outside the current calendar year.
    OutsideCurrentYear {
        /// The requested leave type.
        leave_type: LeaveType,
        /// The year of the requested start date.
        requested_year: i32,
        /// The current year.
        current_year: i32,
    },
    /// Casual leave requested for a month before the employee joined.
    BeforeJoinMonth {
        /// The requested month (1-12).
        month: u8,
        /// The join month (1-12).
        join_month: u8,
    },
    /// An earlier month cannot be taken while a later advance leave exists.
    AdvanceClOrdering {
        /// Start date of the latest advance casual leave.
        latest_advance: Date,
        /// The requested start date.
        start_date: Date,
    },
    /// First-half earned leave cannot be requested once the second half began.
    FirstHalfClosed {
        /// The requested start date.
        start_date: Date,
    },
    /// The reporting hierarchy contains a cycle.
    ReportingCycle {
        /// An employee on the cycle.
        employee_id: i64,
    },
    /// Leave type code is unknown.
    InvalidLeaveType(String),
    /// Role code is unknown.
    InvalidRole(String),
    /// Gender code is unknown.
    InvalidGender(String),
    /// Status code is unknown.
    InvalidStatus(String),
    /// Month number outside 1-12.
    InvalidMonth(u8),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoleNotEligible { role } => {
                write!(f, "Role {role} is not permitted to apply for leave")
            }
            Self::StartDateInPast { start_date, today } => {
                write!(
                    f,
                    "Start date {start_date} is before today ({today}); this leave type cannot be backdated"
                )
            }
            Self::BackdateWindowExceeded {
                start_date,
                earliest,
            } => {
                write!(
                    f,
                    "Start date {start_date} is too far in the past; earliest allowed is {earliest}"
                )
            }
            Self::EndBeforeStart {
                start_date,
                end_date,
            } => {
                write!(f, "End date {end_date} is before start date {start_date}")
            }
            Self::GenderRestricted {
                leave_type,
                required,
            } => {
                write!(
                    f,
                    "{} is only available to {} employees",
                    leave_type.code(),
                    required.as_str().to_lowercase()
                )
            }
            Self::FixedDurationMismatch {
                leave_type,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{} must span exactly {expected} days, got {actual}",
                    leave_type.code()
                )
            }
            Self::HalfDayOnHoliday { date } => {
                write!(f, "Half-day leave cannot be taken on holiday {date}")
            }
            Self::DuplicateHalfDay { date } => {
                write!(f, "A half-day leave already exists on {date}")
            }
            Self::OverlappingLeave { conflicts } => {
                write!(f, "Leave overlaps existing applications:")?;
                for conflict in conflicts {
                    write!(
                        f,
                        " #{} {} {} to {};",
                        conflict.application_id.value(),
                        conflict.leave_type.code(),
                        conflict.start_date,
                        conflict.end_date
                    )?;
                }
                Ok(())
            }
            Self::InsufficientBalance {
                bucket,
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient {} balance: requested {requested}, available {available}",
                    bucket.code()
                )
            }
            Self::AnnualCapExceeded {
                bucket,
                ceiling,
                used,
                requested,
            } => {
                write!(
                    f,
                    "{} annual limit of {ceiling} days exceeded: {used} already used, {requested} requested",
                    bucket.code()
                )
            }
            Self::MonthlyClCapExceeded { year, month, used } => {
                write!(
                    f,
                    "Only one CL day may be taken per month; {used} already taken in {year}-{month:02}"
                )
            }
            Self::OutsideCurrentYear {
                leave_type,
                requested_year,
                current_year,
            } => {
                write!(
                    f,
                    "{} can only be applied within the current year {current_year}, requested {requested_year}",
                    leave_type.code()
                )
            }
            Self::BeforeJoinMonth { month, join_month } => {
                write!(
                    f,
                    "CL cannot be applied for month {month} before the join month {join_month}"
                )
            }
            Self::AdvanceClOrdering {
                latest_advance,
                start_date,
            } => {
                write!(
                    f,
                    "CL for {start_date} cannot be applied while an advance CL exists on {latest_advance}"
                )
            }
            Self::FirstHalfClosed { start_date } => {
                write!(
                    f,
                    "First-half EL for {start_date} cannot be applied once the second half has begun"
                )
            }
            Self::ReportingCycle { employee_id } => {
                write!(f, "Reporting hierarchy contains a cycle at employee {employee_id}")
            }
            Self::InvalidLeaveType(code) => write!(f, "Invalid leave type: {code}"),
            Self::InvalidRole(code) => write!(f, "Invalid role: {code}"),
            Self::InvalidGender(code) => write!(f, "Invalid gender: {code}"),
            Self::InvalidStatus(code) => write!(f, "Invalid leave status: {code}"),
            Self::InvalidMonth(month) => write!(f, "Invalid month: {month}. Must be 1-12"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow: {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
