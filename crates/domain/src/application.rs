// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::{HolidayCalendar, add_days, required_days};
use crate::days::Days;
use crate::error::DomainError;
use crate::leave_type::LeaveType;
use crate::policy::CANCELLATION_GRACE_DAYS;
use crate::types::{ApplicationId, EmployeeId, LeaveStatus};
use serde::{Deserialize, Serialize};
use time::Date;

/// Returns `true` if two inclusive date ranges share at least one day.
#[must_use]
pub fn ranges_overlap(a_start: Date, a_end: Date, b_start: Date, b_end: Date) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// A leave request as submitted by an employee.
///
/// `end_date` may be omitted for half-day and fixed-duration types, whose
/// end date is always derived from the start date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveDraft {
    /// Requested leave type.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: Date,
    /// Last day of leave.
    pub end_date: Option<Date>,
    /// Free-text reason.
    pub reason: String,
}

/// A validated application ready to be stored.
///
/// New applications are always stored as pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaveApplication {
    /// Applicant.
    pub employee_id: EmployeeId,
    /// Leave type.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: Date,
    /// Last day of leave.
    pub end_date: Date,
    /// Free-text reason.
    pub reason: String,
    /// Day the request was made.
    pub applied_on: Date,
    /// The applicant's manager at application time.
    pub approver_id: EmployeeId,
    /// Bucket balance left once this request is counted.
    ///
    /// This is the remainder after the request, unlike the snapshot a
    /// decision records, which is the refreshed balance at decision time.
    pub remaining_leaves: Days,
    /// Whether the request covers half a day.
    pub is_half_day: bool,
    /// Applicant's department at application time.
    pub department: Option<String>,
}

/// A stored leave application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveApplication {
    /// Identifier.
    pub id: ApplicationId,
    /// Applicant.
    pub employee_id: EmployeeId,
    /// Leave type.
    pub leave_type: LeaveType,
    /// First day of leave.
    pub start_date: Date,
    /// Last day of leave.
    pub end_date: Date,
    /// Free-text reason.
    pub reason: String,
    /// Current status.
    pub status: LeaveStatus,
    /// Day the request was made.
    pub applied_on: Date,
    /// The approver fixed at application time.
    pub approver_id: EmployeeId,
    /// Bucket balance recorded at the last apply or decision.
    ///
    /// At apply the request is already deducted from it. Approve and cancel
    /// overwrite it with the refreshed bucket remainder.
    pub remaining_leaves: Option<Days>,
    /// Whether the application covers half a day.
    pub is_half_day: bool,
    /// Applicant's department at application time.
    pub department: Option<String>,
}

impl LeaveApplication {
    /// Materializes a stored application from a new one and its identifier.
    #[must_use]
    pub fn from_new(id: ApplicationId, new: NewLeaveApplication) -> Self {
        Self {
            id,
            employee_id: new.employee_id,
            leave_type: new.leave_type,
            start_date: new.start_date,
            end_date: new.end_date,
            reason: new.reason,
            status: LeaveStatus::Pending,
            applied_on: new.applied_on,
            approver_id: new.approver_id,
            remaining_leaves: Some(new.remaining_leaves),
            is_half_day: new.is_half_day,
            department: new.department,
        }
    }

    /// Returns `true` if this application shares a day with `start..=end`.
    #[must_use]
    pub fn overlaps(&self, start: Date, end: Date) -> bool {
        ranges_overlap(self.start_date, self.end_date, start, end)
    }

    /// Returns `true` if this application covers `date`.
    #[must_use]
    pub fn covers(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Leave this application consumes from its bucket.
    #[must_use]
    pub fn required_days(&self, calendar: &dyn HolidayCalendar) -> Days {
        required_days(
            self.leave_type,
            self.start_date,
            self.end_date,
            self.is_half_day,
            calendar,
        )
    }

    /// Last day on which an approved application may still be cancelled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if the deadline is out of range.
    pub fn cancellation_deadline(&self) -> Result<Date, DomainError> {
        add_days(self.end_date, CANCELLATION_GRACE_DAYS)
    }

    /// Returns `true` if the application can still be cancelled on `today`.
    #[must_use]
    pub fn is_cancellable_on(&self, today: Date) -> bool {
        self.status == LeaveStatus::Approved
            && self
                .cancellation_deadline()
                .is_ok_and(|deadline| today <= deadline)
    }
}
