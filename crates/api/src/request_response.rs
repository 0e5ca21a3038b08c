// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross the boundary as ISO-8601 strings and day quantities as
//! decimals, so a half day reads as `0.5`.

use leave_ledger::{ApplicationSummary, ApproverStats, DepartmentOverview};
use leave_ledger_domain::{
    BalanceReport, BucketSummary, Days, EarnedLeaveDetail, LeaveApplication, LeaveBucket,
};
use serde::{Deserialize, Serialize};

/// API request to apply for leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyLeaveRequest {
    /// Leave type code (CL, EL, ML, PL, LWP, `HALF_DAY_CL`, `HALF_DAY_EL`, `HALF_DAY_LWP`).
    pub leave_type: String,
    /// First day of leave (ISO 8601).
    pub start_date: String,
    /// Last day of leave (ISO 8601). Defaults to the start date; ignored for
    /// half-day and fixed-duration leave.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

/// API request for casual leave availability in one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClAvailabilityRequest {
    /// Calendar year.
    pub year: i32,
    /// Month of the year, 1-12.
    pub month: u8,
}

/// A leave application as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveApplicationResponse {
    /// Application identifier.
    pub application_id: i64,
    /// The applying employee.
    pub employee_id: i64,
    /// Name of the applying employee, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,
    /// Leave type code.
    pub leave_type: String,
    /// First day of leave.
    pub start_date: String,
    /// Last day of leave.
    pub end_date: String,
    /// Free-text reason.
    pub reason: String,
    /// Status (PENDING, APPROVED, REJECTED, CANCELLED).
    pub status: String,
    /// Day the application was made.
    pub applied_on: String,
    /// The manager who decides the application.
    pub approver_id: i64,
    /// Balance left in the bucket after this application.
    pub remaining_leaves: Option<f64>,
    /// Whether this is a half-day application.
    pub is_half_day: bool,
    /// The applicant's department when the application was made.
    pub department: Option<String>,
}

impl LeaveApplicationResponse {
    /// Builds the response for an application.
    #[must_use]
    pub fn from_application(application: &LeaveApplication, employee_name: Option<String>) -> Self {
        Self {
            application_id: application.id.value(),
            employee_id: application.employee_id.value(),
            employee_name,
            leave_type: application.leave_type.code().to_string(),
            start_date: application.start_date.to_string(),
            end_date: application.end_date.to_string(),
            reason: application.reason.clone(),
            status: application.status.as_str().to_string(),
            applied_on: application.applied_on.to_string(),
            approver_id: application.approver_id.value(),
            remaining_leaves: application.remaining_leaves.map(Days::as_f64),
            is_half_day: application.is_half_day,
            department: application.department.clone(),
        }
    }

    /// Builds the response for a listed application.
    #[must_use]
    pub fn from_summary(summary: &ApplicationSummary) -> Self {
        Self::from_application(&summary.application, Some(summary.employee_name.clone()))
    }
}

fn summaries_to_responses(summaries: &[ApplicationSummary]) -> Vec<LeaveApplicationResponse> {
    summaries
        .iter()
        .map(LeaveApplicationResponse::from_summary)
        .collect()
}

/// API response for a submitted application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyLeaveResponse {
    /// The stored application.
    pub application: LeaveApplicationResponse,
    /// A success message.
    pub message: String,
}

/// API response for an approve, reject or cancel decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveDecisionResponse {
    /// The application after the decision.
    pub application: LeaveApplicationResponse,
    /// A success message.
    pub message: String,
}

/// API response listing applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListLeavesResponse {
    /// The applications, newest first.
    pub applications: Vec<LeaveApplicationResponse>,
}

impl ListLeavesResponse {
    /// Builds the response from listed applications.
    #[must_use]
    pub fn from_summaries(summaries: &[ApplicationSummary]) -> Self {
        Self {
            applications: summaries_to_responses(summaries),
        }
    }
}

/// Balance of one leave bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketBalanceInfo {
    /// Bucket code (CL, EL, ML, PL, LWP).
    pub leave_type: String,
    /// Leave the bucket holds for the year.
    pub total: f64,
    /// Leave reserved from the bucket.
    pub used: f64,
    /// Leave still available.
    pub remaining: f64,
}

impl BucketBalanceInfo {
    fn new(bucket: LeaveBucket, summary: &BucketSummary) -> Self {
        Self {
            leave_type: bucket.code().to_string(),
            total: summary.total.as_f64(),
            used: summary.used.as_f64(),
            remaining: summary.remaining.as_f64(),
        }
    }
}

/// Earned leave broken down by half year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarnedLeaveInfo {
    /// Reserved January through June.
    pub used_first_half: f64,
    /// Reserved July through December.
    pub used_second_half: f64,
    /// First-half allotment rolled into the second half.
    pub carryover: f64,
}

impl From<&EarnedLeaveDetail> for EarnedLeaveInfo {
    fn from(detail: &EarnedLeaveDetail) -> Self {
        Self {
            used_first_half: detail.used_first_half.as_f64(),
            used_second_half: detail.used_second_half.as_f64(),
            carryover: detail.carryover.as_f64(),
        }
    }
}

/// API response for an employee's balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// The employee.
    pub employee_id: i64,
    /// Per-bucket balances. Empty for employees without leave entitlement.
    pub balances: Vec<BucketBalanceInfo>,
    /// Earned leave detail.
    pub earned_leave: Option<EarnedLeaveInfo>,
}

impl BalanceResponse {
    /// Builds the response from a balance report.
    #[must_use]
    pub fn from_report(employee_id: i64, report: &BalanceReport) -> Self {
        Self {
            employee_id,
            balances: report
                .buckets
                .iter()
                .map(|(bucket, summary)| BucketBalanceInfo::new(*bucket, summary))
                .collect(),
            earned_leave: report.earned_leave.as_ref().map(EarnedLeaveInfo::from),
        }
    }

    /// Balance of the bucket with `code`, if shown.
    #[must_use]
    pub fn bucket(&self, code: &str) -> Option<&BucketBalanceInfo> {
        self.balances.iter().find(|info| info.leave_type == code)
    }
}

/// API response for casual leave availability in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClAvailabilityResponse {
    /// Calendar year.
    pub year: i32,
    /// Month of the year.
    pub month: u8,
    /// Casual leave that can still be taken in the month.
    pub available: f64,
}

/// API response with an approver's decision counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproverStatsResponse {
    /// Applications awaiting a decision.
    pub pending: u64,
    /// Applications approved.
    pub approved: u64,
    /// Applications rejected.
    pub rejected: u64,
}

impl From<ApproverStats> for ApproverStatsResponse {
    fn from(stats: ApproverStats) -> Self {
        Self {
            pending: stats.pending,
            approved: stats.approved,
            rejected: stats.rejected,
        }
    }
}

/// API response with pending and current leave across a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentOverviewResponse {
    /// The department, absent when the reviewer has none.
    pub department: Option<String>,
    /// Applications awaiting a decision.
    pub pending: Vec<LeaveApplicationResponse>,
    /// Approved leave covering today.
    pub on_leave_today: Vec<LeaveApplicationResponse>,
}

impl From<&DepartmentOverview> for DepartmentOverviewResponse {
    fn from(overview: &DepartmentOverview) -> Self {
        Self {
            department: overview.department.clone(),
            pending: summaries_to_responses(&overview.pending),
            on_leave_today: summaries_to_responses(&overview.on_leave_today),
        }
    }
}
