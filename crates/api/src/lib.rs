// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Leave Ledger.
//!
//! This crate turns wire requests into engine calls and engine results into
//! wire responses. It owns the request and response contract and the
//! translation of engine errors into [`ApiError`]; it knows nothing about
//! HTTP.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{ACTOR_HEADER, AuthenticatedActor};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    LeaveDecision, apply_leave, decide_leave, get_approver_stats, get_balance,
    get_cl_availability, get_department_overview, list_cancellable, list_my_leaves, list_pending,
    parse_apply_request,
};
pub use request_response::{
    ApplyLeaveRequest, ApplyLeaveResponse, ApproverStatsResponse, BalanceResponse,
    BucketBalanceInfo, ClAvailabilityRequest, ClAvailabilityResponse, DepartmentOverviewResponse,
    EarnedLeaveInfo, LeaveApplicationResponse, LeaveDecisionResponse, ListLeavesResponse,
};

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
