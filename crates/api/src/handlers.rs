// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Each handler parses its request, runs one engine operation on behalf of
//! the authenticated actor and shapes the result for the wire.

use leave_ledger::{
    ApplicationSummary, ApproverStats, Clock, CoreError, DepartmentOverview, LeaveEngine,
    UnitOfWork,
};
use leave_ledger_domain::{
    ApplicationId, BalanceReport, Days, LeaveApplication, LeaveDraft, LeaveType, parse_iso_date,
};
use time::Date;
use tracing::{info, warn};

use crate::auth::AuthenticatedActor;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    ApplyLeaveRequest, ApplyLeaveResponse, ApproverStatsResponse, BalanceResponse,
    ClAvailabilityRequest, ClAvailabilityResponse, DepartmentOverviewResponse,
    LeaveApplicationResponse, LeaveDecisionResponse, ListLeavesResponse,
};

fn parse_date(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_iso_date(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

/// Converts the wire request into a draft.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown leave type or an
/// unparseable date.
pub fn parse_apply_request(request: &ApplyLeaveRequest) -> Result<LeaveDraft, ApiError> {
    let leave_type: LeaveType = request
        .leave_type
        .parse::<LeaveType>()
        .map_err(translate_domain_error)?;
    let start_date: Date = parse_date("start_date", &request.start_date)?;
    let end_date: Option<Date> = request
        .end_date
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(|value| parse_date("end_date", value))
        .transpose()?;

    Ok(LeaveDraft {
        leave_type,
        start_date,
        end_date,
        reason: request.reason.trim().to_string(),
    })
}

/// Applies for leave.
///
/// # Arguments
///
/// * `engine` - The leave engine
/// * `request` - The leave request
/// * `actor` - The applying employee
///
/// # Errors
///
/// Returns an error if the request is malformed, violates a leave rule,
/// the applicant has no approver, or the store fails.
pub fn apply_leave<S, C>(
    engine: &mut LeaveEngine<S, C>,
    request: &ApplyLeaveRequest,
    actor: &AuthenticatedActor,
) -> Result<ApplyLeaveResponse, ApiError>
where
    S: UnitOfWork,
    C: Clock,
{
    let draft: LeaveDraft = parse_apply_request(request)?;
    let saved: LeaveApplication = engine
        .apply(actor.employee_id, draft)
        .map_err(|e| translate_core_error("apply for leave", e))?;

    Ok(ApplyLeaveResponse {
        message: format!(
            "Leave application {} submitted to employee {}",
            saved.id, saved.approver_id
        ),
        application: LeaveApplicationResponse::from_application(&saved, None),
    })
}

/// Lists the actor's own applications, newest first.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_my_leaves<S, C>(
    engine: &mut LeaveEngine<S, C>,
    actor: &AuthenticatedActor,
) -> Result<ListLeavesResponse, ApiError>
where
    S: UnitOfWork,
    C: Clock,
{
    let summaries: Vec<ApplicationSummary> = engine
        .list_mine(actor.employee_id)
        .map_err(|e| translate_core_error("list leave", e))?;
    Ok(ListLeavesResponse::from_summaries(&summaries))
}

/// Returns the actor's balance.
///
/// # Errors
///
/// Returns an error if the actor is unknown or the store fails.
pub fn get_balance<S, C>(
    engine: &mut LeaveEngine<S, C>,
    actor: &AuthenticatedActor,
) -> Result<BalanceResponse, ApiError>
where
    S: UnitOfWork,
    C: Clock,
{
    let report: BalanceReport = engine
        .balance(actor.employee_id)
        .map_err(|e| translate_core_error("view balance", e))?;
    Ok(BalanceResponse::from_report(actor.employee_id.value(), &report))
}

/// Returns the casual leave the actor can take in one month.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a month outside 1-12, or an error
/// if the actor is unknown or the store fails.
pub fn get_cl_availability<S, C>(
    engine: &mut LeaveEngine<S, C>,
    request: ClAvailabilityRequest,
    actor: &AuthenticatedActor,
) -> Result<ClAvailabilityResponse, ApiError>
where
    S: UnitOfWork,
    C: Clock,
{
    let available: Days = engine
        .available_cl_for_month(actor.employee_id, request.year, request.month)
        .map_err(|e| translate_core_error("view casual leave availability", e))?;
    Ok(ClAvailabilityResponse {
        year: request.year,
        month: request.month,
        available: available.as_f64(),
    })
}

/// Lists applications awaiting the actor's decision.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_pending<S, C>(
    engine: &mut LeaveEngine<S, C>,
    actor: &AuthenticatedActor,
) -> Result<ListLeavesResponse, ApiError>
where
    S: UnitOfWork,
    C: Clock,
{
    let summaries: Vec<ApplicationSummary> = engine
        .pending_for_approver(actor.employee_id)
        .map_err(|e| translate_core_error("list pending leave", e))?;
    Ok(ListLeavesResponse::from_summaries(&summaries))
}

/// Lists approved applications the actor can still cancel.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_cancellable<S, C>(
    engine: &mut LeaveEngine<S, C>,
    actor: &AuthenticatedActor,
) -> Result<ListLeavesResponse, ApiError>
where
    S: UnitOfWork,
    C: Clock,
{
    let summaries: Vec<ApplicationSummary> = engine
        .cancellable_for_approver(actor.employee_id)
        .map_err(|e| translate_core_error("list cancellable leave", e))?;
    Ok(ListLeavesResponse::from_summaries(&summaries))
}

/// Returns the actor's decision counts.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn get_approver_stats<S, C>(
    engine: &mut LeaveEngine<S, C>,
    actor: &AuthenticatedActor,
) -> Result<ApproverStatsResponse, ApiError>
where
    S: UnitOfWork,
    C: Clock,
{
    let stats: ApproverStats = engine
        .approver_stats(actor.employee_id)
        .map_err(|e| translate_core_error("view approver statistics", e))?;
    Ok(ApproverStatsResponse::from(stats))
}

/// Returns pending and current leave across the actor's department.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` if the actor does not review department
/// leave, or an error if the actor is unknown or the store fails.
pub fn get_department_overview<S, C>(
    engine: &mut LeaveEngine<S, C>,
    actor: &AuthenticatedActor,
) -> Result<DepartmentOverviewResponse, ApiError>
where
    S: UnitOfWork,
    C: Clock,
{
    let overview: DepartmentOverview = engine
        .department_overview(actor.employee_id)
        .map_err(|e| translate_core_error("view department leave", e))?;
    Ok(DepartmentOverviewResponse::from(&overview))
}

/// A decision on a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveDecision {
    /// Approve a pending application.
    Approve,
    /// Reject a pending application.
    Reject,
    /// Cancel an approved application.
    Cancel,
}

impl LeaveDecision {
    const fn action(self) -> &'static str {
        match self {
            Self::Approve => "approve leave",
            Self::Reject => "reject leave",
            Self::Cancel => "cancel leave",
        }
    }

    const fn past_tense(self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Reject => "rejected",
            Self::Cancel => "cancelled",
        }
    }
}

/// Approves, rejects or cancels an application.
///
/// # Arguments
///
/// * `engine` - The leave engine
/// * `application_id` - The application to decide
/// * `decision` - The decision to record
/// * `actor` - The deciding employee
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` if the actor is not the application's
/// approver, `ApiError::InvalidState` if the application cannot take the
/// decision, `ApiError::ResourceNotFound` for an unknown application, or
/// `ApiError::Internal` if the store fails.
pub fn decide_leave<S, C>(
    engine: &mut LeaveEngine<S, C>,
    application_id: i64,
    decision: LeaveDecision,
    actor: &AuthenticatedActor,
) -> Result<LeaveDecisionResponse, ApiError>
where
    S: UnitOfWork,
    C: Clock,
{
    let id: ApplicationId = ApplicationId::new(application_id);
    let outcome: Result<LeaveApplication, CoreError> = match decision {
        LeaveDecision::Approve => engine.approve(actor.employee_id, id),
        LeaveDecision::Reject => engine.reject(actor.employee_id, id),
        LeaveDecision::Cancel => engine.cancel(actor.employee_id, id),
    };

    let application: LeaveApplication = outcome.map_err(|e| {
        warn!(
            application_id,
            actor = %actor.employee_id,
            error = %e,
            "Leave decision refused"
        );
        translate_core_error(decision.action(), e)
    })?;

    info!(
        application_id,
        actor = %actor.employee_id,
        status = %application.status,
        "Leave decision recorded"
    );
    Ok(LeaveDecisionResponse {
        message: format!(
            "Leave application {} {}",
            application.id,
            decision.past_tense()
        ),
        application: LeaveApplicationResponse::from_application(&application, None),
    })
}
