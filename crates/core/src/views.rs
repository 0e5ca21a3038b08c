// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only listings for applicants and approvers.

use crate::balance::load_employee;
use crate::error::CoreError;
use crate::ports::LeaveStore;
use leave_ledger_domain::{Employee, EmployeeId, LeaveApplication, LeaveStatus};
use std::collections::BTreeMap;
use time::Date;

/// A leave application together with its applicant's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSummary {
    /// The application.
    pub application: LeaveApplication,
    /// Full name of the applicant.
    pub employee_name: String,
}

/// Counts of applications routed to an approver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApproverStats {
    /// Awaiting a decision.
    pub pending: u64,
    /// Approved.
    pub approved: u64,
    /// Rejected.
    pub rejected: u64,
}

/// Leave activity in a reviewer's department.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepartmentOverview {
    /// The department, if the reviewer has one.
    pub department: Option<String>,
    /// Pending applications filed under the department.
    pub pending: Vec<ApplicationSummary>,
    /// Approved leave covering today.
    pub on_leave_today: Vec<ApplicationSummary>,
}

fn summarize(
    store: &mut dyn LeaveStore,
    applications: Vec<LeaveApplication>,
) -> Result<Vec<ApplicationSummary>, CoreError> {
    let mut names: BTreeMap<EmployeeId, String> = BTreeMap::new();
    let mut summaries: Vec<ApplicationSummary> = Vec::with_capacity(applications.len());
    for application in applications {
        let employee_name: String = if let Some(name) = names.get(&application.employee_id) {
            name.clone()
        } else {
            let name: String = store
                .employee(application.employee_id)?
                .map(|employee| employee.full_name)
                .unwrap_or_default();
            names.insert(application.employee_id, name.clone());
            name
        };
        summaries.push(ApplicationSummary {
            application,
            employee_name,
        });
    }
    Ok(summaries)
}

/// The actor's own applications, newest first.
pub(crate) fn list_mine(
    store: &mut dyn LeaveStore,
    actor: EmployeeId,
) -> Result<Vec<ApplicationSummary>, CoreError> {
    load_employee(store, actor)?;
    let mut applications: Vec<LeaveApplication> = store.applications_of(actor, &[])?;
    applications.sort_by(|a, b| {
        b.applied_on
            .cmp(&a.applied_on)
            .then_with(|| b.id.cmp(&a.id))
    });
    summarize(store, applications)
}

/// Pending applications awaiting the actor's decision.
pub(crate) fn pending_for_approver(
    store: &mut dyn LeaveStore,
    actor: EmployeeId,
) -> Result<Vec<ApplicationSummary>, CoreError> {
    let applications: Vec<LeaveApplication> = store.by_approver(actor, LeaveStatus::Pending)?;
    summarize(store, applications)
}

/// Approved applications the actor may still cancel on `today`.
pub(crate) fn cancellable_for_approver(
    store: &mut dyn LeaveStore,
    actor: EmployeeId,
    today: Date,
) -> Result<Vec<ApplicationSummary>, CoreError> {
    let applications: Vec<LeaveApplication> = store
        .by_approver(actor, LeaveStatus::Approved)?
        .into_iter()
        .filter(|application| application.is_cancellable_on(today))
        .collect();
    summarize(store, applications)
}

/// Decision counts for applications routed to the actor.
pub(crate) fn approver_stats(
    store: &mut dyn LeaveStore,
    actor: EmployeeId,
) -> Result<ApproverStats, CoreError> {
    Ok(ApproverStats {
        pending: store.count_by_approver(actor, LeaveStatus::Pending)?,
        approved: store.count_by_approver(actor, LeaveStatus::Approved)?,
        rejected: store.count_by_approver(actor, LeaveStatus::Rejected)?,
    })
}

/// Pending and current leave across the actor's department.
///
/// # Errors
///
/// Returns `CoreError::Authorization` if the actor's role does not review
/// department leave.
pub(crate) fn department_overview(
    store: &mut dyn LeaveStore,
    actor: EmployeeId,
    today: Date,
) -> Result<DepartmentOverview, CoreError> {
    let employee: Employee = load_employee(store, actor)?;
    if !employee.role.reviews_department() {
        return Err(CoreError::Authorization(format!(
            "Role {} does not review department leave",
            employee.role
        )));
    }

    let Some(department) = employee.department else {
        return Ok(DepartmentOverview::default());
    };

    let pending: Vec<LeaveApplication> = store.by_department(&department, LeaveStatus::Pending)?;
    let on_leave: Vec<LeaveApplication> = store.approved_covering(&department, today)?;
    Ok(DepartmentOverview {
        pending: summarize(store, pending)?,
        on_leave_today: summarize(store, on_leave)?,
        department: Some(department),
    })
}
