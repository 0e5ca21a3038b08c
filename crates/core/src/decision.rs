// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Approver decisions on pending and approved applications.

use crate::balance::{load_employee, remaining_after_refresh};
use crate::error::CoreError;
use crate::ports::LeaveStore;
use leave_ledger_domain::{ApplicationId, Days, Employee, EmployeeId, LeaveApplication, LeaveStatus};
use time::Date;
use tracing::info;

/// The decision an approver is making.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Approve,
    Reject,
    Cancel,
}

impl Decision {
    const fn target(self) -> LeaveStatus {
        match self {
            Self::Approve => LeaveStatus::Approved,
            Self::Reject => LeaveStatus::Rejected,
            Self::Cancel => LeaveStatus::Cancelled,
        }
    }

    const fn verb(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Cancel => "cancel",
        }
    }
}

/// Applies an approver decision to an application.
///
/// Only the approver recorded on the application may decide it, and that is
/// checked before the application's state. Approval and rejection require a
/// pending application. Cancellation requires an approved application whose
/// end date is no more than the grace period before `today`. Approval and
/// cancellation refresh the applicant's balance and record what remains in
/// the application's bucket.
///
/// # Errors
///
/// Returns `CoreError::NotFound`, `CoreError::Authorization`,
/// `CoreError::State`, or `CoreError::Internal` if the store fails.
pub(crate) fn decide(
    store: &mut dyn LeaveStore,
    actor: EmployeeId,
    id: ApplicationId,
    decision: Decision,
    today: Date,
) -> Result<LeaveApplication, CoreError> {
    let mut application: LeaveApplication =
        store.application(id)?.ok_or(CoreError::NotFound {
            resource: "Leave application",
            id: id.value(),
        })?;

    if application.approver_id != actor {
        return Err(CoreError::Authorization(format!(
            "Employee {actor} is not the approver of leave application {id}"
        )));
    }

    let target: LeaveStatus = decision.target();
    if !application.status.can_transition_to(target) {
        return Err(CoreError::State(format!(
            "Cannot {} leave application {id} in status {}",
            decision.verb(),
            application.status
        )));
    }

    if decision == Decision::Cancel {
        let deadline: Date = application.cancellation_deadline()?;
        if today > deadline {
            return Err(CoreError::State(format!(
                "Cancellation window for leave application {id} closed on {deadline}"
            )));
        }
    }

    application.status = target;
    if decision != Decision::Reject {
        let applicant: Employee = load_employee(store, application.employee_id)?;
        // Balance history is read back from the store, so persist the status first.
        store.update_application(&application)?;
        let remaining: Days = remaining_after_refresh(
            store,
            &applicant,
            application.leave_type.bucket(),
            today,
        )?;
        application.remaining_leaves = Some(remaining);
    }
    store.update_application(&application)?;

    info!(
        application_id = %id,
        approver_id = %actor,
        employee_id = %application.employee_id,
        status = %application.status,
        "Leave application decided"
    );
    Ok(application)
}
