// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::apply_leave;
use crate::balance::{available_cl_for_month, balance_report};
use crate::clock::{Clock, SystemClock};
use crate::decision::{Decision, decide};
use crate::error::CoreError;
use crate::ports::UnitOfWork;
use crate::views::{self, ApplicationSummary, ApproverStats, DepartmentOverview};
use leave_ledger_domain::{ApplicationId, BalanceReport, Days, EmployeeId, LeaveApplication, LeaveDraft};
use time::Date;
use tracing::{info, warn};

/// The leave policy engine.
///
/// Every operation takes the acting employee explicitly and runs as one
/// unit of work against the store: balance reads, validation and the final
/// write commit together or not at all.
#[derive(Debug)]
pub struct LeaveEngine<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S, C> LeaveEngine<S, C>
where
    S: UnitOfWork,
    C: Clock,
{
    /// Creates an engine over a store and a clock.
    #[must_use]
    pub const fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// The underlying store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The engine's clock.
    pub const fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// The date operations are evaluated on.
    #[must_use]
    pub fn today(&self) -> Date {
        self.clock.today()
    }

    /// Submits a leave application for `actor`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the policy rule that refused
    /// the request, `CoreError::Configuration` if the applicant has no
    /// approver, `CoreError::NotFound` for an unknown applicant, or
    /// `CoreError::Internal` if the store fails.
    pub fn apply(&mut self, actor: EmployeeId, draft: LeaveDraft) -> Result<LeaveApplication, CoreError> {
        let today: Date = self.clock.today();
        info!(
            employee_id = %actor,
            leave_type = %draft.leave_type,
            start_date = %draft.start_date,
            "Applying for leave"
        );
        let result: Result<LeaveApplication, CoreError> =
            self.store.run(|store| apply_leave(store, actor, &draft, today));
        if let Err(CoreError::Validation(reason)) = &result {
            warn!(employee_id = %actor, reason = %reason, "Leave application rejected");
        }
        result
    }

    /// Lists `actor`'s own applications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown employee or
    /// `CoreError::Internal` if the store fails.
    pub fn list_mine(&mut self, actor: EmployeeId) -> Result<Vec<ApplicationSummary>, CoreError> {
        self.store.run(|store| views::list_mine(store, actor))
    }

    /// Computes `actor`'s balance.
    ///
    /// Administrators get an empty report.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown employee or
    /// `CoreError::Internal` if the store fails.
    pub fn balance(&mut self, actor: EmployeeId) -> Result<BalanceReport, CoreError> {
        let today: Date = self.clock.today();
        self.store.run(|store| balance_report(store, actor, today))
    }

    /// Casual leave available to `actor` for `month` of `year`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a month outside 1-12,
    /// `CoreError::NotFound` for an unknown employee, or
    /// `CoreError::Internal` if the store fails.
    pub fn available_cl_for_month(
        &mut self,
        actor: EmployeeId,
        year: i32,
        month: u8,
    ) -> Result<Days, CoreError> {
        let today: Date = self.clock.today();
        self.store
            .run(|store| available_cl_for_month(store, actor, year, month, today))
    }

    /// Pending applications awaiting `actor`'s decision.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Internal` if the store fails.
    pub fn pending_for_approver(&mut self, actor: EmployeeId) -> Result<Vec<ApplicationSummary>, CoreError> {
        self.store.run(|store| views::pending_for_approver(store, actor))
    }

    /// Approved applications `actor` may still cancel.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Internal` if the store fails.
    pub fn cancellable_for_approver(
        &mut self,
        actor: EmployeeId,
    ) -> Result<Vec<ApplicationSummary>, CoreError> {
        let today: Date = self.clock.today();
        self.store
            .run(|store| views::cancellable_for_approver(store, actor, today))
    }

    /// Decision counts for applications routed to `actor`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Internal` if the store fails.
    pub fn approver_stats(&mut self, actor: EmployeeId) -> Result<ApproverStats, CoreError> {
        self.store.run(|store| views::approver_stats(store, actor))
    }

    /// Pending and current leave across `actor`'s department.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Authorization` if `actor` does not review
    /// department leave, `CoreError::NotFound` for an unknown employee, or
    /// `CoreError::Internal` if the store fails.
    pub fn department_overview(&mut self, actor: EmployeeId) -> Result<DepartmentOverview, CoreError> {
        let today: Date = self.clock.today();
        self.store
            .run(|store| views::department_overview(store, actor, today))
    }

    /// Approves a pending application.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound`, `CoreError::Authorization` if `actor` is
    /// not the recorded approver, `CoreError::State` if the application is
    /// not pending, or `CoreError::Internal` if the store fails.
    pub fn approve(&mut self, actor: EmployeeId, id: ApplicationId) -> Result<LeaveApplication, CoreError> {
        self.decide(actor, id, Decision::Approve)
    }

    /// Rejects a pending application.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound`, `CoreError::Authorization` if `actor` is
    /// not the recorded approver, `CoreError::State` if the application is
    /// not pending, or `CoreError::Internal` if the store fails.
    pub fn reject(&mut self, actor: EmployeeId, id: ApplicationId) -> Result<LeaveApplication, CoreError> {
        self.decide(actor, id, Decision::Reject)
    }

    /// Cancels an approved application within its grace window.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound`, `CoreError::Authorization` if `actor` is
    /// not the recorded approver, `CoreError::State` if the application is
    /// not approved or the grace window has closed, or `CoreError::Internal`
    /// if the store fails.
    pub fn cancel(&mut self, actor: EmployeeId, id: ApplicationId) -> Result<LeaveApplication, CoreError> {
        self.decide(actor, id, Decision::Cancel)
    }

    fn decide(
        &mut self,
        actor: EmployeeId,
        id: ApplicationId,
        decision: Decision,
    ) -> Result<LeaveApplication, CoreError> {
        let today: Date = self.clock.today();
        let result: Result<LeaveApplication, CoreError> =
            self.store.run(|store| decide(store, actor, id, decision, today));
        if let Err(CoreError::Authorization(reason) | CoreError::State(reason)) = &result {
            warn!(
                application_id = %id,
                employee_id = %actor,
                decision = ?decision,
                reason = %reason,
                "Leave decision refused"
            );
        }
        result
    }
}
