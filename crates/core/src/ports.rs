// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator ports.
//!
//! The engine never talks to storage directly. It reads and writes through
//! these traits, which a storage adapter implements. Every operation runs
//! inside [`UnitOfWork::run`], so the reads that feed validation and the
//! final write commit or roll back together.

use crate::error::CoreError;
use leave_ledger_domain::{
    ApplicationId, Employee, EmployeeId, HolidaySet, LeaveApplication, LeaveBalance, LeaveStatus,
    LeaveType, NewLeaveApplication,
};
use thiserror::Error;
use time::Date;

/// Failure reported by a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store could not be reached or the transaction failed.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// A query failed.
    #[error("Query failed: {0}")]
    Query(String),
    /// A stored record could not be decoded.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Read-only view of employees and the reporting hierarchy.
pub trait UserDirectory {
    /// Looks up an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, StoreError>;

    /// Direct reports of an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn subordinates_of(&mut self, id: EmployeeId) -> Result<Vec<Employee>, StoreError>;

    /// The current manager of an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn manager_of(&mut self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        match self.employee(id)?.and_then(|employee| employee.reporting_to) {
            Some(manager) => self.employee(manager),
            None => Ok(None),
        }
    }

    /// Department of an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn department_of(&mut self, id: EmployeeId) -> Result<Option<String>, StoreError> {
        Ok(self.employee(id)?.and_then(|employee| employee.department))
    }
}

/// Source of holiday dates.
pub trait HolidaySource {
    /// Holidays from `start` through `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn holidays_between(&mut self, start: Date, end: Date) -> Result<HolidaySet, StoreError>;
}

/// Persisted per-employee balance records.
pub trait EmployeeStore {
    /// Loads an employee's balance record, or an empty record if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn load_balance(&mut self, id: EmployeeId) -> Result<LeaveBalance, StoreError>;

    /// Saves an employee's balance record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn save_balance(&mut self, id: EmployeeId, balance: &LeaveBalance) -> Result<(), StoreError>;
}

/// Stored leave applications.
///
/// Wherever a `statuses` slice is taken, an empty slice matches every status.
pub trait LeaveApplicationStore {
    /// Stores a new pending application and returns it with its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn insert_application(
        &mut self,
        application: NewLeaveApplication,
    ) -> Result<LeaveApplication, StoreError>;

    /// Writes back the status and remaining balance of an application.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the application does not exist.
    fn update_application(&mut self, application: &LeaveApplication) -> Result<(), StoreError>;

    /// Looks up an application.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn application(&mut self, id: ApplicationId) -> Result<Option<LeaveApplication>, StoreError>;

    /// Applications of an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn applications_of(
        &mut self,
        employee: EmployeeId,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>, StoreError>;

    /// Applications of an employee sharing a day with `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn overlapping(
        &mut self,
        employee: EmployeeId,
        start: Date,
        end: Date,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>, StoreError>;

    /// Applications of an employee of the given types starting within `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn starting_between(
        &mut self,
        employee: EmployeeId,
        leave_types: &[LeaveType],
        start: Date,
        end: Date,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>, StoreError>;

    /// Applications routed to an approver with the given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn by_approver(
        &mut self,
        approver: EmployeeId,
        status: LeaveStatus,
    ) -> Result<Vec<LeaveApplication>, StoreError>;

    /// Number of applications routed to an approver with the given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn count_by_approver(
        &mut self,
        approver: EmployeeId,
        status: LeaveStatus,
    ) -> Result<u64, StoreError>;

    /// Applications filed under a department with the given status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn by_department(
        &mut self,
        department: &str,
        status: LeaveStatus,
    ) -> Result<Vec<LeaveApplication>, StoreError>;

    /// Approved applications of a department covering `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    fn approved_covering(
        &mut self,
        department: &str,
        date: Date,
    ) -> Result<Vec<LeaveApplication>, StoreError>;
}

/// Everything an engine operation needs from storage.
pub trait LeaveStore: UserDirectory + HolidaySource + EmployeeStore + LeaveApplicationStore {}

impl<T> LeaveStore for T where T: UserDirectory + HolidaySource + EmployeeStore + LeaveApplicationStore {}

/// Runs engine work atomically.
pub trait UnitOfWork {
    /// Runs `work` against the store in a single transaction.
    ///
    /// The transaction commits if `work` returns `Ok` and rolls back otherwise.
    ///
    /// # Errors
    ///
    /// Returns the error from `work`, or `CoreError::Internal` if the
    /// transaction itself fails.
    fn run<T, F>(&mut self, work: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut dyn LeaveStore) -> Result<T, CoreError>;
}
