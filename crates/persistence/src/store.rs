// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The engine's storage ports over a `SQLite` connection.

use diesel::SqliteConnection;
use leave_ledger::{
    EmployeeStore, HolidaySource, LeaveApplicationStore, StoreError, UserDirectory,
};
use leave_ledger_domain::{
    ApplicationId, Employee, EmployeeId, HolidaySet, LeaveApplication, LeaveBalance, LeaveStatus,
    LeaveType, NewLeaveApplication,
};
use time::Date;

use crate::{mutations, queries};

/// Store ports bound to a connection that is already inside a transaction.
pub struct SqliteLeaveStore<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteLeaveStore<'c> {
    /// Wraps a connection.
    pub const fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

impl UserDirectory for SqliteLeaveStore<'_> {
    fn employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        Ok(queries::directory::find_employee(self.conn, id)?)
    }

    fn subordinates_of(&mut self, id: EmployeeId) -> Result<Vec<Employee>, StoreError> {
        Ok(queries::directory::list_subordinates(self.conn, id)?)
    }
}

impl HolidaySource for SqliteLeaveStore<'_> {
    fn holidays_between(&mut self, start: Date, end: Date) -> Result<HolidaySet, StoreError> {
        Ok(queries::directory::holidays_between(self.conn, start, end)?)
    }
}

impl EmployeeStore for SqliteLeaveStore<'_> {
    fn load_balance(&mut self, id: EmployeeId) -> Result<LeaveBalance, StoreError> {
        Ok(queries::balances::load_balance(self.conn, id)?)
    }

    fn save_balance(&mut self, id: EmployeeId, balance: &LeaveBalance) -> Result<(), StoreError> {
        Ok(mutations::balances::save_balance(self.conn, id, balance)?)
    }
}

impl LeaveApplicationStore for SqliteLeaveStore<'_> {
    fn insert_application(
        &mut self,
        application: NewLeaveApplication,
    ) -> Result<LeaveApplication, StoreError> {
        Ok(mutations::applications::insert_application(self.conn, application)?)
    }

    fn update_application(&mut self, application: &LeaveApplication) -> Result<(), StoreError> {
        Ok(mutations::applications::update_application(self.conn, application)?)
    }

    fn application(&mut self, id: ApplicationId) -> Result<Option<LeaveApplication>, StoreError> {
        Ok(queries::applications::find_application(self.conn, id)?)
    }

    fn applications_of(
        &mut self,
        employee: EmployeeId,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(queries::applications::list_for_employee(
            self.conn, employee, statuses,
        )?)
    }

    fn overlapping(
        &mut self,
        employee: EmployeeId,
        start: Date,
        end: Date,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(queries::applications::list_overlapping(
            self.conn, employee, start, end, statuses,
        )?)
    }

    fn starting_between(
        &mut self,
        employee: EmployeeId,
        leave_types: &[LeaveType],
        start: Date,
        end: Date,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(queries::applications::list_starting_between(
            self.conn,
            employee,
            leave_types,
            start,
            end,
            statuses,
        )?)
    }

    fn by_approver(
        &mut self,
        approver: EmployeeId,
        status: LeaveStatus,
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(queries::applications::list_for_approver(
            self.conn, approver, status,
        )?)
    }

    fn count_by_approver(
        &mut self,
        approver: EmployeeId,
        status: LeaveStatus,
    ) -> Result<u64, StoreError> {
        Ok(queries::applications::count_for_approver(
            self.conn, approver, status,
        )?)
    }

    fn by_department(
        &mut self,
        department: &str,
        status: LeaveStatus,
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(queries::applications::list_for_department(
            self.conn, department, status,
        )?)
    }

    fn approved_covering(
        &mut self,
        department: &str,
        date: Date,
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(queries::applications::list_approved_covering(
            self.conn, department, date,
        )?)
    }
}
