// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CoreError, EmployeeStore, FixedClock, HolidaySource, LeaveApplicationStore, LeaveEngine,
    LeaveStore, StoreError, UnitOfWork, UserDirectory,
};
use leave_ledger_domain::{
    ApplicationId, Employee, EmployeeId, Gender, HolidaySet, LeaveApplication, LeaveBalance,
    LeaveDraft, LeaveStatus, LeaveType, NewLeaveApplication, OrgIndex, Role,
};
use std::collections::{BTreeMap, BTreeSet};
use time::Date;
use time::macros::date;

pub const DIRECTOR: EmployeeId = EmployeeId::new(1);
pub const MANAGER: EmployeeId = EmployeeId::new(2);
pub const ASHA: EmployeeId = EmployeeId::new(3);
pub const VIKRAM: EmployeeId = EmployeeId::new(4);
pub const NEW_JOINER: EmployeeId = EmployeeId::new(5);
pub const ADMIN: EmployeeId = EmployeeId::new(6);
pub const ORPHAN: EmployeeId = EmployeeId::new(7);

/// A store kept entirely in memory.
///
/// `run` stages work on a copy and only keeps it when the work succeeds.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub org: OrgIndex,
    pub holidays: BTreeSet<Date>,
    pub balances: BTreeMap<EmployeeId, LeaveBalance>,
    pub applications: BTreeMap<ApplicationId, LeaveApplication>,
    next_id: i64,
}

fn status_matches(statuses: &[LeaveStatus], status: LeaveStatus) -> bool {
    statuses.is_empty() || statuses.contains(&status)
}

impl InMemoryStore {
    fn select<P>(&self, predicate: P) -> Vec<LeaveApplication>
    where
        P: Fn(&LeaveApplication) -> bool,
    {
        self.applications
            .values()
            .filter(|application| predicate(application))
            .cloned()
            .collect()
    }
}

impl UserDirectory for InMemoryStore {
    fn employee(&mut self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        Ok(self.org.employee(id).cloned())
    }

    fn subordinates_of(&mut self, id: EmployeeId) -> Result<Vec<Employee>, StoreError> {
        Ok(self.org.subordinates_of(id).into_iter().cloned().collect())
    }
}

impl HolidaySource for InMemoryStore {
    fn holidays_between(&mut self, start: Date, end: Date) -> Result<HolidaySet, StoreError> {
        Ok(self.holidays.range(start..=end).copied().collect())
    }
}

impl EmployeeStore for InMemoryStore {
    fn load_balance(&mut self, id: EmployeeId) -> Result<LeaveBalance, StoreError> {
        Ok(self.balances.get(&id).cloned().unwrap_or_default())
    }

    fn save_balance(&mut self, id: EmployeeId, balance: &LeaveBalance) -> Result<(), StoreError> {
        self.balances.insert(id, balance.clone());
        Ok(())
    }
}

impl LeaveApplicationStore for InMemoryStore {
    fn insert_application(
        &mut self,
        application: NewLeaveApplication,
    ) -> Result<LeaveApplication, StoreError> {
        self.next_id += 1;
        let stored: LeaveApplication =
            LeaveApplication::from_new(ApplicationId::new(self.next_id), application);
        self.applications.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update_application(&mut self, application: &LeaveApplication) -> Result<(), StoreError> {
        match self.applications.get_mut(&application.id) {
            Some(existing) => {
                *existing = application.clone();
                Ok(())
            }
            None => Err(StoreError::Query(format!(
                "no leave application {}",
                application.id
            ))),
        }
    }

    fn application(&mut self, id: ApplicationId) -> Result<Option<LeaveApplication>, StoreError> {
        Ok(self.applications.get(&id).cloned())
    }

    fn applications_of(
        &mut self,
        employee: EmployeeId,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(self.select(|a| a.employee_id == employee && status_matches(statuses, a.status)))
    }

    fn overlapping(
        &mut self,
        employee: EmployeeId,
        start: Date,
        end: Date,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(self.select(|a| {
            a.employee_id == employee && status_matches(statuses, a.status) && a.overlaps(start, end)
        }))
    }

    fn starting_between(
        &mut self,
        employee: EmployeeId,
        leave_types: &[LeaveType],
        start: Date,
        end: Date,
        statuses: &[LeaveStatus],
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(self.select(|a| {
            a.employee_id == employee
                && leave_types.contains(&a.leave_type)
                && start <= a.start_date
                && a.start_date <= end
                && status_matches(statuses, a.status)
        }))
    }

    fn by_approver(
        &mut self,
        approver: EmployeeId,
        status: LeaveStatus,
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(self.select(|a| a.approver_id == approver && a.status == status))
    }

    fn count_by_approver(
        &mut self,
        approver: EmployeeId,
        status: LeaveStatus,
    ) -> Result<u64, StoreError> {
        Ok(self.by_approver(approver, status)?.len() as u64)
    }

    fn by_department(
        &mut self,
        department: &str,
        status: LeaveStatus,
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(self.select(|a| a.department.as_deref() == Some(department) && a.status == status))
    }

    fn approved_covering(
        &mut self,
        department: &str,
        date: Date,
    ) -> Result<Vec<LeaveApplication>, StoreError> {
        Ok(self.select(|a| {
            a.department.as_deref() == Some(department)
                && a.status == LeaveStatus::Approved
                && a.covers(date)
        }))
    }
}

impl UnitOfWork for InMemoryStore {
    fn run<T, F>(&mut self, work: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut dyn LeaveStore) -> Result<T, CoreError>,
    {
        let mut staged: Self = self.clone();
        let output: T = work(&mut staged)?;
        *self = staged;
        Ok(output)
    }
}

pub fn create_test_employee(
    id: EmployeeId,
    role: Role,
    gender: Gender,
    join_date: Date,
    reporting_to: Option<EmployeeId>,
) -> Employee {
    Employee {
        id,
        full_name: format!("Employee {id}"),
        role,
        gender,
        join_date,
        department: Some(String::from("Engineering")),
        reporting_to,
    }
}

pub fn create_test_store() -> InMemoryStore {
    let employees: Vec<Employee> = vec![
        create_test_employee(DIRECTOR, Role::Director, Gender::Male, date!(2015 - 04 - 01), None),
        create_test_employee(MANAGER, Role::Hod, Gender::Female, date!(2018 - 02 - 01), Some(DIRECTOR)),
        Employee {
            full_name: String::from("Asha Rao"),
            ..create_test_employee(ASHA, Role::Employee, Gender::Female, date!(2020 - 01 - 15), Some(MANAGER))
        },
        Employee {
            full_name: String::from("Vikram Shah"),
            ..create_test_employee(VIKRAM, Role::Employee, Gender::Male, date!(2019 - 07 - 01), Some(MANAGER))
        },
        create_test_employee(NEW_JOINER, Role::Employee, Gender::Male, date!(2025 - 06 - 01), Some(MANAGER)),
        create_test_employee(ADMIN, Role::Admin, Gender::Other, date!(2016 - 01 - 01), None),
        create_test_employee(ORPHAN, Role::Employee, Gender::Other, date!(2021 - 01 - 01), None),
    ];

    InMemoryStore {
        org: OrgIndex::from_employees(employees).unwrap(),
        holidays: [date!(2025 - 01 - 14), date!(2025 - 08 - 15)].into_iter().collect(),
        ..InMemoryStore::default()
    }
}

pub fn create_test_engine(today: Date) -> LeaveEngine<InMemoryStore, FixedClock> {
    LeaveEngine::new(create_test_store(), FixedClock::new(today))
}

pub fn draft(leave_type: LeaveType, start_date: Date, end_date: Option<Date>) -> LeaveDraft {
    LeaveDraft {
        leave_type,
        start_date,
        end_date,
        reason: String::from("family matters"),
    }
}
