// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Organizational hierarchy index.
//!
//! Employees reference their manager by id only. The index keeps the
//! employees keyed by id and derives the inverse (subordinates) relation as
//! an adjacency list, so no employee holds a pointer to another.

use crate::error::DomainError;
use crate::types::{Employee, EmployeeId};
use std::collections::{BTreeMap, BTreeSet};

/// Id-keyed employees plus the derived subordinates relation.
#[derive(Debug, Clone, Default)]
pub struct OrgIndex {
    employees: BTreeMap<EmployeeId, Employee>,
    subordinates: BTreeMap<EmployeeId, Vec<EmployeeId>>,
}

impl OrgIndex {
    /// Builds an index from a set of employees.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ReportingCycle` if following `reporting_to`
    /// from any employee leads back to that employee.
    pub fn from_employees<I>(employees: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = Employee>,
    {
        let mut index: Self = Self::default();
        for employee in employees {
            index.employees.insert(employee.id, employee);
        }
        index.rebuild_subordinates();
        index.check_acyclic()?;
        Ok(index)
    }

    /// Adds or replaces an employee.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ReportingCycle` if the change would introduce a
    /// reporting cycle; the index is left unchanged.
    pub fn upsert(&mut self, employee: Employee) -> Result<(), DomainError> {
        let id: EmployeeId = employee.id;
        let previous: Option<Employee> = self.employees.insert(id, employee);
        self.rebuild_subordinates();
        if let Err(err) = self.check_acyclic() {
            match previous {
                Some(previous) => {
                    self.employees.insert(id, previous);
                }
                None => {
                    self.employees.remove(&id);
                }
            }
            self.rebuild_subordinates();
            return Err(err);
        }
        Ok(())
    }

    /// Looks up an employee.
    #[must_use]
    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id)
    }

    /// The direct manager of an employee.
    #[must_use]
    pub fn manager_of(&self, id: EmployeeId) -> Option<&Employee> {
        self.employee(id)
            .and_then(|employee| employee.reporting_to)
            .and_then(|manager| self.employee(manager))
    }

    /// Direct reports of an employee, ordered by id.
    #[must_use]
    pub fn subordinates_of(&self, id: EmployeeId) -> Vec<&Employee> {
        self.subordinates
            .get(&id)
            .map(|ids| ids.iter().filter_map(|sub| self.employee(*sub)).collect())
            .unwrap_or_default()
    }

    /// Department of an employee.
    #[must_use]
    pub fn department_of(&self, id: EmployeeId) -> Option<&str> {
        self.employee(id)
            .and_then(|employee| employee.department.as_deref())
    }

    /// Employees in a department, ordered by id.
    #[must_use]
    pub fn members_of(&self, department: &str) -> Vec<&Employee> {
        self.employees
            .values()
            .filter(|employee| employee.department.as_deref() == Some(department))
            .collect()
    }

    /// Every employee, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Number of employees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns `true` if the index holds no employees.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    fn rebuild_subordinates(&mut self) {
        self.subordinates.clear();
        for employee in self.employees.values() {
            if let Some(manager) = employee.reporting_to {
                self.subordinates.entry(manager).or_default().push(employee.id);
            }
        }
    }

    fn check_acyclic(&self) -> Result<(), DomainError> {
        for start in self.employees.keys() {
            let mut seen: BTreeSet<EmployeeId> = BTreeSet::new();
            let mut current: Option<EmployeeId> = Some(*start);
            while let Some(id) = current {
                if !seen.insert(id) {
                    return Err(DomainError::ReportingCycle {
                        employee_id: id.value(),
                    });
                }
                current = self.employees.get(&id).and_then(|e| e.reporting_to);
            }
        }
        Ok(())
    }
}
