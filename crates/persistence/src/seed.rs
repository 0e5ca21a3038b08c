// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seed data for the employee directory and the holiday calendar.
//!
//! Employees and holidays are owned by the wider HR system; this crate only
//! needs a way to load them. The JSON shape is:
//!
//! ```json
//! {
//!   "employees": [
//!     { "id": 1, "full_name": "Meera Iyer", "role": "DIRECTOR", "gender": "FEMALE",
//!       "join_date": "2015-04-01", "department": "Engineering", "reporting_to": null }
//!   ],
//!   "holidays": [ { "date": "2025-01-26", "name": "Republic Day" } ]
//! }
//! ```

use leave_ledger_domain::{Employee, EmployeeId, Gender, OrgIndex, Role, parse_iso_date};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::error::PersistenceError;

/// An employee as it appears in seed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEmployee {
    pub id: i64,
    pub full_name: String,
    pub role: String,
    pub gender: String,
    pub join_date: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub reporting_to: Option<i64>,
}

/// A holiday as it appears in seed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedHoliday {
    pub date: String,
    pub name: String,
}

/// Employees and holidays to load at start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
    #[serde(default)]
    pub holidays: Vec<SeedHoliday>,
}

impl SeedData {
    /// Parses seed data from JSON.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SerializationError` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes the employees and checks the reporting hierarchy.
    ///
    /// Every `reporting_to` must name a seeded employee and the hierarchy
    /// must be free of cycles.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidSeed` describing the first problem found.
    pub fn org_index(&self) -> Result<OrgIndex, PersistenceError> {
        let employees: Vec<Employee> = self
            .employees
            .iter()
            .map(SeedEmployee::to_employee)
            .collect::<Result<Vec<Employee>, PersistenceError>>()?;

        let dangling: Option<(EmployeeId, EmployeeId)> = employees.iter().find_map(|employee| {
            employee
                .reporting_to
                .filter(|manager| !employees.iter().any(|candidate| candidate.id == *manager))
                .map(|manager| (employee.id, manager))
        });
        if let Some((employee, manager)) = dangling {
            return Err(PersistenceError::InvalidSeed(format!(
                "employee {employee} reports to unknown employee {manager}"
            )));
        }

        OrgIndex::from_employees(employees).map_err(|e| PersistenceError::InvalidSeed(e.to_string()))
    }

    /// Decodes the holidays.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidSeed` for an unparseable date.
    pub fn holiday_dates(&self) -> Result<Vec<(Date, String)>, PersistenceError> {
        self.holidays
            .iter()
            .map(|holiday| {
                parse_iso_date(&holiday.date)
                    .map(|date| (date, holiday.name.clone()))
                    .map_err(|e| PersistenceError::InvalidSeed(e.to_string()))
            })
            .collect()
    }
}

impl SeedEmployee {
    fn to_employee(&self) -> Result<Employee, PersistenceError> {
        let invalid = |e: leave_ledger_domain::DomainError| {
            PersistenceError::InvalidSeed(format!("employee {}: {e}", self.id))
        };
        Ok(Employee {
            id: EmployeeId::new(self.id),
            full_name: self.full_name.clone(),
            role: self.role.parse::<Role>().map_err(invalid)?,
            gender: self.gender.parse::<Gender>().map_err(invalid)?,
            join_date: parse_iso_date(&self.join_date).map_err(invalid)?,
            department: self.department.clone(),
            reporting_to: self.reporting_to.map(EmployeeId::new),
        })
    }
}
