// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use crate::{Persistence, SeedData, SeedEmployee, SeedHoliday};
use leave_ledger_domain::EmployeeId;

pub const MANAGER: EmployeeId = EmployeeId::new(10);
pub const PRIYA: EmployeeId = EmployeeId::new(11);
pub const ARJUN: EmployeeId = EmployeeId::new(12);
pub const SUPPORT: EmployeeId = EmployeeId::new(20);

pub fn seed_employee(
    id: EmployeeId,
    name: &str,
    role: &str,
    gender: &str,
    department: &str,
    reporting_to: Option<EmployeeId>,
) -> SeedEmployee {
    SeedEmployee {
        id: id.value(),
        full_name: name.to_string(),
        role: role.to_string(),
        gender: gender.to_string(),
        join_date: String::from("2020-01-15"),
        department: Some(department.to_string()),
        reporting_to: reporting_to.map(EmployeeId::value),
    }
}

/// Reports are listed before their manager so seeding has to link afterwards.
pub fn create_test_seed() -> SeedData {
    SeedData {
        employees: vec![
            seed_employee(PRIYA, "Priya Nair", "EMPLOYEE", "FEMALE", "Engineering", Some(MANAGER)),
            seed_employee(ARJUN, "Arjun Mehta", "EMPLOYEE", "MALE", "Engineering", Some(MANAGER)),
            seed_employee(MANAGER, "Kavya Menon", "HOD", "FEMALE", "Engineering", None),
            seed_employee(SUPPORT, "Rahul Das", "EMPLOYEE", "MALE", "Support", None),
        ],
        holidays: vec![
            SeedHoliday {
                date: String::from("2025-01-14"),
                name: String::from("Pongal"),
            },
            SeedHoliday {
                date: String::from("2025-08-15"),
                name: String::from("Independence Day"),
            },
        ],
    }
}

pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.seed(&create_test_seed()).unwrap();
    persistence
}
