// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use leave_ledger::{FixedClock, LeaveEngine};
use leave_ledger_domain::EmployeeId;
use leave_ledger_persistence::{Persistence, SeedData};
use time::Date;

use crate::{ApplyLeaveRequest, AuthenticatedActor};

pub const DIRECTOR: EmployeeId = EmployeeId::new(1);
pub const MANAGER: EmployeeId = EmployeeId::new(2);
pub const ASHA: EmployeeId = EmployeeId::new(3);
pub const RAVI: EmployeeId = EmployeeId::new(4);
pub const ADMIN: EmployeeId = EmployeeId::new(5);

const SEED_JSON: &str = r#"{
    "employees": [
        { "id": 1, "full_name": "Meera Iyer", "role": "DIRECTOR", "gender": "FEMALE",
          "join_date": "2015-04-01", "department": "Engineering" },
        { "id": 2, "full_name": "Sanjay Kulkarni", "role": "HOD", "gender": "MALE",
          "join_date": "2017-08-01", "department": "Engineering", "reporting_to": 1 },
        { "id": 3, "full_name": "Asha Rao", "role": "EMPLOYEE", "gender": "FEMALE",
          "join_date": "2020-01-15", "department": "Engineering", "reporting_to": 2 },
        { "id": 4, "full_name": "Ravi Kumar", "role": "EMPLOYEE", "gender": "MALE",
          "join_date": "2021-09-01", "department": "Engineering", "reporting_to": 2 },
        { "id": 5, "full_name": "Office Admin", "role": "ADMIN", "gender": "OTHER",
          "join_date": "2016-01-01", "department": "Administration" }
    ],
    "holidays": [ { "date": "2025-01-14", "name": "Pongal" } ]
}"#;

pub fn create_test_engine(today: Date) -> LeaveEngine<Persistence, FixedClock> {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .seed(&SeedData::from_json(SEED_JSON).unwrap())
        .unwrap();
    LeaveEngine::new(persistence, FixedClock::new(today))
}

pub const fn actor(id: EmployeeId) -> AuthenticatedActor {
    AuthenticatedActor::new(id)
}

pub fn create_apply_request(leave_type: &str, start_date: &str, end_date: Option<&str>) -> ApplyLeaveRequest {
    ApplyLeaveRequest {
        leave_type: leave_type.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.map(str::to_string),
        reason: String::from("  sister's wedding "),
    }
}
