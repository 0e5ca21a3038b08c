// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Identifies an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(i64);

impl EmployeeId {
    /// Wraps a raw employee identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(i64);

impl ApplicationId {
    /// Wraps a raw application identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Organizational role of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular staff.
    Employee,
    /// Project manager.
    ProjectManager,
    /// Head of department.
    Hod,
    /// Assistant director.
    AssistantDirector,
    /// Director.
    Director,
    /// Human resources.
    Hr,
    /// System administrator.
    Admin,
    /// Super administrator.
    SuperAdmin,
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EMPLOYEE" => Ok(Self::Employee),
            "PROJECT_MANAGER" => Ok(Self::ProjectManager),
            "HOD" => Ok(Self::Hod),
            "ASSISTANT_DIRECTOR" => Ok(Self::AssistantDirector),
            "DIRECTOR" => Ok(Self::Director),
            "HR" => Ok(Self::Hr),
            "ADMIN" => Ok(Self::Admin),
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Role {
    /// Converts this role to its stored code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::ProjectManager => "PROJECT_MANAGER",
            Self::Hod => "HOD",
            Self::AssistantDirector => "ASSISTANT_DIRECTOR",
            Self::Director => "DIRECTOR",
            Self::Hr => "HR",
            Self::Admin => "ADMIN",
            Self::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// Administrators manage the system and hold no leave entitlement.
    #[must_use]
    pub const fn can_apply_for_leave(&self) -> bool {
        !matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Roles that review leave across their department.
    #[must_use]
    pub const fn reviews_department(&self) -> bool {
        matches!(
            self,
            Self::ProjectManager | Self::Hod | Self::AssistantDirector | Self::Director | Self::Hr
        )
    }
}

/// Gender of an employee, used to gate maternity and paternity leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Female.
    Female,
    /// Male.
    Male,
    /// Any other or undisclosed gender.
    Other,
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FEMALE" => Ok(Self::Female),
            "MALE" => Ok(Self::Male),
            "OTHER" => Ok(Self::Other),
            _ => Err(DomainError::InvalidGender(s.to_string())),
        }
    }
}

impl Gender {
    /// Converts this gender to its stored code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Female => "FEMALE",
            Self::Male => "MALE",
            Self::Other => "OTHER",
        }
    }
}

/// Status of a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved by the approver.
    Approved,
    /// Rejected by the approver.
    Rejected,
    /// Cancelled after approval.
    Cancelled,
}

impl FromStr for LeaveStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl LeaveStatus {
    /// Converts this status to its stored code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Approved
    /// - Pending → Rejected
    /// - Approved → Cancelled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved | Self::Rejected) | (Self::Approved, Self::Cancelled)
        )
    }

    /// Reserved applications hold balance capacity and block overlapping dates.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// The statuses that reserve capacity.
    pub const RESERVED: [Self; 2] = [Self::Pending, Self::Approved];
}

/// An employee as seen by the leave engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Identifier.
    pub id: EmployeeId,
    /// Display name.
    pub full_name: String,
    /// Organizational role.
    pub role: Role,
    /// Gender.
    pub gender: Gender,
    /// First day of employment.
    pub join_date: Date,
    /// Department name, if assigned.
    pub department: Option<String>,
    /// Direct manager, if any.
    pub reporting_to: Option<EmployeeId>,
}
