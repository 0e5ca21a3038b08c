// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identification of the acting employee.
//!
//! Authentication itself happens upstream. Requests reach this layer with
//! the acting employee's id in the [`ACTOR_HEADER`] header, and every
//! operation receives that actor explicitly.

use leave_ledger_domain::EmployeeId;

use crate::error::AuthError;

/// Header carrying the acting employee's id.
pub const ACTOR_HEADER: &str = "x-employee-id";

/// The employee on whose behalf a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The acting employee.
    pub employee_id: EmployeeId,
}

impl AuthenticatedActor {
    /// Creates an actor.
    #[must_use]
    pub const fn new(employee_id: EmployeeId) -> Self {
        Self { employee_id }
    }

    /// Reads the actor from the raw header value.
    ///
    /// # Arguments
    ///
    /// * `value` - The header value, if the header was present
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingActor` if the header is absent or blank,
    /// or `AuthError::InvalidActor` if it is not a positive integer.
    pub fn from_header(value: Option<&str>) -> Result<Self, AuthError> {
        let raw: &str = value.map(str::trim).filter(|v| !v.is_empty()).ok_or(AuthError::MissingActor)?;
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self::new(EmployeeId::new(id))),
            _ => Err(AuthError::InvalidActor {
                value: raw.to_string(),
            }),
        }
    }
}
