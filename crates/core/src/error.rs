// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ports::StoreError;
use leave_ledger_domain::DomainError;
use thiserror::Error;

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The request violates a leave policy rule.
    #[error("{0}")]
    Validation(#[from] DomainError),
    /// The actor may not perform the operation.
    #[error("Not authorized: {0}")]
    Authorization(String),
    /// The application is not in a state that allows the operation.
    #[error("Invalid state: {0}")]
    State(String),
    /// A referenced resource does not exist.
    #[error("{resource} {id} not found")]
    NotFound {
        /// Kind of resource.
        resource: &'static str,
        /// Its identifier.
        id: i64,
    },
    /// Organizational data is incomplete.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The store failed.
    #[error("Internal error: {0}")]
    Internal(#[from] StoreError),
}
