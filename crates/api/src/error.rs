// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use leave_ledger::CoreError;
use leave_ledger_domain::DomainError;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No acting employee was supplied.
    MissingActor,
    /// The acting employee could not be parsed.
    InvalidActor {
        /// The value that was supplied.
        value: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingActor => write!(f, "No acting employee supplied"),
            Self::InvalidActor { value } => {
                write!(f, "'{value}' is not a valid employee id")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of the refusal.
        message: String,
    },
    /// A leave policy rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The application is not in a state that allows the action.
    InvalidState {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Organizational data is incomplete.
    Configuration {
        /// A description of the defect.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, message } => {
                write!(f, "Unauthorized to {action}: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Leave rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidState { message } => write!(f, "Invalid state: {message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::AuthenticationFailed {
            reason: err.to_string(),
        }
    }
}

/// Short rule name for a policy violation.
const fn rule_name(err: &DomainError) -> &'static str {
    match err {
        DomainError::RoleNotEligible { .. } => "role_eligibility",
        DomainError::StartDateInPast { .. } => "no_backdating",
        DomainError::BackdateWindowExceeded { .. } => "backdate_window",
        DomainError::EndBeforeStart { .. } => "date_order",
        DomainError::GenderRestricted { .. } => "gender_restriction",
        DomainError::FixedDurationMismatch { .. } => "fixed_duration",
        DomainError::HalfDayOnHoliday { .. } => "half_day_holiday",
        DomainError::DuplicateHalfDay { .. } => "unique_half_day",
        DomainError::OverlappingLeave { .. } => "no_overlap",
        DomainError::InsufficientBalance { .. } => "sufficient_balance",
        DomainError::AnnualCapExceeded { .. } => "annual_ceiling",
        DomainError::MonthlyClCapExceeded { .. } => "monthly_casual_cap",
        DomainError::OutsideCurrentYear { .. } => "current_year_only",
        DomainError::BeforeJoinMonth { .. } => "after_join_month",
        DomainError::AdvanceClOrdering { .. } => "advance_casual_ordering",
        DomainError::FirstHalfClosed { .. } => "first_half_closed",
        DomainError::ReportingCycle { .. } => "acyclic_hierarchy",
        DomainError::InvalidLeaveType(_)
        | DomainError::InvalidRole(_)
        | DomainError::InvalidGender(_)
        | DomainError::InvalidStatus(_)
        | DomainError::InvalidMonth(_)
        | DomainError::DateParseError { .. }
        | DomainError::DateArithmeticOverflow { .. } => "input",
    }
}

/// Translates a domain error into an API error.
///
/// Malformed values become `InvalidInput` for the offending field; every
/// other variant is a policy rejection and keeps its domain message.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: Option<&str> = match &err {
        DomainError::InvalidLeaveType(_) => Some("leave_type"),
        DomainError::InvalidRole(_) => Some("role"),
        DomainError::InvalidGender(_) => Some("gender"),
        DomainError::InvalidStatus(_) => Some("status"),
        DomainError::InvalidMonth(_) => Some("month"),
        DomainError::DateParseError { .. } | DomainError::DateArithmeticOverflow { .. } => {
            Some("date")
        }
        _ => None,
    };

    match field {
        Some(field) => ApiError::InvalidInput {
            field: field.to_string(),
            message: err.to_string(),
        },
        None => ApiError::DomainRuleViolation {
            rule: rule_name(&err).to_string(),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// # Arguments
///
/// * `action` - The operation being performed, used in authorization errors
/// * `err` - The error to translate
#[must_use]
pub fn translate_core_error(action: &str, err: CoreError) -> ApiError {
    match err {
        CoreError::Validation(domain_err) => translate_domain_error(domain_err),
        CoreError::Authorization(message) => ApiError::Unauthorized {
            action: action.to_string(),
            message,
        },
        CoreError::State(message) => ApiError::InvalidState { message },
        CoreError::NotFound { resource, id } => ApiError::ResourceNotFound {
            resource_type: resource.to_string(),
            message: format!("{resource} {id} does not exist"),
        },
        CoreError::Configuration(message) => ApiError::Configuration { message },
        CoreError::Internal(store_err) => ApiError::Internal {
            message: store_err.to_string(),
        },
    }
}
