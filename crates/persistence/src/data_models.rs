// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to and from domain values.
//!
//! Dates are stored as ISO-8601 `YYYY-MM-DD` text, so lexical comparison in
//! SQL matches calendar order. Day quantities are stored as half-day counts.

use diesel::prelude::*;
use leave_ledger_domain::{
    ApplicationId, Days, Employee, EmployeeId, Gender, LeaveApplication, LeaveBalance,
    LeaveStatus, LeaveType, NewLeaveApplication, Role, parse_iso_date,
};
use std::collections::BTreeMap;
use time::Date;
use time::macros::format_description;

use crate::diesel_schema::{
    employees, holidays, leave_applications, leave_balances, monthly_cl_accrual,
};
use crate::error::PersistenceError;

/// Formats a date for storage.
///
/// # Errors
///
/// Returns `PersistenceError::SerializationError` if the date cannot be formatted.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Converts a day quantity to its stored half-day count.
///
/// # Errors
///
/// Returns `PersistenceError::SerializationError` if the count does not fit the column.
pub fn days_to_column(days: Days) -> Result<i32, PersistenceError> {
    i32::try_from(days.halves())
        .map_err(|_| PersistenceError::SerializationError(format!("{days} days out of range")))
}

fn days_from_column(halves: i32) -> Result<Days, PersistenceError> {
    u32::try_from(halves)
        .map(Days::from_halves)
        .map_err(|_| PersistenceError::CorruptRecord(format!("negative half-day count {halves}")))
}

fn month_from_column(month: i32) -> Result<u8, PersistenceError> {
    u8::try_from(month)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| PersistenceError::CorruptRecord(format!("invalid month {month}")))
}

// ============================================================================
// Employees
// ============================================================================

/// A row of the `employees` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub full_name: String,
    pub role: String,
    pub gender: String,
    pub join_date: String,
    pub department: Option<String>,
    pub reporting_to: Option<i64>,
}

impl EmployeeRow {
    /// Builds a row from an employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the join date cannot be formatted.
    pub fn from_employee(employee: &Employee) -> Result<Self, PersistenceError> {
        Ok(Self {
            employee_id: employee.id.value(),
            full_name: employee.full_name.clone(),
            role: employee.role.as_str().to_string(),
            gender: employee.gender.as_str().to_string(),
            join_date: format_date(employee.join_date)?,
            department: employee.department.clone(),
            reporting_to: employee.reporting_to.map(EmployeeId::value),
        })
    }
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = PersistenceError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EmployeeId::new(row.employee_id),
            full_name: row.full_name,
            role: row.role.parse::<Role>()?,
            gender: row.gender.parse::<Gender>()?,
            join_date: parse_iso_date(&row.join_date)?,
            department: row.department,
            reporting_to: row.reporting_to.map(EmployeeId::new),
        })
    }
}

// ============================================================================
// Holidays
// ============================================================================

/// A row of the `holidays` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = holidays)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HolidayRow {
    pub holiday_date: String,
    pub name: String,
}

// ============================================================================
// Leave applications
// ============================================================================

/// A row of the `leave_applications` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = leave_applications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ApplicationRow {
    pub application_id: i64,
    pub employee_id: i64,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    pub status: String,
    pub applied_on: String,
    pub approver_id: i64,
    pub remaining_leaves_halves: Option<i32>,
    pub is_half_day: i32,
    pub department: Option<String>,
}

impl TryFrom<ApplicationRow> for LeaveApplication {
    type Error = PersistenceError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ApplicationId::new(row.application_id),
            employee_id: EmployeeId::new(row.employee_id),
            leave_type: row.leave_type.parse::<LeaveType>()?,
            start_date: parse_iso_date(&row.start_date)?,
            end_date: parse_iso_date(&row.end_date)?,
            reason: row.reason,
            status: row.status.parse::<LeaveStatus>()?,
            applied_on: parse_iso_date(&row.applied_on)?,
            approver_id: EmployeeId::new(row.approver_id),
            remaining_leaves: row.remaining_leaves_halves.map(days_from_column).transpose()?,
            is_half_day: row.is_half_day != 0,
            department: row.department,
        })
    }
}

/// Insertable form of a new application.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = leave_applications)]
pub struct NewApplicationRow {
    pub employee_id: i64,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    pub status: String,
    pub applied_on: String,
    pub approver_id: i64,
    pub remaining_leaves_halves: Option<i32>,
    pub is_half_day: i32,
    pub department: Option<String>,
}

impl NewApplicationRow {
    /// Builds an insertable row for a new pending application.
    ///
    /// # Errors
    ///
    /// Returns an error if a date or day count cannot be stored.
    pub fn from_new(application: &NewLeaveApplication) -> Result<Self, PersistenceError> {
        Ok(Self {
            employee_id: application.employee_id.value(),
            leave_type: application.leave_type.code().to_string(),
            start_date: format_date(application.start_date)?,
            end_date: format_date(application.end_date)?,
            reason: application.reason.clone(),
            status: LeaveStatus::Pending.as_str().to_string(),
            applied_on: format_date(application.applied_on)?,
            approver_id: application.approver_id.value(),
            remaining_leaves_halves: Some(days_to_column(application.remaining_leaves)?),
            is_half_day: i32::from(application.is_half_day),
            department: application.department.clone(),
        })
    }
}

// ============================================================================
// Balances
// ============================================================================

/// A row of the `leave_balances` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = leave_balances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct BalanceRow {
    pub employee_id: i64,
    pub casual_leave_used_halves: i32,
    pub casual_leave_remaining_halves: i32,
    pub earned_leave_used_first_half_halves: i32,
    pub earned_leave_used_second_half_halves: i32,
    pub earned_leave_remaining_halves: i32,
    pub maternity_leave_used_halves: i32,
    pub maternity_leave_remaining_halves: i32,
    pub paternity_leave_used_halves: i32,
    pub paternity_leave_remaining_halves: i32,
    pub leave_without_pay_used_halves: i32,
    pub last_initialized_year: Option<i32>,
}

impl BalanceRow {
    /// Builds a row from a balance record.
    ///
    /// # Errors
    ///
    /// Returns an error if a day count does not fit its column.
    pub fn from_balance(id: EmployeeId, balance: &LeaveBalance) -> Result<Self, PersistenceError> {
        Ok(Self {
            employee_id: id.value(),
            casual_leave_used_halves: days_to_column(balance.casual_leave_used)?,
            casual_leave_remaining_halves: days_to_column(balance.casual_leave_remaining)?,
            earned_leave_used_first_half_halves: days_to_column(
                balance.earned_leave_used_first_half,
            )?,
            earned_leave_used_second_half_halves: days_to_column(
                balance.earned_leave_used_second_half,
            )?,
            earned_leave_remaining_halves: days_to_column(balance.earned_leave_remaining)?,
            maternity_leave_used_halves: days_to_column(balance.maternity_leave_used)?,
            maternity_leave_remaining_halves: days_to_column(balance.maternity_leave_remaining)?,
            paternity_leave_used_halves: days_to_column(balance.paternity_leave_used)?,
            paternity_leave_remaining_halves: days_to_column(balance.paternity_leave_remaining)?,
            leave_without_pay_used_halves: days_to_column(balance.leave_without_pay_used)?,
            last_initialized_year: balance.last_initialized_year,
        })
    }

    /// Rebuilds the balance record from this row and its accrual rows.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CorruptRecord` for negative counts or invalid months.
    pub fn into_balance(self, accruals: Vec<AccrualRow>) -> Result<LeaveBalance, PersistenceError> {
        let mut monthly_cl_accrual: BTreeMap<u8, Days> = BTreeMap::new();
        for accrual in accruals {
            monthly_cl_accrual.insert(
                month_from_column(accrual.month)?,
                days_from_column(accrual.accrued_halves)?,
            );
        }

        Ok(LeaveBalance {
            casual_leave_used: days_from_column(self.casual_leave_used_halves)?,
            casual_leave_remaining: days_from_column(self.casual_leave_remaining_halves)?,
            monthly_cl_accrual,
            earned_leave_used_first_half: days_from_column(self.earned_leave_used_first_half_halves)?,
            earned_leave_used_second_half: days_from_column(
                self.earned_leave_used_second_half_halves,
            )?,
            earned_leave_remaining: days_from_column(self.earned_leave_remaining_halves)?,
            maternity_leave_used: days_from_column(self.maternity_leave_used_halves)?,
            maternity_leave_remaining: days_from_column(self.maternity_leave_remaining_halves)?,
            paternity_leave_used: days_from_column(self.paternity_leave_used_halves)?,
            paternity_leave_remaining: days_from_column(self.paternity_leave_remaining_halves)?,
            leave_without_pay_used: days_from_column(self.leave_without_pay_used_halves)?,
            last_initialized_year: self.last_initialized_year,
        })
    }
}

/// A row of the `monthly_cl_accrual` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = monthly_cl_accrual)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AccrualRow {
    pub employee_id: i64,
    pub month: i32,
    pub accrued_halves: i32,
}
