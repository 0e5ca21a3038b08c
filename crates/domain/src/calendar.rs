// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar arithmetic and holiday-aware day counting.

use crate::days::Days;
use crate::error::DomainError;
use crate::leave_type::{DayCountRule, LeaveType};
use std::collections::BTreeSet;
use time::{Date, Duration, Month};

/// Answers whether a date is a holiday.
pub trait HolidayCalendar {
    /// Returns `true` if `date` is a holiday.
    fn is_holiday(&self, date: Date) -> bool;
}

/// A fixed set of holiday dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<Date>,
}

impl HolidaySet {
    /// Creates an empty holiday set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dates: BTreeSet::new(),
        }
    }

    /// Adds a holiday.
    pub fn insert(&mut self, date: Date) {
        self.dates.insert(date);
    }

    /// Number of holidays in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the set holds no holidays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<Date> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl HolidayCalendar for HolidaySet {
    fn is_holiday(&self, date: Date) -> bool {
        self.dates.contains(&date)
    }
}

/// One of the two halves of a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearHalf {
    /// January through June.
    First,
    /// July through December.
    Second,
}

impl YearHalf {
    /// The half containing `date`.
    #[must_use]
    pub const fn of(date: Date) -> Self {
        if (date.month() as u8) <= 6 {
            Self::First
        } else {
            Self::Second
        }
    }
}

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), &format).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Adds a signed number of days to a date.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the result is out of range.
pub fn add_days(date: Date, days: i64) -> Result<Date, DomainError> {
    date.checked_add(Duration::days(days))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("{date} + {days} days"),
        })
}

/// First and last day of a calendar year.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the year is out of range.
pub fn year_bounds(year: i32) -> Result<(Date, Date), DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("bounds of year {year}"),
    };
    let first: Date = Date::from_calendar_date(year, Month::January, 1).map_err(|_| overflow())?;
    let last: Date = Date::from_calendar_date(year, Month::December, 31).map_err(|_| overflow())?;
    Ok((first, last))
}

/// First and last day of a month.
///
/// # Errors
///
/// Returns `DomainError::InvalidMonth` if `month` is outside 1-12, or
/// `DomainError::DateArithmeticOverflow` if the year is out of range.
pub fn month_bounds(year: i32, month: u8) -> Result<(Date, Date), DomainError> {
    let month_value: Month = Month::try_from(month).map_err(|_| DomainError::InvalidMonth(month))?;
    let first: Date = Date::from_calendar_date(year, month_value, 1).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: format!("start of {year}-{month:02}"),
        }
    })?;
    let last: Date = (28..=31)
        .rev()
        .find_map(|day| Date::from_calendar_date(year, month_value, day).ok())
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("end of {year}-{month:02}"),
        })?;
    Ok((first, last))
}

/// Number of calendar days from `start` through `end`, both inclusive.
///
/// Returns 0 when `end` precedes `start`.
#[must_use]
pub fn inclusive_day_count(start: Date, end: Date) -> u32 {
    if end < start {
        return 0;
    }
    let span: i64 = (end - start).whole_days() + 1;
    u32::try_from(span).unwrap_or(u32::MAX)
}

/// Number of non-holiday days from `start` through `end`, both inclusive.
#[must_use]
pub fn working_day_count(start: Date, end: Date, calendar: &dyn HolidayCalendar) -> u32 {
    let mut count: u32 = 0;
    let mut current: Date = start;
    while current <= end {
        if !calendar.is_holiday(current) {
            count += 1;
        }
        match current.next_day() {
            Some(next) => current = next,
            None => break,
        }
    }
    count
}

/// Leave consumed by a request of `leave_type` over `start..=end`.
///
/// Half-day requests consume half a day, or nothing on a holiday. Earned,
/// maternity and paternity leave count every calendar day in the range so
/// holidays sandwiched inside the leave are consumed. Casual leave and leave
/// without pay skip holidays.
#[must_use]
pub fn required_days(
    leave_type: LeaveType,
    start: Date,
    end: Date,
    is_half_day: bool,
    calendar: &dyn HolidayCalendar,
) -> Days {
    if is_half_day {
        return if calendar.is_holiday(start) {
            Days::ZERO
        } else {
            Days::HALF
        };
    }
    match leave_type.rules().day_count {
        DayCountRule::CalendarDays => Days::whole(inclusive_day_count(start, end)),
        DayCountRule::WorkingDays => Days::whole(working_day_count(start, end, calendar)),
        DayCountRule::HalfDay => {
            if calendar.is_holiday(start) {
                Days::ZERO
            } else {
                Days::HALF
            }
        }
    }
}
