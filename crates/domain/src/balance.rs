// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Balance accounting.
//!
//! A [`LeaveBalance`] is the persisted per-employee record. Its `used` and
//! `remaining` fields are a cache of what the application history says: the
//! engine recomputes a [`UsageTotals`] from reserved applications and calls
//! [`LeaveBalance::refresh`] inside every balance-affecting operation.

use crate::application::LeaveApplication;
use crate::calendar::{HolidayCalendar, YearHalf};
use crate::days::Days;
use crate::leave_type::LeaveBucket;
use crate::policy::{
    CL_MONTHLY_ACCRUAL, EL_ANNUAL_CEILING, EL_HALF_ALLOTMENT, LWP_ANNUAL_CEILING,
};
use crate::types::{Employee, Gender};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use time::Date;

/// First month of `year` in which casual leave accrues for an employee.
///
/// Returns `None` if the employee joins after `year`.
#[must_use]
pub fn cl_start_month(join_date: Date, year: i32) -> Option<u8> {
    match join_date.year().cmp(&year) {
        std::cmp::Ordering::Greater => None,
        std::cmp::Ordering::Equal => Some(join_date.month() as u8),
        std::cmp::Ordering::Less => Some(1),
    }
}

/// Casual leave accruing over the whole of `year`.
///
/// An employee joining in June accrues June through December, 7 days.
#[must_use]
pub fn cl_annual_total(join_date: Date, year: i32) -> Days {
    cl_start_month(join_date, year).map_or(Days::ZERO, |start| {
        (start..=12).map(|_| CL_MONTHLY_ACCRUAL).sum()
    })
}

/// Earned leave reserved in each half of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EarnedLeaveUsage {
    /// Leave starting January through June.
    pub first_half: Days,
    /// Leave starting July through December.
    pub second_half: Days,
}

impl EarnedLeaveUsage {
    /// Unused first-half allotment rolled into the second half.
    #[must_use]
    pub fn carryover(&self) -> Days {
        EL_HALF_ALLOTMENT.saturating_sub(self.first_half + self.second_half)
    }

    /// Total reserved across the year.
    #[must_use]
    pub fn total(&self) -> Days {
        self.first_half + self.second_half
    }

    /// Earned leave remaining as seen from `current` half.
    #[must_use]
    pub fn remaining(&self, current: YearHalf) -> Days {
        match current {
            YearHalf::First => EL_ANNUAL_CEILING.saturating_sub(self.total()),
            YearHalf::Second => {
                (EL_HALF_ALLOTMENT + self.carryover()).saturating_sub(self.second_half)
            }
        }
    }
}

/// Leave reserved in a year, per bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageTotals {
    /// Casual leave, including half days.
    pub casual: Days,
    /// Earned leave by half, including half days.
    pub earned: EarnedLeaveUsage,
    /// Maternity leave.
    pub maternity: Days,
    /// Paternity leave.
    pub paternity: Days,
    /// Leave without pay, including half days.
    pub without_pay: Days,
}

impl UsageTotals {
    /// Totals the reserved applications starting in `year`.
    ///
    /// Applications that are not reserved, or that start in another year,
    /// are ignored.
    pub fn from_applications<'a, I>(applications: I, year: i32, calendar: &dyn HolidayCalendar) -> Self
    where
        I: IntoIterator<Item = &'a LeaveApplication>,
    {
        let mut totals: Self = Self::default();
        for application in applications {
            if !application.status.is_reserved() || application.start_date.year() != year {
                continue;
            }
            let days: Days = application.required_days(calendar);
            match application.leave_type.bucket() {
                LeaveBucket::CasualLeave => totals.casual += days,
                LeaveBucket::EarnedLeave => match YearHalf::of(application.start_date) {
                    YearHalf::First => totals.earned.first_half += days,
                    YearHalf::Second => totals.earned.second_half += days,
                },
                LeaveBucket::MaternityLeave => totals.maternity += days,
                LeaveBucket::PaternityLeave => totals.paternity += days,
                LeaveBucket::LeaveWithoutPay => totals.without_pay += days,
            }
        }
        totals
    }

    /// Leave reserved from `bucket`.
    #[must_use]
    pub fn used(&self, bucket: LeaveBucket) -> Days {
        match bucket {
            LeaveBucket::CasualLeave => self.casual,
            LeaveBucket::EarnedLeave => self.earned.total(),
            LeaveBucket::MaternityLeave => self.maternity,
            LeaveBucket::PaternityLeave => self.paternity,
            LeaveBucket::LeaveWithoutPay => self.without_pay,
        }
    }
}

/// The persisted balance record of one employee.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeaveBalance {
    /// Casual leave reserved this year.
    pub casual_leave_used: Days,
    /// Casual leave accrued to date and not yet reserved.
    pub casual_leave_remaining: Days,
    /// Casual leave accrued per month (1-12) of the current year.
    pub monthly_cl_accrual: BTreeMap<u8, Days>,
    /// Earned leave reserved January through June.
    pub earned_leave_used_first_half: Days,
    /// Earned leave reserved July through December.
    pub earned_leave_used_second_half: Days,
    /// Earned leave remaining as seen from the current half.
    pub earned_leave_remaining: Days,
    /// Maternity leave reserved this year.
    pub maternity_leave_used: Days,
    /// Maternity leave remaining this year.
    pub maternity_leave_remaining: Days,
    /// Paternity leave reserved this year.
    pub paternity_leave_used: Days,
    /// Paternity leave remaining this year.
    pub paternity_leave_remaining: Days,
    /// Leave without pay reserved this year.
    pub leave_without_pay_used: Days,
    /// The year the accrual map was last initialized for.
    pub last_initialized_year: Option<i32>,
}

impl LeaveBalance {
    /// Rolls the record over to the year of `today`.
    ///
    /// When the record was initialized for a different year the usage
    /// counters and the accrual map are cleared. The accrual map is then
    /// filled with one month of casual leave for every month from the
    /// employee's start month through December.
    ///
    /// Returns `true` if the record changed.
    pub fn ensure_current_year(&mut self, today: Date, join_date: Date) -> bool {
        let year: i32 = today.year();
        let mut changed: bool = false;

        if self.last_initialized_year != Some(year) {
            *self = Self {
                last_initialized_year: Some(year),
                ..Self::default()
            };
            changed = true;
        }

        if let Some(start_month) = cl_start_month(join_date, year) {
            for month in start_month..=12 {
                if let Entry::Vacant(slot) = self.monthly_cl_accrual.entry(month) {
                    slot.insert(CL_MONTHLY_ACCRUAL);
                    changed = true;
                }
            }
        }

        changed
    }

    /// Casual leave accrued from January through `month` of the current year.
    #[must_use]
    pub fn accrued_cl_through(&self, month: u8) -> Days {
        self.monthly_cl_accrual
            .range(..=month)
            .map(|(_, accrued)| *accrued)
            .sum()
    }

    /// Recomputes the used and remaining fields from `usage`.
    ///
    /// Returns `true` if any field changed.
    pub fn refresh(&mut self, usage: &UsageTotals, today: Date) -> bool {
        let before: Self = self.clone();

        self.casual_leave_used = usage.casual;
        self.casual_leave_remaining = self
            .accrued_cl_through(today.month() as u8)
            .saturating_sub(usage.casual);
        self.earned_leave_used_first_half = usage.earned.first_half;
        self.earned_leave_used_second_half = usage.earned.second_half;
        self.earned_leave_remaining = usage.earned.remaining(YearHalf::of(today));
        self.maternity_leave_used = usage.maternity;
        self.maternity_leave_remaining = remaining_under(LeaveBucket::MaternityLeave, usage.maternity);
        self.paternity_leave_used = usage.paternity;
        self.paternity_leave_remaining = remaining_under(LeaveBucket::PaternityLeave, usage.paternity);
        self.leave_without_pay_used = usage.without_pay;

        *self != before
    }

    /// The live remaining balance of `bucket`.
    #[must_use]
    pub fn remaining(&self, bucket: LeaveBucket) -> Days {
        match bucket {
            LeaveBucket::CasualLeave => self.casual_leave_remaining,
            LeaveBucket::EarnedLeave => self.earned_leave_remaining,
            LeaveBucket::MaternityLeave => self.maternity_leave_remaining,
            LeaveBucket::PaternityLeave => self.paternity_leave_remaining,
            LeaveBucket::LeaveWithoutPay => {
                LWP_ANNUAL_CEILING.saturating_sub(self.leave_without_pay_used)
            }
        }
    }
}

fn remaining_under(bucket: LeaveBucket, used: Days) -> Days {
    bucket
        .annual_ceiling()
        .map_or(Days::ZERO, |ceiling| ceiling.saturating_sub(used))
}

/// Total, used and remaining leave of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSummary {
    /// Leave the bucket holds for the year.
    pub total: Days,
    /// Leave reserved from the bucket.
    pub used: Days,
    /// Leave still available.
    pub remaining: Days,
}

/// Earned leave broken down by half year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedLeaveDetail {
    /// Reserved January through June.
    pub used_first_half: Days,
    /// Reserved July through December.
    pub used_second_half: Days,
    /// First-half allotment rolled into the second half.
    pub carryover: Days,
}

/// The balance view shown to an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Per-bucket summary.
    pub buckets: BTreeMap<LeaveBucket, BucketSummary>,
    /// Earned leave detail, absent for employees without entitlement.
    pub earned_leave: Option<EarnedLeaveDetail>,
}

impl BalanceReport {
    /// Summary for `bucket`, if shown.
    #[must_use]
    pub fn get(&self, bucket: LeaveBucket) -> Option<&BucketSummary> {
        self.buckets.get(&bucket)
    }

    /// Returns `true` if the report shows no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Builds the balance view of `employee` from a refreshed balance record.
///
/// Administrators hold no entitlement and get an empty report. Maternity
/// leave is shown to female employees and paternity leave to everyone else.
#[must_use]
pub fn build_balance_report(employee: &Employee, balance: &LeaveBalance, today: Date) -> BalanceReport {
    if !employee.role.can_apply_for_leave() {
        return BalanceReport::default();
    }

    let mut buckets: BTreeMap<LeaveBucket, BucketSummary> = BTreeMap::new();
    buckets.insert(
        LeaveBucket::CasualLeave,
        BucketSummary {
            total: cl_annual_total(employee.join_date, today.year()),
            used: balance.casual_leave_used,
            remaining: balance.casual_leave_remaining,
        },
    );

    let earned: EarnedLeaveUsage = EarnedLeaveUsage {
        first_half: balance.earned_leave_used_first_half,
        second_half: balance.earned_leave_used_second_half,
    };
    buckets.insert(
        LeaveBucket::EarnedLeave,
        BucketSummary {
            total: EL_ANNUAL_CEILING,
            used: earned.total(),
            remaining: balance.earned_leave_remaining,
        },
    );

    let family_bucket: LeaveBucket = if employee.gender == Gender::Female {
        LeaveBucket::MaternityLeave
    } else {
        LeaveBucket::PaternityLeave
    };
    let family_used: Days = if family_bucket == LeaveBucket::MaternityLeave {
        balance.maternity_leave_used
    } else {
        balance.paternity_leave_used
    };
    buckets.insert(
        family_bucket,
        BucketSummary {
            total: family_bucket.annual_ceiling().unwrap_or(Days::ZERO),
            used: family_used,
            remaining: balance.remaining(family_bucket),
        },
    );

    buckets.insert(
        LeaveBucket::LeaveWithoutPay,
        BucketSummary {
            total: LWP_ANNUAL_CEILING,
            used: balance.leave_without_pay_used,
            remaining: balance.remaining(LeaveBucket::LeaveWithoutPay),
        },
    );

    BalanceReport {
        buckets,
        earned_leave: Some(EarnedLeaveDetail {
            used_first_half: earned.first_half,
            used_second_half: earned.second_half,
            carryover: earned.carryover(),
        }),
    }
}
