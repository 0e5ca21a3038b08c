// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave types and their rule table.
//!
//! Each leave type is described by a static [`LeaveTypeRules`] entry. Code
//! that needs to know how a type behaves (which balance it draws from, how
//! its days are counted, whether it can be backdated) reads the table rather
//! than matching on the type.

use crate::days::Days;
use crate::error::DomainError;
use crate::policy::{
    CL_BACKDATE_DAYS, LWP_ANNUAL_CEILING, ML_DURATION_DAYS, PL_DURATION_DAYS,
};
use crate::types::Gender;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A kind of leave an employee can apply for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeaveType {
    /// Casual leave.
    #[serde(rename = "CL")]
    Casual,
    /// Earned leave.
    #[serde(rename = "EL")]
    Earned,
    /// Maternity leave.
    #[serde(rename = "ML")]
    Maternity,
    /// Paternity leave.
    #[serde(rename = "PL")]
    Paternity,
    /// Leave without pay.
    #[serde(rename = "LWP")]
    WithoutPay,
    /// Half a day of casual leave.
    #[serde(rename = "HALF_DAY_CL")]
    HalfDayCasual,
    /// Half a day of earned leave.
    #[serde(rename = "HALF_DAY_EL")]
    HalfDayEarned,
    /// Half a day of leave without pay.
    #[serde(rename = "HALF_DAY_LWP")]
    HalfDayWithoutPay,
}

/// A balance that leave is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LeaveBucket {
    /// Casual leave balance.
    CasualLeave,
    /// Earned leave balance.
    EarnedLeave,
    /// Maternity leave balance.
    MaternityLeave,
    /// Paternity leave balance.
    PaternityLeave,
    /// Leave without pay allowance.
    LeaveWithoutPay,
}

/// How the days of a leave range are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCountRule {
    /// Every calendar day in the range, holidays included.
    CalendarDays,
    /// Only days that are not holidays.
    WorkingDays,
    /// A single half day, or nothing on a holiday.
    HalfDay,
}

/// Behavior of a leave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveTypeRules {
    /// The type this entry describes.
    pub leave_type: LeaveType,
    /// The balance the type draws from.
    pub bucket: LeaveBucket,
    /// How requested days are counted.
    pub day_count: DayCountRule,
    /// Inclusive day count for types with a fixed length.
    pub fixed_duration: Option<u32>,
    /// The only gender the type is available to.
    pub gender: Option<Gender>,
    /// How many days before today the start date may fall.
    pub backdate_days: u8,
    /// Whether the type covers half of a single day.
    pub half_day: bool,
}

const fn entry(leave_type: LeaveType, bucket: LeaveBucket, day_count: DayCountRule) -> LeaveTypeRules {
    LeaveTypeRules {
        leave_type,
        bucket,
        day_count,
        fixed_duration: None,
        gender: None,
        backdate_days: 0,
        half_day: matches!(day_count, DayCountRule::HalfDay),
    }
}

/// Indexed by the `LeaveType` discriminant.
static RULES: [LeaveTypeRules; 8] = [
    LeaveTypeRules {
        backdate_days: CL_BACKDATE_DAYS,
        ..entry(LeaveType::Casual, LeaveBucket::CasualLeave, DayCountRule::WorkingDays)
    },
    entry(LeaveType::Earned, LeaveBucket::EarnedLeave, DayCountRule::CalendarDays),
    LeaveTypeRules {
        fixed_duration: Some(ML_DURATION_DAYS),
        gender: Some(Gender::Female),
        ..entry(LeaveType::Maternity, LeaveBucket::MaternityLeave, DayCountRule::CalendarDays)
    },
    LeaveTypeRules {
        fixed_duration: Some(PL_DURATION_DAYS),
        gender: Some(Gender::Male),
        ..entry(LeaveType::Paternity, LeaveBucket::PaternityLeave, DayCountRule::CalendarDays)
    },
    entry(LeaveType::WithoutPay, LeaveBucket::LeaveWithoutPay, DayCountRule::WorkingDays),
    LeaveTypeRules {
        backdate_days: CL_BACKDATE_DAYS,
        ..entry(LeaveType::HalfDayCasual, LeaveBucket::CasualLeave, DayCountRule::HalfDay)
    },
    entry(LeaveType::HalfDayEarned, LeaveBucket::EarnedLeave, DayCountRule::HalfDay),
    entry(LeaveType::HalfDayWithoutPay, LeaveBucket::LeaveWithoutPay, DayCountRule::HalfDay),
];

impl LeaveType {
    /// Every leave type, in table order.
    pub const ALL: [Self; 8] = [
        Self::Casual,
        Self::Earned,
        Self::Maternity,
        Self::Paternity,
        Self::WithoutPay,
        Self::HalfDayCasual,
        Self::HalfDayEarned,
        Self::HalfDayWithoutPay,
    ];

    /// Looks up the rule table entry for this type.
    #[must_use]
    pub fn rules(self) -> &'static LeaveTypeRules {
        &RULES[self as usize]
    }

    /// The balance this type draws from.
    #[must_use]
    pub fn bucket(self) -> LeaveBucket {
        self.rules().bucket
    }

    /// Whether this type covers half of a single day.
    #[must_use]
    pub fn is_half_day(self) -> bool {
        self.rules().half_day
    }

    /// The stored code of this type.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Casual => "CL",
            Self::Earned => "EL",
            Self::Maternity => "ML",
            Self::Paternity => "PL",
            Self::WithoutPay => "LWP",
            Self::HalfDayCasual => "HALF_DAY_CL",
            Self::HalfDayEarned => "HALF_DAY_EL",
            Self::HalfDayWithoutPay => "HALF_DAY_LWP",
        }
    }
}

impl FromStr for LeaveType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|leave_type| leave_type.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidLeaveType(s.to_string()))
    }
}

impl std::fmt::Display for LeaveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl LeaveBucket {
    /// Every bucket.
    pub const ALL: [Self; 5] = [
        Self::CasualLeave,
        Self::EarnedLeave,
        Self::MaternityLeave,
        Self::PaternityLeave,
        Self::LeaveWithoutPay,
    ];

    /// Short code used in messages.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::CasualLeave => "CL",
            Self::EarnedLeave => "EL",
            Self::MaternityLeave => "ML",
            Self::PaternityLeave => "PL",
            Self::LeaveWithoutPay => "LWP",
        }
    }

    /// The leave types that draw from this bucket.
    #[must_use]
    pub fn leave_types(self) -> Vec<LeaveType> {
        LeaveType::ALL
            .into_iter()
            .filter(|leave_type| leave_type.bucket() == self)
            .collect()
    }

    /// Fixed annual ceiling for buckets that have one.
    ///
    /// Casual leave accrues monthly and earned leave is split across the
    /// two halves of the year, so neither has a single flat ceiling here.
    #[must_use]
    pub const fn annual_ceiling(self) -> Option<Days> {
        match self {
            Self::MaternityLeave => Some(Days::whole(ML_DURATION_DAYS)),
            Self::PaternityLeave => Some(Days::whole(PL_DURATION_DAYS)),
            Self::LeaveWithoutPay => Some(LWP_ANNUAL_CEILING),
            Self::CasualLeave | Self::EarnedLeave => None,
        }
    }
}
