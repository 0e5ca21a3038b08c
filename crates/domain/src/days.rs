// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave quantities.
//!
//! Every leave amount in the system is a whole multiple of half a day, so
//! quantities are stored as an integer count of half days. This keeps
//! balance arithmetic exact; conversion to a decimal only happens at the
//! presentation boundary.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A quantity of leave, counted in half days.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Days {
    halves: u32,
}

impl Days {
    /// No leave.
    pub const ZERO: Self = Self { halves: 0 };

    /// Half a day of leave.
    pub const HALF: Self = Self { halves: 1 };

    /// Creates a quantity of whole days.
    #[must_use]
    pub const fn whole(days: u32) -> Self {
        Self {
            halves: days.saturating_mul(2),
        }
    }

    /// Creates a quantity from a raw half-day count.
    #[must_use]
    pub const fn from_halves(halves: u32) -> Self {
        Self { halves }
    }

    /// Returns the raw half-day count.
    #[must_use]
    pub const fn halves(self) -> u32 {
        self.halves
    }

    /// Returns the quantity as a decimal number of days.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.halves) / 2.0
    }

    /// Subtracts, clamping at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self {
            halves: self.halves.saturating_sub(other.halves),
        }
    }

    /// Returns `true` if this is zero days.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.halves == 0
    }
}

impl Add for Days {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            halves: self.halves.saturating_add(rhs.halves),
        }
    }
}

impl AddAssign for Days {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Days {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl std::fmt::Display for Days {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole: u32 = self.halves / 2;
        if self.halves % 2 == 0 {
            write!(f, "{whole}")
        } else {
            write!(f, "{whole}.5")
        }
    }
}
