// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, OffsetDateTime};

/// Supplies the current date.
pub trait Clock {
    /// Today's date.
    fn today(&self) -> Date;
}

/// The system clock, in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }
}

/// A clock stopped at a settable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    today: Date,
}

impl FixedClock {
    /// Creates a clock reading `today`.
    #[must_use]
    pub const fn new(today: Date) -> Self {
        Self { today }
    }

    /// Moves the clock to `today`.
    pub const fn set(&mut self, today: Date) {
        self.today = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.today
    }
}
