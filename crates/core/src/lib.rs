// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod balance;
mod clock;
mod decision;
mod engine;
mod error;
mod ports;
mod views;

#[cfg(test)]
mod tests;

// Re-export public types
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::LeaveEngine;
pub use error::CoreError;
pub use ports::{
    EmployeeStore, HolidaySource, LeaveApplicationStore, LeaveStore, StoreError, UnitOfWork,
    UserDirectory,
};
pub use views::{ApplicationSummary, ApproverStats, DepartmentOverview};
