// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `directory` — Employees, the reporting hierarchy and holidays
//! - `applications` — Leave application lookups and filters
//! - `balances` — Balance records and the monthly casual leave accrual map

pub mod applications;
pub mod balances;
pub mod directory;
