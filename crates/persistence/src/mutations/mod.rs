// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `directory` — Employee and holiday seeding
//! - `applications` — Leave application inserts and decisions
//! - `balances` — Balance record upserts

pub mod applications;
pub mod balances;
pub mod directory;
