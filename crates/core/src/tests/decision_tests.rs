// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{ASHA, InMemoryStore, MANAGER, VIKRAM, create_test_engine, draft};
use crate::{CoreError, FixedClock, LeaveEngine};
use leave_ledger_domain::{
    ApplicationId, BalanceReport, Days, LeaveApplication, LeaveBucket, LeaveStatus, LeaveType,
};
use time::macros::date;

fn engine_with_earned_leave(
    today: time::Date,
    start: time::Date,
    end: time::Date,
) -> (LeaveEngine<InMemoryStore, FixedClock>, ApplicationId) {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(today);
    let saved: LeaveApplication = engine
        .apply(ASHA, draft(LeaveType::Earned, start, Some(end)))
        .unwrap();
    (engine, saved.id)
}

#[test]
fn test_approve_records_remaining_balance() {
    let (mut engine, id) =
        engine_with_earned_leave(date!(2025 - 03 - 03), date!(2025 - 03 - 10), date!(2025 - 03 - 12));

    let approved: LeaveApplication = engine.approve(MANAGER, id).unwrap();

    assert_eq!(approved.status, LeaveStatus::Approved);
    assert_eq!(approved.remaining_leaves, Some(Days::whole(17)));
    assert_eq!(
        engine.store_mut().applications.get(&id).map(|stored| stored.status),
        Some(LeaveStatus::Approved)
    );
}

#[test]
fn test_only_recorded_approver_may_decide() {
    let (mut engine, id) =
        engine_with_earned_leave(date!(2025 - 03 - 03), date!(2025 - 03 - 10), date!(2025 - 03 - 12));

    let result: Result<LeaveApplication, CoreError> = engine.approve(VIKRAM, id);
    assert!(matches!(result, Err(CoreError::Authorization(_))));
    assert_eq!(
        engine.store_mut().applications.get(&id).map(|stored| stored.status),
        Some(LeaveStatus::Pending)
    );
}

#[test]
fn test_authorization_is_checked_before_state() {
    let (mut engine, id) =
        engine_with_earned_leave(date!(2025 - 03 - 03), date!(2025 - 03 - 10), date!(2025 - 03 - 12));
    engine.approve(MANAGER, id).unwrap();

    assert!(matches!(
        engine.approve(VIKRAM, id),
        Err(CoreError::Authorization(_))
    ));
    assert!(matches!(engine.approve(MANAGER, id), Err(CoreError::State(_))));
}

#[test]
fn test_rejected_application_cannot_be_approved() {
    let (mut engine, id) =
        engine_with_earned_leave(date!(2025 - 03 - 03), date!(2025 - 03 - 10), date!(2025 - 03 - 12));

    let rejected: LeaveApplication = engine.reject(MANAGER, id).unwrap();
    assert_eq!(rejected.status, LeaveStatus::Rejected);
    assert_eq!(rejected.remaining_leaves, Some(Days::whole(17)));

    assert!(matches!(engine.approve(MANAGER, id), Err(CoreError::State(_))));
    assert!(matches!(engine.cancel(MANAGER, id), Err(CoreError::State(_))));
}

#[test]
fn test_pending_application_cannot_be_cancelled() {
    let (mut engine, id) =
        engine_with_earned_leave(date!(2025 - 03 - 03), date!(2025 - 03 - 10), date!(2025 - 03 - 12));

    assert!(matches!(engine.cancel(MANAGER, id), Err(CoreError::State(_))));
}

#[test]
fn test_unknown_application_is_not_found() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));

    assert!(matches!(
        engine.approve(MANAGER, ApplicationId::new(404)),
        Err(CoreError::NotFound { id: 404, .. })
    ));
}

#[test]
fn test_cancel_within_grace_window() {
    let (mut engine, id) =
        engine_with_earned_leave(date!(2025 - 01 - 06), date!(2025 - 01 - 08), date!(2025 - 01 - 10));
    engine.approve(MANAGER, id).unwrap();

    engine.clock_mut().set(date!(2025 - 01 - 20));
    let cancelled: LeaveApplication = engine.cancel(MANAGER, id).unwrap();

    assert_eq!(cancelled.status, LeaveStatus::Cancelled);
    assert_eq!(cancelled.remaining_leaves, Some(Days::whole(20)));
}

#[test]
fn test_cancel_on_last_day_of_grace_window() {
    let (mut engine, id) =
        engine_with_earned_leave(date!(2025 - 01 - 06), date!(2025 - 01 - 08), date!(2025 - 01 - 10));
    engine.approve(MANAGER, id).unwrap();

    engine.clock_mut().set(date!(2025 - 01 - 25));
    assert!(engine.cancel(MANAGER, id).is_ok());
}

#[test]
fn test_cancel_after_grace_window_is_refused() {
    let (mut engine, id) =
        engine_with_earned_leave(date!(2025 - 01 - 06), date!(2025 - 01 - 08), date!(2025 - 01 - 10));
    engine.approve(MANAGER, id).unwrap();

    engine.clock_mut().set(date!(2025 - 02 - 01));
    let result: Result<LeaveApplication, CoreError> = engine.cancel(MANAGER, id);

    let Err(CoreError::State(reason)) = result else {
        panic!("expected a state failure, got {result:?}");
    };
    assert!(reason.contains("2025-01-25"));
    assert_eq!(
        engine.store_mut().applications.get(&id).map(|stored| stored.status),
        Some(LeaveStatus::Approved)
    );
}

#[test]
fn test_cancel_releases_balance() {
    let (mut engine, id) =
        engine_with_earned_leave(date!(2025 - 01 - 06), date!(2025 - 01 - 08), date!(2025 - 01 - 10));
    engine.approve(MANAGER, id).unwrap();

    let before: BalanceReport = engine.balance(ASHA).unwrap();
    assert_eq!(
        before.get(LeaveBucket::EarnedLeave).unwrap().remaining,
        Days::whole(17)
    );

    engine.cancel(MANAGER, id).unwrap();

    let after: BalanceReport = engine.balance(ASHA).unwrap();
    assert_eq!(
        after.get(LeaveBucket::EarnedLeave).unwrap().remaining,
        Days::whole(20)
    );
    assert_eq!(after.get(LeaveBucket::EarnedLeave).unwrap().used, Days::ZERO);
}

#[test]
fn test_rejection_releases_reserved_days() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 01 - 02));
    let saved: LeaveApplication = engine
        .apply(
            ASHA,
            draft(
                LeaveType::Earned,
                date!(2025 - 02 - 03),
                Some(date!(2025 - 02 - 12)),
            ),
        )
        .unwrap();
    assert!(
        engine
            .apply(ASHA, draft(LeaveType::Earned, date!(2025 - 03 - 03), None))
            .is_err()
    );

    engine.reject(MANAGER, saved.id).unwrap();

    assert!(
        engine
            .apply(ASHA, draft(LeaveType::Earned, date!(2025 - 03 - 03), None))
            .is_ok()
    );
}
