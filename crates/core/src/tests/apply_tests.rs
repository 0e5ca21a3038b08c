// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    ADMIN, ASHA, InMemoryStore, MANAGER, NEW_JOINER, ORPHAN, VIKRAM, create_test_engine, draft,
};
use crate::{CoreError, FixedClock, LeaveEngine};
use leave_ledger_domain::{
    BalanceReport, Days, DomainError, Gender, LeaveApplication, LeaveBucket, LeaveStatus,
    LeaveType, Role, inclusive_day_count,
};
use time::macros::date;

fn rejection(result: Result<LeaveApplication, CoreError>) -> DomainError {
    match result {
        Err(CoreError::Validation(err)) => err,
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

#[test]
fn test_half_day_is_normalized_to_a_single_date() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));

    let saved: LeaveApplication = engine
        .apply(
            ASHA,
            draft(
                LeaveType::HalfDayCasual,
                date!(2025 - 03 - 05),
                Some(date!(2025 - 03 - 07)),
            ),
        )
        .unwrap();

    assert_eq!(saved.start_date, date!(2025 - 03 - 05));
    assert_eq!(saved.end_date, date!(2025 - 03 - 05));
    assert!(saved.is_half_day);
    assert_eq!(saved.status, LeaveStatus::Pending);
    assert_eq!(saved.approver_id, MANAGER);
    assert_eq!(saved.applied_on, date!(2025 - 03 - 03));
    assert_eq!(saved.department.as_deref(), Some("Engineering"));
    assert_eq!(saved.remaining_leaves, Some(Days::from_halves(5)));
}

#[test]
fn test_second_half_day_on_same_date_is_rejected() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));
    engine
        .apply(ASHA, draft(LeaveType::HalfDayCasual, date!(2025 - 03 - 05), None))
        .unwrap();

    let err: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::HalfDayEarned, date!(2025 - 03 - 05), None),
    ));
    assert_eq!(
        err,
        DomainError::DuplicateHalfDay {
            date: date!(2025 - 03 - 05)
        }
    );
}

#[test]
fn test_half_day_on_holiday_is_rejected() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 01 - 10));

    let err: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::HalfDayCasual, date!(2025 - 01 - 14), None),
    ));
    assert_eq!(
        err,
        DomainError::HalfDayOnHoliday {
            date: date!(2025 - 01 - 14)
        }
    );
}

#[test]
fn test_overlapping_reserved_leave_is_rejected() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));
    let first: LeaveApplication = engine
        .apply(
            ASHA,
            draft(
                LeaveType::Earned,
                date!(2025 - 03 - 10),
                Some(date!(2025 - 03 - 12)),
            ),
        )
        .unwrap();

    let err: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::Casual, date!(2025 - 03 - 11), None),
    ));
    let DomainError::OverlappingLeave { conflicts } = err else {
        panic!("expected an overlap failure, got {err:?}");
    };
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].application_id, first.id);
    assert_eq!(conflicts[0].leave_type, LeaveType::Earned);
}

#[test]
fn test_rejected_leave_does_not_block_dates() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));
    let first: LeaveApplication = engine
        .apply(ASHA, draft(LeaveType::Earned, date!(2025 - 03 - 10), None))
        .unwrap();
    engine.reject(MANAGER, first.id).unwrap();

    assert!(
        engine
            .apply(ASHA, draft(LeaveType::Earned, date!(2025 - 03 - 10), None))
            .is_ok()
    );
}

#[test]
fn test_administrators_cannot_apply() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));

    let err: DomainError = rejection(engine.apply(
        ADMIN,
        draft(LeaveType::Casual, date!(2025 - 03 - 04), None),
    ));
    assert_eq!(err, DomainError::RoleNotEligible { role: Role::Admin });
}

#[test]
fn test_gender_restricted_types() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));

    let maternity: DomainError = rejection(engine.apply(
        VIKRAM,
        draft(LeaveType::Maternity, date!(2025 - 04 - 01), None),
    ));
    assert_eq!(
        maternity,
        DomainError::GenderRestricted {
            leave_type: LeaveType::Maternity,
            required: Gender::Female,
        }
    );

    let paternity: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::Paternity, date!(2025 - 04 - 01), None),
    ));
    assert_eq!(
        paternity,
        DomainError::GenderRestricted {
            leave_type: LeaveType::Paternity,
            required: Gender::Male,
        }
    );
}

#[test]
fn test_maternity_end_date_is_computed() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 02 - 20));

    let saved: LeaveApplication = engine
        .apply(
            ASHA,
            draft(
                LeaveType::Maternity,
                date!(2025 - 03 - 01),
                Some(date!(2025 - 03 - 05)),
            ),
        )
        .unwrap();

    assert_eq!(saved.end_date, date!(2025 - 08 - 29));
    assert_eq!(inclusive_day_count(saved.start_date, saved.end_date), 182);
    assert_eq!(saved.remaining_leaves, Some(Days::ZERO));
}

#[test]
fn test_paternity_end_date_is_computed() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 02 - 20));

    let saved: LeaveApplication = engine
        .apply(VIKRAM, draft(LeaveType::Paternity, date!(2025 - 03 - 01), None))
        .unwrap();
    assert_eq!(saved.end_date, date!(2025 - 03 - 15));
}

#[test]
fn test_backdating_window() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 10));
    assert!(
        engine
            .apply(ASHA, draft(LeaveType::Casual, date!(2025 - 03 - 04), None))
            .is_ok()
    );

    let too_old: DomainError = rejection(engine.apply(
        VIKRAM,
        draft(LeaveType::Casual, date!(2025 - 03 - 03), None),
    ));
    assert!(matches!(too_old, DomainError::BackdateWindowExceeded { .. }));

    let past_earned: DomainError = rejection(engine.apply(
        VIKRAM,
        draft(LeaveType::Earned, date!(2025 - 03 - 09), None),
    ));
    assert!(matches!(past_earned, DomainError::StartDateInPast { .. }));
}

#[test]
fn test_end_before_start_is_rejected() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));

    let err: DomainError = rejection(engine.apply(
        ASHA,
        draft(
            LeaveType::Earned,
            date!(2025 - 03 - 12),
            Some(date!(2025 - 03 - 10)),
        ),
    ));
    assert!(matches!(err, DomainError::EndBeforeStart { .. }));
}

#[test]
fn test_missing_manager_is_a_configuration_error() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));

    let result: Result<LeaveApplication, CoreError> =
        engine.apply(ORPHAN, draft(LeaveType::Earned, date!(2025 - 03 - 10), None));
    assert!(matches!(result, Err(CoreError::Configuration(_))));
}

#[test]
fn test_unknown_applicant_is_not_found() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));

    let result: Result<LeaveApplication, CoreError> = engine.apply(
        leave_ledger_domain::EmployeeId::new(99),
        draft(LeaveType::Earned, date!(2025 - 03 - 10), None),
    );
    assert!(matches!(
        result,
        Err(CoreError::NotFound {
            resource: "Employee",
            id: 99
        })
    ));
}

#[test]
fn test_casual_leave_monthly_cap() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));
    engine
        .apply(ASHA, draft(LeaveType::Casual, date!(2025 - 03 - 12), None))
        .unwrap();

    let err: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::HalfDayCasual, date!(2025 - 03 - 20), None),
    ));
    assert_eq!(
        err,
        DomainError::MonthlyClCapExceeded {
            year: 2025,
            month: 3,
            used: Days::whole(1),
        }
    );
}

#[test]
fn test_two_casual_half_days_fill_a_month() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));
    engine
        .apply(ASHA, draft(LeaveType::HalfDayCasual, date!(2025 - 03 - 12), None))
        .unwrap();
    engine
        .apply(ASHA, draft(LeaveType::HalfDayCasual, date!(2025 - 03 - 13), None))
        .unwrap();

    let err: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::HalfDayCasual, date!(2025 - 03 - 14), None),
    ));
    assert!(matches!(err, DomainError::MonthlyClCapExceeded { .. }));
}

#[test]
fn test_casual_leave_skips_holidays() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 01 - 06));

    let saved: LeaveApplication = engine
        .apply(
            ASHA,
            draft(
                LeaveType::Casual,
                date!(2025 - 01 - 14),
                Some(date!(2025 - 01 - 15)),
            ),
        )
        .unwrap();
    assert_eq!(saved.remaining_leaves, Some(Days::ZERO));
}

#[test]
fn test_earned_leave_counts_holidays() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 01 - 06));

    let saved: LeaveApplication = engine
        .apply(
            ASHA,
            draft(
                LeaveType::Earned,
                date!(2025 - 01 - 13),
                Some(date!(2025 - 01 - 15)),
            ),
        )
        .unwrap();
    assert_eq!(saved.remaining_leaves, Some(Days::whole(17)));
}

#[test]
fn test_earlier_casual_month_blocked_by_advance_leave() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));
    engine
        .apply(ASHA, draft(LeaveType::Casual, date!(2025 - 05 - 06), None))
        .unwrap();

    let err: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::Casual, date!(2025 - 04 - 08), None),
    ));
    assert_eq!(
        err,
        DomainError::AdvanceClOrdering {
            latest_advance: date!(2025 - 05 - 06),
            start_date: date!(2025 - 04 - 08),
        }
    );
}

#[test]
fn test_casual_leave_before_join_month() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 05 - 26));

    let err: DomainError = rejection(engine.apply(
        NEW_JOINER,
        draft(LeaveType::Casual, date!(2025 - 05 - 28), None),
    ));
    assert_eq!(
        err,
        DomainError::BeforeJoinMonth {
            month: 5,
            join_month: 6
        }
    );
}

#[test]
fn test_casual_leave_next_year_is_rejected() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 12 - 20));

    let err: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::Casual, date!(2026 - 01 - 05), None),
    ));
    assert!(matches!(
        err,
        DomainError::OutsideCurrentYear {
            requested_year: 2026,
            current_year: 2025,
            ..
        }
    ));
}

#[test]
fn test_earned_leave_half_year_allotments() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 01 - 02));

    engine
        .apply(
            ASHA,
            draft(
                LeaveType::Earned,
                date!(2025 - 02 - 03),
                Some(date!(2025 - 02 - 12)),
            ),
        )
        .unwrap();

    let eleventh: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::Earned, date!(2025 - 03 - 03), None),
    ));
    assert!(eleventh.to_string().starts_with("Insufficient EL balance"));

    let report: BalanceReport = engine.balance(ASHA).unwrap();
    assert_eq!(
        report.get(LeaveBucket::EarnedLeave).unwrap().remaining,
        Days::whole(10)
    );

    engine
        .apply(
            ASHA,
            draft(
                LeaveType::Earned,
                date!(2025 - 07 - 01),
                Some(date!(2025 - 07 - 10)),
            ),
        )
        .unwrap();

    let beyond_annual: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::HalfDayEarned, date!(2025 - 07 - 14), None),
    ));
    assert!(matches!(
        beyond_annual,
        DomainError::InsufficientBalance {
            bucket: LeaveBucket::EarnedLeave,
            ..
        }
    ));
}

#[test]
fn test_advance_casual_leave_is_bounded_by_accrual_to_date() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 04));
    for start in [date!(2025 - 03 - 05), date!(2025 - 04 - 01), date!(2025 - 05 - 02)] {
        engine
            .apply(ASHA, draft(LeaveType::Casual, start, None))
            .unwrap();
    }

    let report: BalanceReport = engine.balance(ASHA).unwrap();
    assert_eq!(report.get(LeaveBucket::CasualLeave).unwrap().used, Days::whole(3));
    assert_eq!(report.get(LeaveBucket::CasualLeave).unwrap().remaining, Days::ZERO);

    let err: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::Casual, date!(2025 - 06 - 02), None),
    ));
    assert_eq!(
        err,
        DomainError::InsufficientBalance {
            bucket: LeaveBucket::CasualLeave,
            requested: Days::whole(1),
            available: Days::ZERO,
        }
    );

    engine.clock_mut().set(date!(2025 - 06 - 01));
    let june: LeaveApplication = engine
        .apply(ASHA, draft(LeaveType::Casual, date!(2025 - 06 - 02), None))
        .unwrap();
    assert_eq!(june.remaining_leaves, Some(Days::whole(2)));
}

#[test]
fn test_second_paternity_leave_in_a_year_is_rejected() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 02 - 20));
    engine
        .apply(VIKRAM, draft(LeaveType::Paternity, date!(2025 - 03 - 01), None))
        .unwrap();

    let err: DomainError = rejection(engine.apply(
        VIKRAM,
        draft(LeaveType::Paternity, date!(2025 - 06 - 02), None),
    ));
    assert_eq!(
        err,
        DomainError::InsufficientBalance {
            bucket: LeaveBucket::PaternityLeave,
            requested: Days::whole(15),
            available: Days::ZERO,
        }
    );
}

#[test]
fn test_maternity_leave_is_capped_per_year() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 02 - 20));
    engine
        .apply(ASHA, draft(LeaveType::Maternity, date!(2025 - 03 - 01), None))
        .unwrap();

    let err: DomainError = rejection(engine.apply(
        ASHA,
        draft(LeaveType::Maternity, date!(2025 - 09 - 01), None),
    ));
    assert_eq!(
        err,
        DomainError::InsufficientBalance {
            bucket: LeaveBucket::MaternityLeave,
            requested: Days::whole(182),
            available: Days::ZERO,
        }
    );
}

#[test]
fn test_leave_without_pay_annual_ceiling() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));

    // 300 calendar days less the 15 August holiday.
    let long: LeaveApplication = engine
        .apply(
            VIKRAM,
            draft(
                LeaveType::WithoutPay,
                date!(2025 - 03 - 04),
                Some(date!(2025 - 12 - 28)),
            ),
        )
        .unwrap();
    assert_eq!(long.remaining_leaves, Some(Days::whole(1)));

    let err: DomainError = rejection(engine.apply(
        VIKRAM,
        draft(
            LeaveType::WithoutPay,
            date!(2025 - 12 - 30),
            Some(date!(2025 - 12 - 31)),
        ),
    ));
    assert_eq!(
        err,
        DomainError::AnnualCapExceeded {
            bucket: LeaveBucket::LeaveWithoutPay,
            ceiling: Days::whole(300),
            used: Days::whole(299),
            requested: Days::whole(2),
        }
    );

    engine
        .apply(
            VIKRAM,
            draft(LeaveType::HalfDayWithoutPay, date!(2025 - 12 - 30), None),
        )
        .unwrap();
}

#[test]
fn test_leave_without_pay_half_day() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 03 - 03));

    let saved: LeaveApplication = engine
        .apply(
            VIKRAM,
            draft(LeaveType::HalfDayWithoutPay, date!(2025 - 03 - 04), None),
        )
        .unwrap();
    assert_eq!(saved.remaining_leaves, Some(Days::from_halves(599)));
}

#[test]
fn test_failed_application_rolls_back_balance_writes() {
    let mut engine: LeaveEngine<InMemoryStore, FixedClock> = create_test_engine(date!(2025 - 01 - 02));

    let err: DomainError = rejection(engine.apply(
        ASHA,
        draft(
            LeaveType::Earned,
            date!(2025 - 02 - 03),
            Some(date!(2025 - 02 - 13)),
        ),
    ));
    assert!(matches!(err, DomainError::InsufficientBalance { .. }));
    assert!(engine.store_mut().balances.is_empty());
    assert!(engine.store_mut().applications.is_empty());
}
