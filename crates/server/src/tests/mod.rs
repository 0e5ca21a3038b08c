// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use leave_ledger::FixedClock;
use time::macros::date;
use tower::ServiceExt;

const SEED_JSON: &str = r#"{
    "employees": [
        { "id": 1, "full_name": "Sanjay Kulkarni", "role": "HOD", "gender": "MALE",
          "join_date": "2017-08-01", "department": "Engineering" },
        { "id": 2, "full_name": "Asha Rao", "role": "EMPLOYEE", "gender": "FEMALE",
          "join_date": "2020-01-15", "department": "Engineering", "reporting_to": 1 },
        { "id": 3, "full_name": "Ravi Kumar", "role": "EMPLOYEE", "gender": "MALE",
          "join_date": "2021-09-01", "department": "Engineering", "reporting_to": 1 }
    ],
    "holidays": [ { "date": "2025-01-14", "name": "Pongal" } ]
}"#;

const MANAGER: &str = "1";
const ASHA: &str = "2";
const RAVI: &str = "3";

/// Helper to create test app state with a seeded in-memory database.
fn create_test_app_state() -> AppState<FixedClock> {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    persistence
        .seed(&SeedData::from_json(SEED_JSON).unwrap())
        .unwrap();
    AppState::new(LeaveEngine::new(
        persistence,
        FixedClock::new(date!(2025 - 03 - 03)),
    ))
}

fn apply_body(leave_type: &str, start_date: &str, end_date: Option<&str>) -> String {
    let request: ApplyLeaveRequest = ApplyLeaveRequest {
        leave_type: leave_type.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.map(str::to_string),
        reason: String::from("Family function"),
    };
    serde_json::to_string(&request).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, actor: Option<&str>, body: Option<String>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    let request: Request<Body> = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

async fn submit(app: &Router, actor: &str, leave_type: &str, start_date: &str, end_date: Option<&str>) -> i64 {
    let response: Response = send(
        app,
        "POST",
        "/leaves",
        Some(actor),
        Some(apply_body(leave_type, start_date, end_date)),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::CREATED);
    let body: ApplyLeaveResponse = read_json(response).await;
    body.application.application_id
}

#[tokio::test]
async fn test_missing_actor_is_unauthorized() {
    let app: Router = build_router(create_test_app_state());

    let response: Response = send(&app, "GET", "/leaves", None, None).await;
    assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);

    let error: ErrorResponse = read_json(response).await;
    assert!(error.error);

    let garbled: Response = send(&app, "GET", "/leaves/balance", Some("asha"), None).await;
    assert_eq!(garbled.status(), HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_apply_and_list() {
    let app: Router = build_router(create_test_app_state());

    let id: i64 = submit(&app, ASHA, "EL", "2025-03-10", Some("2025-03-12")).await;
    assert!(id > 0);

    let response: Response = send(&app, "GET", "/leaves", Some(ASHA), None).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let listed: ListLeavesResponse = read_json(response).await;
    assert_eq!(listed.applications.len(), 1);
    assert_eq!(listed.applications[0].application_id, id);
    assert_eq!(listed.applications[0].status, "PENDING");
    assert_eq!(listed.applications[0].remaining_leaves, Some(17.0));
}

#[tokio::test]
async fn test_rejected_requests_map_to_status_codes() {
    let app: Router = build_router(create_test_app_state());
    submit(&app, ASHA, "EL", "2025-03-10", Some("2025-03-12")).await;

    let bad_type: Response = send(
        &app,
        "POST",
        "/leaves",
        Some(ASHA),
        Some(apply_body("VACATION", "2025-03-20", None)),
    )
    .await;
    assert_eq!(bad_type.status(), HttpStatusCode::BAD_REQUEST);

    let overlap: Response = send(
        &app,
        "POST",
        "/leaves",
        Some(ASHA),
        Some(apply_body("CL", "2025-03-11", None)),
    )
    .await;
    assert_eq!(overlap.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = read_json(overlap).await;
    assert!(error.message.contains("no_overlap"));

    let no_manager: Response = send(
        &app,
        "POST",
        "/leaves",
        Some(MANAGER),
        Some(apply_body("CL", "2025-03-04", None)),
    )
    .await;
    assert_eq!(no_manager.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);

    let stranger: Response = send(&app, "GET", "/leaves/balance", Some("77"), None).await;
    assert_eq!(stranger.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_decision_endpoints() {
    let app_state: AppState<FixedClock> = create_test_app_state();
    let app: Router = build_router(app_state.clone());
    let id: i64 = submit(&app, RAVI, "CL", "2025-03-05", None).await;

    let by_peer: Response = send(&app, "POST", &format!("/leaves/{id}/approve"), Some(ASHA), None).await;
    assert_eq!(by_peer.status(), HttpStatusCode::FORBIDDEN);

    let approved: Response =
        send(&app, "POST", &format!("/leaves/{id}/approve"), Some(MANAGER), None).await;
    assert_eq!(approved.status(), HttpStatusCode::OK);
    let decision: LeaveDecisionResponse = read_json(approved).await;
    assert_eq!(decision.application.status, "APPROVED");

    let again: Response = send(&app, "POST", &format!("/leaves/{id}/reject"), Some(MANAGER), None).await;
    assert_eq!(again.status(), HttpStatusCode::CONFLICT);

    let missing: Response = send(&app, "POST", "/leaves/999/approve", Some(MANAGER), None).await;
    assert_eq!(missing.status(), HttpStatusCode::NOT_FOUND);

    app_state
        .engine
        .lock()
        .await
        .clock_mut()
        .set(date!(2025 - 03 - 21));
    let late: Response = send(&app, "POST", &format!("/leaves/{id}/cancel"), Some(MANAGER), None).await;
    assert_eq!(late.status(), HttpStatusCode::CONFLICT);

    app_state
        .engine
        .lock()
        .await
        .clock_mut()
        .set(date!(2025 - 03 - 20));
    let cancelled: Response =
        send(&app, "POST", &format!("/leaves/{id}/cancel"), Some(MANAGER), None).await;
    assert_eq!(cancelled.status(), HttpStatusCode::OK);
}

#[tokio::test]
async fn test_approver_views() {
    let app: Router = build_router(create_test_app_state());
    let first: i64 = submit(&app, RAVI, "CL", "2025-03-05", None).await;
    submit(&app, ASHA, "HALF_DAY_CL", "2025-03-04", None).await;
    send(&app, "POST", &format!("/leaves/{first}/approve"), Some(MANAGER), None).await;

    let pending: ListLeavesResponse =
        read_json(send(&app, "GET", "/leaves/pending", Some(MANAGER), None).await).await;
    assert_eq!(pending.applications.len(), 1);
    assert_eq!(pending.applications[0].employee_name.as_deref(), Some("Asha Rao"));

    let cancellable: ListLeavesResponse =
        read_json(send(&app, "GET", "/leaves/cancellable", Some(MANAGER), None).await).await;
    assert_eq!(cancellable.applications.len(), 1);
    assert_eq!(cancellable.applications[0].application_id, first);

    let stats: ApproverStatsResponse =
        read_json(send(&app, "GET", "/leaves/stats", Some(MANAGER), None).await).await;
    assert_eq!((stats.pending, stats.approved, stats.rejected), (1, 1, 0));

    let overview: DepartmentOverviewResponse =
        read_json(send(&app, "GET", "/leaves/department", Some(MANAGER), None).await).await;
    assert_eq!(overview.department.as_deref(), Some("Engineering"));
    assert_eq!(overview.pending.len(), 1);

    let refused: Response = send(&app, "GET", "/leaves/department", Some(RAVI), None).await;
    assert_eq!(refused.status(), HttpStatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_balance_and_cl_availability() {
    let app: Router = build_router(create_test_app_state());
    submit(&app, ASHA, "HALF_DAY_CL", "2025-03-04", None).await;

    let balance: BalanceResponse =
        read_json(send(&app, "GET", "/leaves/balance", Some(ASHA), None).await).await;
    let casual = balance.bucket("CL").unwrap();
    assert_eq!((casual.used, casual.remaining), (0.5, 2.5));

    let may: ClAvailabilityResponse = read_json(
        send(
            &app,
            "GET",
            "/leaves/cl-availability?year=2025&month=5",
            Some(ASHA),
            None,
        )
        .await,
    )
    .await;
    assert!((may.available - 4.5).abs() < f64::EPSILON);

    let bad_month: Response = send(
        &app,
        "GET",
        "/leaves/cl-availability?year=2025&month=13",
        Some(ASHA),
        None,
    )
    .await;
    assert_eq!(bad_month.status(), HttpStatusCode::BAD_REQUEST);
}
