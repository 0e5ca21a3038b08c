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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use leave_ledger::{Clock, LeaveEngine, SystemClock};
use leave_ledger_api::{
    ACTOR_HEADER, ApiError, ApplyLeaveRequest, ApplyLeaveResponse, ApproverStatsResponse,
    AuthenticatedActor, BalanceResponse, ClAvailabilityRequest, ClAvailabilityResponse,
    DepartmentOverviewResponse, LeaveDecision, LeaveDecisionResponse, ListLeavesResponse,
    apply_leave, decide_leave, get_approver_stats, get_balance, get_cl_availability,
    get_department_overview, list_cancellable, list_my_leaves, list_pending,
};
use leave_ledger_persistence::{Persistence, PersistenceError, SeedData};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Leave Ledger Server - HTTP server for the Leave Ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// JSON file with employees and holidays to load at startup
    #[arg(short, long)]
    seed: Option<String>,
}

/// Application state shared across handlers.
///
/// The engine owns the single database connection, so it sits behind a
/// Mutex and requests are served one at a time.
struct AppState<C> {
    engine: Arc<Mutex<LeaveEngine<Persistence, C>>>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<C> AppState<C> {
    fn new(engine: LeaveEngine<Persistence, C>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidState { .. } => StatusCode::CONFLICT,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Configuration { .. } | ApiError::Internal { .. } => {
                error!(error = %err, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Reads the acting employee from the request headers.
fn authenticate(headers: &HeaderMap) -> Result<AuthenticatedActor, HttpError> {
    let value: Option<&str> = headers
        .get(ACTOR_HEADER)
        .and_then(|header| header.to_str().ok());
    AuthenticatedActor::from_header(value).map_err(|e| HttpError::from(ApiError::from(e)))
}

/// Handler for POST `/leaves` endpoint.
///
/// Submits a leave application for the acting employee.
async fn handle_apply<C: Clock>(
    AxumState(app_state): AxumState<AppState<C>>,
    headers: HeaderMap,
    Json(req): Json<ApplyLeaveRequest>,
) -> Result<(StatusCode, Json<ApplyLeaveResponse>), HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    info!(
        actor = %actor.employee_id,
        leave_type = %req.leave_type,
        start_date = %req.start_date,
        "Handling apply request"
    );

    let mut engine = app_state.engine.lock().await;
    let response: ApplyLeaveResponse = apply_leave(&mut *engine, &req, &actor)?;
    drop(engine);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/leaves` endpoint.
///
/// Lists the acting employee's applications.
async fn handle_list_mine<C: Clock>(
    AxumState(app_state): AxumState<AppState<C>>,
    headers: HeaderMap,
) -> Result<Json<ListLeavesResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut engine = app_state.engine.lock().await;
    Ok(Json(list_my_leaves(&mut *engine, &actor)?))
}

/// Handler for GET `/leaves/balance` endpoint.
async fn handle_balance<C: Clock>(
    AxumState(app_state): AxumState<AppState<C>>,
    headers: HeaderMap,
) -> Result<Json<BalanceResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut engine = app_state.engine.lock().await;
    Ok(Json(get_balance(&mut *engine, &actor)?))
}

/// Handler for GET `/leaves/cl-availability` endpoint.
async fn handle_cl_availability<C: Clock>(
    AxumState(app_state): AxumState<AppState<C>>,
    headers: HeaderMap,
    Query(query): Query<ClAvailabilityRequest>,
) -> Result<Json<ClAvailabilityResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut engine = app_state.engine.lock().await;
    Ok(Json(get_cl_availability(&mut *engine, query, &actor)?))
}

/// Handler for GET `/leaves/pending` endpoint.
///
/// Lists applications awaiting the acting employee's decision.
async fn handle_pending<C: Clock>(
    AxumState(app_state): AxumState<AppState<C>>,
    headers: HeaderMap,
) -> Result<Json<ListLeavesResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut engine = app_state.engine.lock().await;
    Ok(Json(list_pending(&mut *engine, &actor)?))
}

/// Handler for GET `/leaves/cancellable` endpoint.
async fn handle_cancellable<C: Clock>(
    AxumState(app_state): AxumState<AppState<C>>,
    headers: HeaderMap,
) -> Result<Json<ListLeavesResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut engine = app_state.engine.lock().await;
    Ok(Json(list_cancellable(&mut *engine, &actor)?))
}

/// Handler for GET `/leaves/stats` endpoint.
async fn handle_stats<C: Clock>(
    AxumState(app_state): AxumState<AppState<C>>,
    headers: HeaderMap,
) -> Result<Json<ApproverStatsResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut engine = app_state.engine.lock().await;
    Ok(Json(get_approver_stats(&mut *engine, &actor)?))
}

/// Handler for GET `/leaves/department` endpoint.
async fn handle_department<C: Clock>(
    AxumState(app_state): AxumState<AppState<C>>,
    headers: HeaderMap,
) -> Result<Json<DepartmentOverviewResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(&headers)?;
    let mut engine = app_state.engine.lock().await;
    Ok(Json(get_department_overview(&mut *engine, &actor)?))
}

async fn handle_decision<C: Clock>(
    app_state: &AppState<C>,
    headers: &HeaderMap,
    application_id: i64,
    decision: LeaveDecision,
) -> Result<Json<LeaveDecisionResponse>, HttpError> {
    let actor: AuthenticatedActor = authenticate(headers)?;
    info!(
        actor = %actor.employee_id,
        application_id,
        decision = ?decision,
        "Handling leave decision"
    );
    let mut engine = app_state.engine.lock().await;
    Ok(Json(decide_leave(&mut *engine, application_id, decision, &actor)?))
}

/// Handler for POST `/leaves/{id}/approve` endpoint.
async fn handle_approve<C: Clock>(
    AxumState(app_state): AxumState<AppState<C>>,
    headers: HeaderMap,
    Path(application_id): Path<i64>,
) -> Result<Json<LeaveDecisionResponse>, HttpError> {
    handle_decision(&app_state, &headers, application_id, LeaveDecision::Approve).await
}

/// Handler for POST `/leaves/{id}/reject` endpoint.
async fn handle_reject<C: Clock>(
    AxumState(app_state): AxumState<AppState<C>>,
    headers: HeaderMap,
    Path(application_id): Path<i64>,
) -> Result<Json<LeaveDecisionResponse>, HttpError> {
    handle_decision(&app_state, &headers, application_id, LeaveDecision::Reject).await
}

/// Handler for POST `/leaves/{id}/cancel` endpoint.
async fn handle_cancel<C: Clock>(
    AxumState(app_state): AxumState<AppState<C>>,
    headers: HeaderMap,
    Path(application_id): Path<i64>,
) -> Result<Json<LeaveDecisionResponse>, HttpError> {
    handle_decision(&app_state, &headers, application_id, LeaveDecision::Cancel).await
}

/// Builds the application router with all endpoints.
fn build_router<C>(app_state: AppState<C>) -> Router
where
    C: Clock + Send + 'static,
{
    Router::new()
        .route("/leaves", post(handle_apply::<C>))
        .route("/leaves", get(handle_list_mine::<C>))
        .route("/leaves/balance", get(handle_balance::<C>))
        .route("/leaves/cl-availability", get(handle_cl_availability::<C>))
        .route("/leaves/pending", get(handle_pending::<C>))
        .route("/leaves/cancellable", get(handle_cancellable::<C>))
        .route("/leaves/stats", get(handle_stats::<C>))
        .route("/leaves/department", get(handle_department::<C>))
        .route("/leaves/{id}/approve", post(handle_approve::<C>))
        .route("/leaves/{id}/reject", post(handle_reject::<C>))
        .route("/leaves/{id}/cancel", post(handle_cancel::<C>))
        .with_state(app_state)
}

/// Opens the database and loads the seed file, if any.
fn open_persistence(args: &Args) -> Result<Persistence, Box<dyn std::error::Error>> {
    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(seed_path) = &args.seed {
        info!("Loading seed data from: {}", seed_path);
        let json: String = std::fs::read_to_string(seed_path)?;
        let seed: SeedData = SeedData::from_json(&json)?;
        persistence.seed(&seed).inspect_err(|e: &PersistenceError| {
            error!(error = %e, "Seed data rejected");
        })?;
    }

    Ok(persistence)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Leave Ledger Server");

    let persistence: Persistence = open_persistence(&args)?;
    let app_state: AppState<SystemClock> =
        AppState::new(LeaveEngine::new(persistence, SystemClock));

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
