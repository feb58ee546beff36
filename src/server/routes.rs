//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::coord::rank::RankedPoint;
use crate::coord::Coordinates;
use crate::error::Error;
use crate::format::Listing;
use crate::poi::feed::parse_feed_value;
use crate::poi::PointOfInterest;
use crate::quiz::{AnswerOutcome, PointStatus};
use crate::server::state::AppState;
use crate::session::{ProgressReport, Session};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/points", get(list_points_handler).put(load_points_handler))
        .route("/api/points/nearest", get(nearest_handler))
        .route("/api/points/:id", get(point_handler))
        .route("/api/points/:id/select", post(select_handler))
        .route("/api/points/:id/answer", post(answer_handler))
        .route(
            "/api/position",
            put(update_position_handler).delete(clear_position_handler),
        )
        .route("/api/progress", get(progress_handler))
        .route("/api/restart", post(restart_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip, default = "internal_error_status")]
    pub status: StatusCode,
}

fn internal_error_status() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            error: rejection.body_text(),
            code: "INVALID_INPUT".to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::InvalidCoordinates(_) => (StatusCode::BAD_REQUEST, "INVALID_COORDINATES"),
            Error::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            Error::InvalidFeed(_) => (StatusCode::BAD_REQUEST, "INVALID_FEED"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
            status,
        }
    }
}

/// A point as shown to players; never carries the expected answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointView {
    pub id: String,
    pub name: String,
    pub question: String,
    pub lat: f64,
    pub lng: f64,
    /// Distance from the current position, absent without a fix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    pub status: PointStatus,
}

impl PointView {
    fn new(point: &PointOfInterest, distance_meters: Option<f64>, status: PointStatus) -> Self {
        Self {
            id: point.id.to_string(),
            name: point.name.clone(),
            question: point.question.clone(),
            lat: point.coords.lat,
            lng: point.coords.lng,
            distance_meters,
            status,
        }
    }

    /// Ranked views only ever hold unsolved points
    fn from_ranked(ranked: &RankedPoint<'_>) -> Self {
        Self::new(ranked.point, Some(ranked.distance_meters), PointStatus::Unsolved)
    }
}

fn point_view(session: &Session, id: &str) -> Result<PointView, ApiError> {
    let point = session.quiz().get(id)?;
    Ok(PointView::new(
        point,
        session.distance_to(id)?,
        session.status(id)?,
    ))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    pub session_id: String,
    /// Number of loaded points
    pub points: usize,
    pub solved: usize,
    pub complete: bool,
    pub has_position: bool,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let session = state.session().await;
    let report = session.progress_report();

    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        session_id: report.session_id.to_string(),
        points: report.total,
        solved: report.solved,
        complete: report.complete,
        has_position: report.has_position,
    })
}

/// Ranked points response
#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    /// Unsolved points, nearest first
    pub points: Vec<PointView>,
    pub count: usize,
    pub has_position: bool,
    pub complete: bool,
}

fn points_response(state: &AppState, session: &Session) -> PointsResponse {
    let listing = Listing::from_session(
        session,
        state.config.game.reveal_radius(),
        state.config.game.list_limit(),
    );
    let points: Vec<PointView> = listing.points.iter().map(PointView::from_ranked).collect();

    PointsResponse {
        count: points.len(),
        points,
        has_position: listing.origin.is_some(),
        complete: listing.progress.complete,
    }
}

/// List unsolved points nearest first
///
/// GET /api/points
async fn list_points_handler(State(state): State<Arc<AppState>>) -> Json<PointsResponse> {
    let session = state.session().await;
    Json(points_response(&state, &session))
}

/// Load a GeoJSON feed, replacing the current points and progress
///
/// PUT /api/points
async fn load_points_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ProgressReport>, ApiError> {
    let Json(feed) = payload?;
    let points = parse_feed_value(feed)?;

    let mut session = state.session().await;
    session.load_points(points)?;

    Ok(Json(session.progress_report()))
}

/// Nearest point response
#[derive(Debug, Serialize, Deserialize)]
pub struct NearestResponse {
    /// `None` without a location fix or when every point is solved
    pub point: Option<PointView>,
}

/// Nearest unsolved point inside the reveal radius
///
/// GET /api/points/nearest
async fn nearest_handler(State(state): State<Arc<AppState>>) -> Json<NearestResponse> {
    let session = state.session().await;
    let point = session
        .nearest_revealed(state.config.game.reveal_radius())
        .as_ref()
        .map(PointView::from_ranked);
    Json(NearestResponse { point })
}

/// Single point with its status
///
/// GET /api/points/:id
async fn point_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PointView>, ApiError> {
    let session = state.session().await;
    Ok(Json(point_view(&session, &id)?))
}

/// Make a point the active challenge
///
/// POST /api/points/:id/select
async fn select_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PointView>, ApiError> {
    let mut session = state.session().await;
    session.select_point(&id)?;
    Ok(Json(point_view(&session, &id)?))
}

/// Answer submission body
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub answer: String,
}

/// Answer submission result
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub outcome: AnswerOutcome,
    /// True for correct and already-solved outcomes
    pub correct: bool,
    pub complete: bool,
    pub solved: usize,
    pub total: usize,
}

/// Submit an answer for a point
///
/// POST /api/points/:id/answer
async fn answer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>, ApiError> {
    let Json(req) = payload?;
    let mut session = state.session().await;
    let outcome = session.submit_answer(&id, &req.answer)?;

    Ok(Json(AnswerResponse {
        outcome,
        correct: outcome.is_success(),
        complete: session.is_complete(),
        solved: session.quiz().solved_count(),
        total: session.quiz().total(),
    }))
}

/// Position update body
#[derive(Debug, Deserialize)]
pub struct PositionRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Record a location fix and return the re-ranked points
///
/// PUT /api/position
async fn update_position_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PositionRequest>, JsonRejection>,
) -> Result<Json<PointsResponse>, ApiError> {
    let Json(req) = payload?;
    let mut session = state.session().await;
    session.update_position(Coordinates::new(req.lat, req.lng))?;
    Ok(Json(points_response(&state, &session)))
}

/// Drop the location fix
///
/// DELETE /api/position
async fn clear_position_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session().await.clear_position();
    StatusCode::NO_CONTENT
}

/// Progress report
///
/// GET /api/progress
async fn progress_handler(State(state): State<Arc<AppState>>) -> Json<ProgressReport> {
    let session = state.session().await;
    Json(session.progress_report())
}

/// Start the game over
///
/// POST /api/restart
async fn restart_handler(State(state): State<Arc<AppState>>) -> Json<ProgressReport> {
    let mut session = state.session().await;
    session.restart();
    Json(session.progress_report())
}
