//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::{error, warn};

use crate::domain::{Coordinate, Line, Stop, StopSchedule};
use crate::locator;
use crate::staticmap::{SnapshotError, encode_png_base64};
use crate::store::StoreError;
use crate::vitrasa::ScheduleError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stops", get(list_stops))
        .route("/api/stops/find", get(find_stops))
        .route("/api/stops/find/location", get(find_stops_by_location))
        .route("/api/stops/find/location/image", get(nearby_stops_image))
        .route("/api/stops/:stop_number", get(get_stop))
        .route("/api/stops/:stop_number/schedule", get(get_stop_schedule))
        .route("/api/lines", get(list_lines))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every stop.
async fn list_stops(State(state): State<AppState>) -> Result<Json<Vec<Stop>>, AppError> {
    Ok(Json(state.store.list_stops()?))
}

/// List every line.
async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<Line>>, AppError> {
    Ok(Json(state.store.list_lines()?))
}

/// Find stops whose name contains the given text.
async fn find_stops(
    State(state): State<AppState>,
    Query(req): Query<FindStopsRequest>,
) -> Result<Json<Vec<Stop>>, AppError> {
    let text = req
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest {
            message: "Missing text query parameter".to_string(),
        })?;

    Ok(Json(state.store.find_stops_by_text(text.trim())?))
}

/// Find stops within a radius of a point, in dataset order.
async fn find_stops_by_location(
    State(state): State<AppState>,
    query: Result<Query<LocationRequest>, QueryRejection>,
) -> Result<Json<Vec<Stop>>, AppError> {
    let (origin, radius) = parse_location(query)?.0;
    let stops = state.store.list_stops()?;

    Ok(Json(locator::find_within_radius(origin, radius, &stops)))
}

/// Nearest stops around a point plus a map with them marked.
async fn nearby_stops_image(
    State(state): State<AppState>,
    query: Result<Query<LocationRequest>, QueryRejection>,
) -> Result<Json<NearbyStopsResponse>, AppError> {
    let ((origin, radius), limit) = parse_location(query)?;
    let limit = nearby_limit(limit);

    let all = state.store.list_stops()?;
    let stops = locator::nearest(origin, radius, &all, limit);

    let image = state.snapshots.build_snapshot(origin, &stops).await?;
    let image = encode_png_base64(&image)?;

    Ok(Json(NearbyStopsResponse {
        origin,
        radius,
        stops,
        image,
    }))
}

/// Get a stop by its public number.
async fn get_stop(
    State(state): State<AppState>,
    stop_number: Result<Path<u32>, PathRejection>,
) -> Result<Json<Stop>, AppError> {
    let stop = lookup_stop(&state, parse_stop_number(stop_number)?)?;
    Ok(Json(stop))
}

/// Get a stop and its upcoming arrivals.
async fn get_stop_schedule(
    State(state): State<AppState>,
    stop_number: Result<Path<u32>, PathRejection>,
) -> Result<Json<StopSchedule>, AppError> {
    let stop = lookup_stop(&state, parse_stop_number(stop_number)?)?;
    let schedules = state.schedules.get_schedules(stop.stop_number).await?;

    Ok(Json(StopSchedule { stop, schedules }))
}

fn lookup_stop(state: &AppState, stop_number: u32) -> Result<Stop, AppError> {
    state
        .store
        .stop_by_number(stop_number)?
        .ok_or_else(|| AppError::NotFound {
            message: format!("Stop {stop_number} not found"),
        })
}

fn parse_stop_number(path: Result<Path<u32>, PathRejection>) -> Result<u32, AppError> {
    path.map(|Path(n)| n).map_err(|_| AppError::BadRequest {
        message: "Invalid stop number".to_string(),
    })
}

/// Requested number of nearby stops, capped at what the map can label.
fn nearby_limit(requested: Option<usize>) -> usize {
    requested.unwrap_or(DEFAULT_NEARBY_LIMIT).min(MAX_NEARBY_LIMIT)
}

/// Validate a location query: `((origin, radius), limit)`.
fn parse_location(
    query: Result<Query<LocationRequest>, QueryRejection>,
) -> Result<((Coordinate, f64), Option<usize>), AppError> {
    let Query(req) = query.map_err(|e| AppError::BadRequest {
        message: format!("Invalid location query: {}", e.body_text()),
    })?;

    let origin = Coordinate::new(req.lat, req.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    if !req.radius.is_finite() || req.radius < 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Invalid radius: {}", req.radius),
        });
    }

    Ok(((origin, req.radius), req.limit))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
    BadGateway { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(e: ScheduleError) -> Self {
        match e {
            ScheduleError::Store(e) => e.into(),
            other => AppError::BadGateway {
                message: other.to_string(),
            },
        }
    }
}

impl From<SnapshotError> for AppError {
    fn from(e: SnapshotError) -> Self {
        let message = e.to_string();
        match e {
            SnapshotError::Encode(_) => AppError::Internal { message },
            _ => AppError::BadGateway { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
