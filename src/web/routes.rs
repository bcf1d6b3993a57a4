//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::warn;

use crate::domain::{NetworkError, PassengerEvent, StationId, TravelRoute};
use crate::planner::RoutePlanner;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/route/fastest", get(fastest_route))
        .route("/route/quiet", get(quiet_route))
        .route("/passenger-events", post(record_passenger_event))
        .route("/stations/{id}/passenger-count", get(passenger_count))
        .route("/stations/{id}/routes", get(routes_serving))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Fastest route between two stations.
async fn fastest_route(
    State(state): State<AppState>,
    Query(query): Query<FastestRouteQuery>,
) -> Result<Json<TravelRoute>, AppError> {
    let from = parse_station(&query.from)?;
    let to = parse_station(&query.to)?;

    let network = state.network.read().await;
    Ok(Json(RoutePlanner::new(&network).fastest(&from, &to)))
}

/// Quiet route between two stations.
async fn quiet_route(
    State(state): State<AppState>,
    Query(query): Query<QuietRouteQuery>,
) -> Result<Json<TravelRoute>, AppError> {
    let from = parse_station(&query.from)?;
    let to = parse_station(&query.to)?;

    let max_slowdown_pc = query.max_slowdown_pc.unwrap_or(state.quiet.max_slowdown_pc);
    let min_quietness_pc = query
        .min_quietness_pc
        .unwrap_or(state.quiet.min_quietness_pc);
    let max_n_paths = query.max_n_paths.unwrap_or(state.quiet.max_n_paths);

    for (name, value) in [
        ("max_slowdown_pc", max_slowdown_pc),
        ("min_quietness_pc", min_quietness_pc),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(AppError::BadRequest {
                message: format!("{name} must be between 0 and 1, got {value}"),
            });
        }
    }

    let network = state.network.read().await;
    Ok(Json(RoutePlanner::new(&network).quiet(
        &from,
        &to,
        max_slowdown_pc,
        min_quietness_pc,
        max_n_paths,
    )))
}

/// Record a passenger event.
async fn record_passenger_event(
    State(state): State<AppState>,
    Json(event): Json<PassengerEvent>,
) -> Result<StatusCode, AppError> {
    let mut network = state.network.write().await;
    network.record_event(&event)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current passenger count at a station.
async fn passenger_count(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PassengerCountResponse>, AppError> {
    let station_id = parse_station(&id)?;

    let network = state.network.read().await;
    let count = network.passenger_count(&station_id)?;
    let name = network
        .station(&station_id)
        .map(|s| s.name)
        .unwrap_or_default();

    Ok(Json(PassengerCountResponse {
        station_id,
        name,
        passenger_count: count,
    }))
}

/// Routes serving a station.
async fn routes_serving(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoutesServingResponse>, AppError> {
    let station_id = parse_station(&id)?;

    let network = state.network.read().await;
    let routes = network.routes_serving(&station_id);

    Ok(Json(RoutesServingResponse { station_id, routes }))
}

fn parse_station(raw: &str) -> Result<StationId, AppError> {
    StationId::parse(raw).map_err(|_| AppError::BadRequest {
        message: format!("invalid station id: {raw:?}"),
    })
}

/// Web-layer error with an HTTP status.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        match e {
            NetworkError::UnknownStation(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
