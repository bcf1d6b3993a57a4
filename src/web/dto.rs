//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{RouteId, StationId};

/// Query parameters for a fastest-route request.
#[derive(Debug, Deserialize)]
pub struct FastestRouteQuery {
    /// Origin station id
    pub from: String,

    /// Destination station id
    pub to: String,
}

/// Query parameters for a quiet-route request.
///
/// The tuning parameters fall back to the server's configured defaults.
#[derive(Debug, Deserialize)]
pub struct QuietRouteQuery {
    /// Origin station id
    pub from: String,

    /// Destination station id
    pub to: String,

    /// Maximum fractional slowdown over the fastest route (0..=1)
    pub max_slowdown_pc: Option<f64>,

    /// Minimum fractional crowding reduction to adopt a slower path (0..=1)
    pub min_quietness_pc: Option<f64>,

    /// Cap on the number of near-optimal paths explored
    pub max_n_paths: Option<usize>,
}

/// Response for a passenger-count lookup.
#[derive(Debug, Serialize)]
pub struct PassengerCountResponse {
    /// Station id
    pub station_id: StationId,

    /// Station name
    pub name: String,

    /// Current passenger count; can be negative
    pub passenger_count: i64,
}

/// Response listing the routes serving a station.
#[derive(Debug, Serialize)]
pub struct RoutesServingResponse {
    /// Station id
    pub station_id: StationId,

    /// Routes departing from or terminating at the station
    pub routes: Vec<RouteId>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
