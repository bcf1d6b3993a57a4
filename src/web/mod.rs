//! HTTP facade over the routing engine.
//!
//! Exposes the query operations (fastest route, quiet route, passenger
//! counts, routes serving a station) and the passenger-event ingest as a
//! small JSON API.

mod dto;
mod routes;
mod state;

pub use dto::{
    ErrorResponse, FastestRouteQuery, PassengerCountResponse, QuietRouteQuery,
    RoutesServingResponse,
};
pub use routes::{AppError, create_router};
pub use state::AppState;
