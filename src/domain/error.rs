//! Network error types.
//!
//! These errors represent rejected mutations and failed lookups on the
//! transport network. Queries that legitimately find nothing (no route, no
//! adjacency) do not error; they return an empty result instead.

use super::{LineId, RouteId, StationId};

/// Errors from mutating or querying the transport network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// A station with this id is already in the network
    #[error("station {0} is already in the network")]
    DuplicateStation(StationId),

    /// A line with this id is already in the network
    #[error("line {0} is already in the network")]
    DuplicateLine(LineId),

    /// The same route id appears more than once on a line
    #[error("route {route} appears more than once on line {line}")]
    DuplicateRoute { line: LineId, route: RouteId },

    /// A route violates its well-formedness invariants
    #[error("route {route} is malformed: {reason}")]
    MalformedRoute {
        route: RouteId,
        reason: &'static str,
    },

    /// A referenced station id is not in the network
    #[error("unknown station: {0}")]
    UnknownStation(StationId),

    /// The two stations are not adjacent on any route
    #[error("stations {0} and {1} are not adjacent on any route")]
    NotAdjacent(StationId, StationId),

    /// A passenger event carried an unrecognised kind
    #[error("unrecognised passenger event kind: {0}")]
    BadEventKind(String),
}
