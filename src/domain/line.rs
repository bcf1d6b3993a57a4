//! Line and route descriptors.
//!
//! A line is a named collection of routes; a route is a single possible
//! journey across an ordered set of stops in one direction. There may or may
//! not be a corresponding route in the opposite direction.

use super::{LineId, RouteId, StationId};

/// Error returned when a route descriptor is not well formed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route: {reason}")]
pub struct InvalidRoute {
    reason: &'static str,
}

impl InvalidRoute {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }

    /// The reason the route was rejected.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// A route: one directional journey across a sequence of stops.
///
/// A `Route` is well formed if:
/// - `stops` has at least 2 stops;
/// - no stop appears more than once;
/// - `start_station_id` is the first stop and `end_station_id` the last.
///
/// Two routes are equal if they have the same id.
#[derive(Debug, Clone)]
pub struct Route {
    /// Unique route id.
    pub id: RouteId,

    /// Direction of travel, as labelled in the source data (e.g. "inbound").
    pub direction: String,

    /// Id of the line this route belongs to.
    pub line_id: LineId,

    /// First stop of the route.
    pub start_station_id: StationId,

    /// Last stop of the route.
    pub end_station_id: StationId,

    /// Ordered stops, start to end.
    pub stops: Vec<StationId>,
}

impl Route {
    /// Check the route's local well-formedness invariants.
    ///
    /// Stop *existence* is not checked here; the network checks it against
    /// its station registry when the owning line is added.
    pub fn validate(&self) -> Result<(), InvalidRoute> {
        if self.stops.len() < 2 {
            return Err(InvalidRoute::new("a route must have at least two stops"));
        }
        if self.stops.first() != Some(&self.start_station_id) {
            return Err(InvalidRoute::new("the first stop must be the start station"));
        }
        if self.stops.last() != Some(&self.end_station_id) {
            return Err(InvalidRoute::new("the last stop must be the end station"));
        }

        let mut seen = std::collections::HashSet::new();
        for stop in &self.stops {
            if !seen.insert(stop) {
                return Err(InvalidRoute::new("a stop may appear only once on a route"));
            }
        }

        Ok(())
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Route {}

/// A line: a named collection of one or more routes.
///
/// Every route of a well-formed line carries the line's own id as its
/// `line_id`; the network rejects the line otherwise.
///
/// Two lines are equal if they have the same id.
#[derive(Debug, Clone)]
pub struct Line {
    /// Unique line id.
    pub id: LineId,

    /// Human-readable line name.
    pub name: String,

    /// The routes this line owns.
    pub routes: Vec<Route>,
}

impl Line {
    /// Create a new line descriptor.
    pub fn new(id: LineId, name: impl Into<String>, routes: Vec<Route>) -> Self {
        Self {
            id,
            name: name.into(),
            routes,
        }
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Line {}
