//! The transport network: topology store, edge index, passenger counter.
//!
//! `TransportNetwork` owns every station, line, route, and edge. The
//! topology is built once (`add_station`, `add_line`) and is immutable
//! afterwards; only travel times and passenger counts change at runtime.

mod graph;
pub mod topology;

use std::collections::HashMap;

use tracing::debug;

pub(crate) use graph::{EdgeIdx, LineIdx, LineRecord, RouteEdge, RouteIdx, RouteRecord, StationIdx, StationNode};

use crate::domain::{
    Line, LineId, NetworkError, PassengerEvent, PassengerEventKind, Route, RouteId, Station,
    StationId,
};

/// In-memory representation of the metro network.
///
/// Invariants maintained across every mutation:
/// - station, line, and (line, route) ids are unique;
/// - every stop of every route resolves to a station in the store;
/// - each non-terminal stop of a route has exactly one outgoing edge for
///   that route, pointing at the route's next stop;
/// - terminal stops have no outgoing edge for their route;
/// - travel times are symmetric between adjacent stations.
#[derive(Debug, Clone, Default)]
pub struct TransportNetwork {
    stations: Vec<StationNode>,
    edges: Vec<RouteEdge>,
    routes: Vec<RouteRecord>,
    lines: Vec<LineRecord>,

    station_ids: HashMap<StationId, StationIdx>,
    line_ids: HashMap<LineId, LineIdx>,

    /// Routes ending at a station. Terminal stops have no outgoing edge for
    /// their route, so `routes_serving` needs this side index.
    terminals: HashMap<StationIdx, Vec<RouteIdx>>,
}

impl TransportNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station to the network.
    ///
    /// The station starts with no passengers and no edges.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateStation` if a station with the same id is already
    /// in the network.
    pub fn add_station(&mut self, station: Station) -> Result<(), NetworkError> {
        if self.station_ids.contains_key(&station.id) {
            return Err(NetworkError::DuplicateStation(station.id));
        }

        let idx = StationIdx(self.stations.len() as u32);
        self.station_ids.insert(station.id.clone(), idx);
        self.stations.push(StationNode {
            id: station.id,
            name: station.name,
            passenger_count: 0,
            edges: Vec::new(),
        });

        Ok(())
    }

    /// Add a line and all of its routes to the network.
    ///
    /// The operation is atomic: every route is validated before any state is
    /// touched, so a rejected line leaves no trace.
    ///
    /// # Errors
    ///
    /// - `DuplicateLine` if the line id is already registered.
    /// - `DuplicateRoute` if the same route id appears twice on the line.
    /// - `MalformedRoute` if a route violates its well-formedness
    ///   invariants or names a different owning line.
    /// - `UnknownStation` if a route stop is not in the network.
    pub fn add_line(&mut self, line: Line) -> Result<(), NetworkError> {
        if self.line_ids.contains_key(&line.id) {
            return Err(NetworkError::DuplicateLine(line.id));
        }

        // Validation pass: nothing is installed until every route checks out.
        let mut resolved: Vec<(&Route, Vec<StationIdx>)> = Vec::with_capacity(line.routes.len());
        let mut seen_routes = std::collections::HashSet::new();
        for route in &line.routes {
            if route.line_id != line.id {
                return Err(NetworkError::MalformedRoute {
                    route: route.id.clone(),
                    reason: "route names a different owning line",
                });
            }
            route.validate().map_err(|e| NetworkError::MalformedRoute {
                route: route.id.clone(),
                reason: e.reason(),
            })?;
            if !seen_routes.insert(route.id.clone()) {
                return Err(NetworkError::DuplicateRoute {
                    line: line.id,
                    route: route.id.clone(),
                });
            }

            let stops = route
                .stops
                .iter()
                .map(|stop| {
                    self.station_ids
                        .get(stop)
                        .copied()
                        .ok_or_else(|| NetworkError::UnknownStation(stop.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            resolved.push((route, stops));
        }

        // Install pass: register the line, its routes, and one edge per
        // (non-terminal stop, route) pair. New edges start at travel time 0.
        let line_idx = LineIdx(self.lines.len() as u32);
        let mut route_map = HashMap::with_capacity(resolved.len());
        for (route, stops) in resolved {
            let route_idx = RouteIdx(self.routes.len() as u32);

            for pair in stops.windows(2) {
                let edge_idx = EdgeIdx(self.edges.len() as u32);
                self.edges.push(RouteEdge {
                    route: route_idx,
                    next_stop: pair[1],
                    travel_time: 0,
                });
                self.stations[pair[0].index()].edges.push(edge_idx);
            }

            // Last stop: the route ends here, no outgoing edge.
            let terminal = *stops.last().expect("validated: at least two stops");
            self.terminals.entry(terminal).or_default().push(route_idx);

            route_map.insert(route.id.clone(), route_idx);
            self.routes.push(RouteRecord {
                id: route.id.clone(),
                line: line_idx,
                stops,
            });
        }

        debug!(line = %line.id, routes = line.routes.len(), "line added");
        self.line_ids.insert(line.id.clone(), line_idx);
        self.lines.push(LineRecord {
            id: line.id,
            name: line.name,
            routes: route_map,
        });

        Ok(())
    }

    /// Record a passenger event at a station.
    ///
    /// `In` increments the station's count, `Out` decrements it. Events are
    /// integer deltas, so out-of-order delivery still produces correct final
    /// counts.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStation` if the event's station is not in the
    /// network.
    pub fn record_event(&mut self, event: &PassengerEvent) -> Result<(), NetworkError> {
        let idx = self.resolve(&event.station_id)?;
        let node = &mut self.stations[idx.index()];
        match event.kind {
            PassengerEventKind::In => node.passenger_count += 1,
            PassengerEventKind::Out => node.passenger_count -= 1,
        }
        Ok(())
    }

    /// The number of passengers currently recorded at a station.
    ///
    /// The count can be negative: recording may begin mid-day, with more
    /// exits than entries observed.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStation` if the station is not in the network.
    pub fn passenger_count(&self, station: &StationId) -> Result<i64, NetworkError> {
        let idx = self.resolve(station)?;
        Ok(self.stations[idx.index()].passenger_count)
    }

    /// The routes serving a station.
    ///
    /// This is the union of the routes departing from the station (one per
    /// outgoing edge) and the routes terminating at it, which have no
    /// outgoing edge there. Returns an empty list for an unknown station.
    pub fn routes_serving(&self, station: &StationId) -> Vec<RouteId> {
        let Some(idx) = self.station_idx(station) else {
            return Vec::new();
        };

        let mut routes: Vec<RouteId> = self.stations[idx.index()]
            .edges
            .iter()
            .map(|&e| self.routes[self.edges[e.index()].route.index()].id.clone())
            .collect();

        if let Some(terminating) = self.terminals.get(&idx) {
            routes.extend(
                terminating
                    .iter()
                    .map(|&r| self.routes[r.index()].id.clone()),
            );
        }

        routes
    }

    /// Set the travel time between two adjacent stations.
    ///
    /// The travel time is shared by every directed edge between the two
    /// stations, in both directions and across all routes.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStation` if either station is missing, or
    /// `NotAdjacent` if no route connects the two stations directly.
    pub fn set_travel_time(
        &mut self,
        station_a: &StationId,
        station_b: &StationId,
        travel_time: u32,
    ) -> Result<(), NetworkError> {
        let a = self.resolve(station_a)?;
        let b = self.resolve(station_b)?;

        let mut found_any = false;
        for (from, to) in [(a, b), (b, a)] {
            for &edge_idx in &self.stations[from.index()].edges {
                let edge = &mut self.edges[edge_idx.index()];
                if edge.next_stop == to {
                    edge.travel_time = travel_time;
                    found_any = true;
                }
            }
        }

        if !found_any {
            return Err(NetworkError::NotAdjacent(
                station_a.clone(),
                station_b.clone(),
            ));
        }
        Ok(())
    }

    /// The travel time between two adjacent stations.
    ///
    /// Returns 0 if the stations are the same, unknown, or not adjacent.
    /// The time is direction independent, so the first edge found in either
    /// direction answers the query.
    pub fn travel_time_between(&self, station_a: &StationId, station_b: &StationId) -> u32 {
        let (Some(a), Some(b)) = (self.station_idx(station_a), self.station_idx(station_b))
        else {
            return 0;
        };
        if a == b {
            return 0;
        }

        for (from, to) in [(a, b), (b, a)] {
            for &edge_idx in &self.stations[from.index()].edges {
                let edge = &self.edges[edge_idx.index()];
                if edge.next_stop == to {
                    return edge.travel_time;
                }
            }
        }
        0
    }

    /// The cumulative travel time between two stations along one route.
    ///
    /// Walks the route from `station_a`, summing per-hop times until
    /// `station_b`. Returns 0 if the route is unknown, either station is
    /// unknown or not on the route, the stations are the same, or
    /// `station_a` does not come before `station_b`.
    pub fn route_travel_time(
        &self,
        line: &LineId,
        route: &RouteId,
        station_a: &StationId,
        station_b: &StationId,
    ) -> u32 {
        let Some(route_idx) = self
            .line_ids
            .get(line)
            .and_then(|&l| self.lines[l.index()].routes.get(route))
            .copied()
        else {
            return 0;
        };
        let (Some(a), Some(b)) = (self.station_idx(station_a), self.station_idx(station_b))
        else {
            return 0;
        };

        let mut total = 0;
        let mut found_a = false;
        for &stop in &self.routes[route_idx.index()].stops {
            if stop == a {
                found_a = true;
            }
            if stop == b {
                return total;
            }
            if found_a {
                let Some(edge_idx) = self.edge_for_route(stop, route_idx) else {
                    // Reached the route's terminal while still accumulating:
                    // station B is not ahead of A on this route.
                    return 0;
                };
                total += self.edges[edge_idx.index()].travel_time;
            }
        }

        // Station A, B, or both were not on the route.
        0
    }

    /// Look up a station descriptor by id.
    pub fn station(&self, id: &StationId) -> Option<Station> {
        let idx = self.station_idx(id)?;
        let node = &self.stations[idx.index()];
        Some(Station::new(node.id.clone(), node.name.clone()))
    }

    /// Look up a line's name by id.
    pub fn line_name(&self, id: &LineId) -> Option<&str> {
        let idx = self.line_ids.get(id)?;
        Some(&self.lines[idx.index()].name)
    }

    /// Number of stations in the network.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of lines in the network.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn resolve(&self, station: &StationId) -> Result<StationIdx, NetworkError> {
        self.station_idx(station)
            .ok_or_else(|| NetworkError::UnknownStation(station.clone()))
    }

    pub(crate) fn station_idx(&self, station: &StationId) -> Option<StationIdx> {
        self.station_ids.get(station).copied()
    }

    pub(crate) fn node(&self, idx: StationIdx) -> &StationNode {
        &self.stations[idx.index()]
    }

    pub(crate) fn edge(&self, idx: EdgeIdx) -> &RouteEdge {
        &self.edges[idx.index()]
    }

    pub(crate) fn route_record(&self, idx: RouteIdx) -> &RouteRecord {
        &self.routes[idx.index()]
    }

    pub(crate) fn line_record(&self, idx: LineIdx) -> &LineRecord {
        &self.lines[idx.index()]
    }

    /// The outgoing edge at `station` belonging to `route`, if any.
    pub(crate) fn edge_for_route(&self, station: StationIdx, route: RouteIdx) -> Option<EdgeIdx> {
        self.stations[station.index()]
            .edges
            .iter()
            .copied()
            .find(|&e| self.edges[e.index()].route == route)
    }
}
