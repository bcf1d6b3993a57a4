//! Fastest-route search.
//!
//! The search runs Dijkstra's algorithm over *path stops*, not stations:
//! arriving at a station via one route is a different state from arriving
//! via another, because continuing on the current route is cheaper than
//! changing. A station with three routes through it contributes three
//! distinct search states (four counting the origin state).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::domain::{StationId, Step, TravelRoute};
use crate::network::{EdgeIdx, StationIdx, TransportNetwork};

/// Cost of switching routes mid-journey, in the same unit as travel times
/// (minutes). Applied whenever consecutive edges of a path belong to
/// different routes; never applied at the origin.
pub const ROUTE_CHANGE_PENALTY: u32 = 5;

/// A search state: a station plus the edge used to arrive at it.
///
/// `arrival` is `None` only for the origin of a search. For every other
/// state the arriving edge identifies the route the journey is currently
/// on, which decides whether the next hop pays [`ROUTE_CHANGE_PENALTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct PathStop {
    pub(crate) station: StationIdx,
    pub(crate) arrival: Option<EdgeIdx>,
}

/// A found path: path stops from origin to destination, each with its
/// cumulative cost from the origin. The last entry's cost is the path
/// total, route-change penalties included.
pub(crate) type Path = Vec<(PathStop, u32)>;

/// Total cost of a path, penalties included.
pub(crate) fn total_cost(path: &Path) -> u32 {
    path.last().map(|&(_, cost)| cost).unwrap_or(0)
}

/// Route planner over a transport network.
///
/// Borrows the network for the duration of the query; all methods are
/// read-only.
pub struct RoutePlanner<'a> {
    network: &'a TransportNetwork,
}

impl<'a> RoutePlanner<'a> {
    /// Create a planner over the given network.
    pub fn new(network: &'a TransportNetwork) -> Self {
        Self { network }
    }

    pub(crate) fn network(&self) -> &TransportNetwork {
        self.network
    }

    /// The fastest travel route from `from` to `to`.
    ///
    /// Cost is the sum of edge travel times plus [`ROUTE_CHANGE_PENALTY`]
    /// per route change. Three cases:
    /// - `from == to`: a single zero-length step;
    /// - no route, or either station unknown: empty steps, total 0;
    /// - otherwise: a minimum-cost walk from `from` to `to`.
    pub fn fastest(&self, from: &StationId, to: &StationId) -> TravelRoute {
        let (Some(a), Some(b)) = (
            self.network.station_idx(from),
            self.network.station_idx(to),
        ) else {
            return TravelRoute::unreachable(from.clone(), to.clone());
        };

        debug!(%from, %to, "fastest route query");

        if a == b {
            return TravelRoute::zero_length(from.clone());
        }

        match self.shortest_path(a, b, &HashSet::new()) {
            Some(path) => self.materialize(&path),
            None => TravelRoute::unreachable(from.clone(), to.clone()),
        }
    }

    /// Dijkstra over path stops from `origin` to `target`.
    ///
    /// `excluded` path stops are never entered; the quiet-route search uses
    /// this to force detours around already-found paths.
    ///
    /// Returns `None` when no path exists.
    pub(crate) fn shortest_path(
        &self,
        origin: StationIdx,
        target: StationIdx,
        excluded: &HashSet<PathStop>,
    ) -> Option<Path> {
        let network = self.network;
        let start = PathStop {
            station: origin,
            arrival: None,
        };

        // Cheapest known cost per path stop, and the stop it was reached
        // from, for path reconstruction.
        let mut cost: HashMap<PathStop, u32> = HashMap::from([(start, 0)]);
        let mut previous: HashMap<PathStop, PathStop> = HashMap::new();

        let mut frontier: BinaryHeap<Reverse<(u32, PathStop)>> = BinaryHeap::new();
        frontier.push(Reverse((0, start)));

        while let Some(Reverse((reached_at, stop))) = frontier.pop() {
            // An improvement was pushed after this entry; skip the stale one.
            if cost.get(&stop) != Some(&reached_at) {
                continue;
            }

            // Arrivals at the target are not expanded, but the queue keeps
            // draining: a cheaper arrival via another route may still be
            // queued behind this one.
            if stop.station == target {
                continue;
            }

            for &edge_idx in &network.node(stop.station).edges {
                let edge = network.edge(edge_idx);
                let neighbor = PathStop {
                    station: edge.next_stop,
                    arrival: Some(edge_idx),
                };
                if excluded.contains(&neighbor) {
                    continue;
                }

                let mut candidate = reached_at + edge.travel_time;
                if let Some(arrived_by) = stop.arrival
                    && network.edge(arrived_by).route != edge.route
                {
                    candidate += ROUTE_CHANGE_PENALTY;
                }

                if cost.get(&neighbor).is_none_or(|&best| candidate < best) {
                    cost.insert(neighbor, candidate);
                    previous.insert(neighbor, stop);
                    frontier.push(Reverse((candidate, neighbor)));
                }
            }
        }

        // Cheapest arrival at the target across all arriving routes. Ties
        // break on the stop itself so that identical searches pick the
        // identical path, whatever the map's iteration order.
        let (&arrival, &total) = cost
            .iter()
            .filter(|(stop, _)| stop.station == target)
            .min_by_key(|&(&stop, &c)| (c, stop))?;

        // Walk the previous-stop chain back to the origin, then flip.
        let mut path: Path = vec![(arrival, total)];
        let mut current = arrival;
        while current != start {
            let prev = previous[&current];
            path.push((prev, cost[&prev]));
            current = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Turn a found path into a `TravelRoute`.
    ///
    /// Steps carry raw edge times; route-change penalties only show up in
    /// the total.
    pub(crate) fn materialize(&self, path: &Path) -> TravelRoute {
        let network = self.network;

        // Paths always hold at least the origin and one arrival.
        let (first, _) = path[0];
        let &(last, total) = path.last().expect("paths are never empty");

        let mut steps = Vec::with_capacity(path.len() - 1);
        for pair in path.windows(2) {
            let (prev, _) = pair[0];
            let (stop, _) = pair[1];
            let edge_idx = stop
                .arrival
                .expect("every path stop after the origin records its arriving edge");
            let edge = network.edge(edge_idx);
            let route = network.route_record(edge.route);
            let line = network.line_record(route.line);

            steps.push(Step {
                start_station_id: network.node(prev.station).id.clone(),
                end_station_id: network.node(stop.station).id.clone(),
                line_id: Some(line.id.clone()),
                route_id: Some(route.id.clone()),
                travel_time: edge.travel_time,
            });
        }

        TravelRoute {
            start_station_id: network.node(first.station).id.clone(),
            end_station_id: network.node(last.station).id.clone(),
            total_travel_time: total,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TravelRoute;
    use crate::network::testutil::*;

    fn step(from: &str, to: &str, line: &str, route: &str, time: u32) -> Step {
        Step {
            start_station_id: sid(from),
            end_station_id: sid(to),
            line_id: Some(lid(line)),
            route_id: Some(rid(route)),
            travel_time: time,
        }
    }

    #[test]
    fn fastest_on_linear_network() {
        let network = linear_network();
        let planner = RoutePlanner::new(&network);

        let plan = planner.fastest(&sid("station_a"), &sid("station_c"));

        assert_eq!(
            plan,
            TravelRoute {
                start_station_id: sid("station_a"),
                end_station_id: sid("station_c"),
                total_travel_time: 5,
                steps: vec![
                    step("station_a", "station_b", "line_1", "route_1", 2),
                    step("station_b", "station_c", "line_1", "route_1", 3),
                ],
            },
        );
    }

    #[test]
    fn fastest_to_same_station() {
        let network = linear_network();
        let planner = RoutePlanner::new(&network);

        let plan = planner.fastest(&sid("station_b"), &sid("station_b"));

        assert_eq!(plan.total_travel_time, 0);
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].start_station_id, sid("station_b"));
        assert_eq!(plan.steps[0].end_station_id, sid("station_b"));
        assert_eq!(plan.steps[0].line_id, None);
        assert_eq!(plan.steps[0].route_id, None);
        assert_eq!(plan.steps[0].travel_time, 0);
    }

    #[test]
    fn fastest_unreachable_or_unknown() {
        let network = linear_network();
        let planner = RoutePlanner::new(&network);

        // The single route is one way; C cannot reach A.
        let plan = planner.fastest(&sid("station_c"), &sid("station_a"));
        assert!(plan.is_unreachable());
        assert_eq!(plan.total_travel_time, 0);

        let plan = planner.fastest(&sid("station_a"), &sid("station_x"));
        assert!(plan.is_unreachable());
    }

    /// Two parallel connections: a slow direct hop and a faster two-hop
    /// detour on another line. No penalty applies at the origin, so the
    /// detour wins.
    #[test]
    fn fastest_prefers_quick_detour_over_slow_direct_hop() {
        let mut network = TransportNetwork::new();
        for s in ["station_a", "station_b", "station_x"] {
            network.add_station(station(s)).unwrap();
        }
        network
            .add_line(line(
                "line_1",
                vec![route("line_1", "route_direct", &["station_a", "station_b"])],
            ))
            .unwrap();
        network
            .add_line(line(
                "line_2",
                vec![route(
                    "line_2",
                    "route_via_x",
                    &["station_a", "station_x", "station_b"],
                )],
            ))
            .unwrap();
        network.set_travel_time(&sid("station_a"), &sid("station_b"), 10).unwrap();
        network.set_travel_time(&sid("station_a"), &sid("station_x"), 2).unwrap();
        network.set_travel_time(&sid("station_x"), &sid("station_b"), 2).unwrap();

        let planner = RoutePlanner::new(&network);
        let plan = planner.fastest(&sid("station_a"), &sid("station_b"));

        assert_eq!(plan.total_travel_time, 4);
        assert_eq!(
            plan.steps,
            vec![
                step("station_a", "station_x", "line_2", "route_via_x", 2),
                step("station_x", "station_b", "line_2", "route_via_x", 2),
            ],
        );
    }

    /// A forced change between two lines pays the penalty, which appears in
    /// the total but is not attributed to any step.
    #[test]
    fn fastest_pays_penalty_on_route_change() {
        let mut network = TransportNetwork::new();
        for s in ["station_a", "station_b", "station_c"] {
            network.add_station(station(s)).unwrap();
        }
        network
            .add_line(line(
                "line_1",
                vec![route("line_1", "route_ab", &["station_a", "station_b"])],
            ))
            .unwrap();
        network
            .add_line(line(
                "line_2",
                vec![route("line_2", "route_bc", &["station_b", "station_c"])],
            ))
            .unwrap();
        network.set_travel_time(&sid("station_a"), &sid("station_b"), 2).unwrap();
        network.set_travel_time(&sid("station_b"), &sid("station_c"), 3).unwrap();

        let planner = RoutePlanner::new(&network);
        let plan = planner.fastest(&sid("station_a"), &sid("station_c"));

        let step_sum: u32 = plan.steps.iter().map(|s| s.travel_time).sum();
        assert_eq!(step_sum, 5);
        assert_eq!(plan.total_travel_time, step_sum + ROUTE_CHANGE_PENALTY);
    }

    /// Staying on the current route beats a raw-time-cheaper hop once the
    /// change penalty is counted.
    #[test]
    fn fastest_stays_on_route_when_change_is_not_worth_it() {
        let mut network = TransportNetwork::new();
        for s in ["station_a", "station_b", "station_c"] {
            network.add_station(station(s)).unwrap();
        }
        network
            .add_line(line(
                "line_1",
                vec![route(
                    "line_1",
                    "route_abc",
                    &["station_a", "station_b", "station_c"],
                )],
            ))
            .unwrap();
        network
            .add_line(line(
                "line_2",
                vec![route("line_2", "route_bc_express", &["station_b", "station_c"])],
            ))
            .unwrap();
        network.set_travel_time(&sid("station_a"), &sid("station_b"), 2).unwrap();
        // The shared time applies to both lines' b->c edges, so give the
        // pair a time where changing can never win: staying costs 6,
        // changing costs 6 + 5.
        network.set_travel_time(&sid("station_b"), &sid("station_c"), 6).unwrap();

        let planner = RoutePlanner::new(&network);
        let plan = planner.fastest(&sid("station_a"), &sid("station_c"));

        assert_eq!(plan.total_travel_time, 8);
        assert!(
            plan.steps
                .iter()
                .all(|s| s.route_id == Some(rid("route_abc"))),
            "the plan should stay on route_abc: {:?}",
            plan.steps,
        );
    }

    #[test]
    fn fastest_route_is_contiguous() {
        let network = linear_network();
        let planner = RoutePlanner::new(&network);

        let plan = planner.fastest(&sid("station_a"), &sid("station_c"));

        assert_eq!(plan.steps.first().unwrap().start_station_id, plan.start_station_id);
        assert_eq!(plan.steps.last().unwrap().end_station_id, plan.end_station_id);
        for pair in plan.steps.windows(2) {
            assert_eq!(pair[0].end_station_id, pair[1].start_station_id);
        }
    }
}
