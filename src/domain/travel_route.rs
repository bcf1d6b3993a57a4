//! Travel plans between two stations.

use serde::{Deserialize, Serialize};

use super::{LineId, RouteId, StationId};

/// One hop of a travel plan: a single edge traversal on a specific route.
///
/// `travel_time` is the raw edge time; any route-change penalty incurred on
/// arrival at this step is accounted for in the plan's total, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Station the hop departs from.
    pub start_station_id: StationId,

    /// Station the hop arrives at.
    pub end_station_id: StationId,

    /// Line of the route used, absent on a zero-length step.
    pub line_id: Option<LineId>,

    /// Route used, absent on a zero-length step.
    pub route_id: Option<RouteId>,

    /// Travel time of the hop, in minutes.
    pub travel_time: u32,
}

/// A travel plan between two stations.
///
/// If the start and end station are the same, `steps` contains exactly one
/// zero-length step. If there is no valid route between them, or either is
/// not in the network, `steps` is empty and the total is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRoute {
    /// Station the journey starts at.
    pub start_station_id: StationId,

    /// Station the journey ends at.
    pub end_station_id: StationId,

    /// Total journey cost in minutes, including route-change penalties.
    pub total_travel_time: u32,

    /// The hops of the journey, in order. Empty when no route exists.
    pub steps: Vec<Step>,
}

impl TravelRoute {
    /// The plan for a journey that starts where it ends: one zero-length
    /// step, zero total.
    pub fn zero_length(station: StationId) -> Self {
        Self {
            start_station_id: station.clone(),
            end_station_id: station.clone(),
            total_travel_time: 0,
            steps: vec![Step {
                start_station_id: station.clone(),
                end_station_id: station,
                line_id: None,
                route_id: None,
                travel_time: 0,
            }],
        }
    }

    /// The plan reporting that no route exists between the two stations.
    pub fn unreachable(start: StationId, end: StationId) -> Self {
        Self {
            start_station_id: start,
            end_station_id: end,
            total_travel_time: 0,
            steps: Vec::new(),
        }
    }

    /// True when the plan found no route (and the endpoints differ).
    pub fn is_unreachable(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station_id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    #[test]
    fn zero_length_plan() {
        let plan = TravelRoute::zero_length(station_id("station_a"));

        assert_eq!(plan.start_station_id, station_id("station_a"));
        assert_eq!(plan.end_station_id, station_id("station_a"));
        assert_eq!(plan.total_travel_time, 0);
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].travel_time, 0);
        assert_eq!(plan.steps[0].line_id, None);
        assert_eq!(plan.steps[0].route_id, None);
        assert!(!plan.is_unreachable());
    }

    #[test]
    fn unreachable_plan() {
        let plan = TravelRoute::unreachable(station_id("station_a"), station_id("station_b"));

        assert_eq!(plan.total_travel_time, 0);
        assert!(plan.steps.is_empty());
        assert!(plan.is_unreachable());
    }

    #[test]
    fn serialize_step_with_route() {
        let step = Step {
            start_station_id: station_id("station_a"),
            end_station_id: station_id("station_b"),
            line_id: Some(LineId::parse("line_1").unwrap()),
            route_id: Some(RouteId::parse("route_1").unwrap()),
            travel_time: 3,
        };

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["start_station_id"], "station_a");
        assert_eq!(json["end_station_id"], "station_b");
        assert_eq!(json["line_id"], "line_1");
        assert_eq!(json["route_id"], "route_1");
        assert_eq!(json["travel_time"], 3);
    }

    #[test]
    fn serialize_zero_length_step_has_null_route() {
        let plan = TravelRoute::zero_length(station_id("station_a"));
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["total_travel_time"], 0);
        assert_eq!(json["steps"][0]["line_id"], serde_json::Value::Null);
        assert_eq!(json["steps"][0]["route_id"], serde_json::Value::Null);
    }

    #[test]
    fn serde_roundtrip() {
        let plan = TravelRoute {
            start_station_id: station_id("station_a"),
            end_station_id: station_id("station_c"),
            total_travel_time: 5,
            steps: vec![
                Step {
                    start_station_id: station_id("station_a"),
                    end_station_id: station_id("station_b"),
                    line_id: Some(LineId::parse("line_1").unwrap()),
                    route_id: Some(RouteId::parse("route_1").unwrap()),
                    travel_time: 2,
                },
                Step {
                    start_station_id: station_id("station_b"),
                    end_station_id: station_id("station_c"),
                    line_id: Some(LineId::parse("line_1").unwrap()),
                    route_id: Some(RouteId::parse("route_1").unwrap()),
                    travel_time: 3,
                },
            ],
        };

        let json = serde_json::to_string(&plan).unwrap();
        let back: TravelRoute = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
