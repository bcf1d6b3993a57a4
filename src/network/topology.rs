//! Topology document loading.
//!
//! The network is populated from a JSON document listing stations, lines
//! with their routes, and travel times. Stations and lines are structural:
//! any failure there aborts the load. The `travel_times` section is not:
//! a missing section or inapplicable entries leave the affected edges at the
//! default time of 0, and the load reports the gap so the caller can decide
//! whether to serve queries anyway.

use serde::Deserialize;
use tracing::warn;

use super::TransportNetwork;
use crate::domain::{Line, LineId, NetworkError, Route, RouteId, Station, StationId};

/// Error from loading a topology document.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// The document is not valid JSON for the topology schema
    #[error("malformed topology document: {0}")]
    Json(#[from] serde_json::Error),

    /// A station could not be added to the network
    #[error("could not add station: {0}")]
    Station(#[source] NetworkError),

    /// A line could not be added to the network
    #[error("could not add line: {0}")]
    Line(#[source] NetworkError),
}

/// Top-level topology document.
#[derive(Debug, Deserialize)]
pub struct TopologyDoc {
    pub stations: Vec<StationDef>,
    pub lines: Vec<LineDef>,
    /// Optional trailing section; its absence is a soft failure.
    #[serde(default)]
    pub travel_times: Option<Vec<TravelTimeDef>>,
}

/// A station entry in the topology document.
#[derive(Debug, Deserialize)]
pub struct StationDef {
    pub station_id: StationId,
    pub name: String,
}

/// A line entry in the topology document.
#[derive(Debug, Deserialize)]
pub struct LineDef {
    pub line_id: LineId,
    pub name: String,
    pub routes: Vec<RouteDef>,
}

/// A route entry nested in a line.
#[derive(Debug, Deserialize)]
pub struct RouteDef {
    pub route_id: RouteId,
    pub direction: String,
    pub line_id: LineId,
    pub start_station_id: StationId,
    pub end_station_id: StationId,
    pub route_stops: Vec<StationId>,
}

/// A travel time entry in the topology document.
#[derive(Debug, Deserialize)]
pub struct TravelTimeDef {
    pub start_station_id: StationId,
    pub end_station_id: StationId,
    pub travel_time: u32,
}

/// A loaded network plus the travel-time completeness signal.
#[derive(Debug)]
pub struct TopologyLoad {
    /// The fully built network.
    pub network: TransportNetwork,

    /// False when the `travel_times` section was missing or some of its
    /// entries could not be applied. Structure is intact either way.
    pub travel_times_complete: bool,
}

/// Load a network from a topology JSON string.
///
/// # Errors
///
/// Returns `TopologyError` on malformed JSON or a structural failure while
/// installing stations and lines. Travel-time problems are not errors; they
/// are reported through [`TopologyLoad::travel_times_complete`].
pub fn load_str(src: &str) -> Result<TopologyLoad, TopologyError> {
    load_doc(serde_json::from_str(src)?)
}

/// Load a network from an already-parsed topology document.
pub fn load_doc(doc: TopologyDoc) -> Result<TopologyLoad, TopologyError> {
    let mut network = TransportNetwork::new();

    for def in doc.stations {
        network
            .add_station(Station::new(def.station_id, def.name))
            .map_err(TopologyError::Station)?;
    }

    for def in doc.lines {
        let routes = def
            .routes
            .into_iter()
            .map(|r| Route {
                id: r.route_id,
                direction: r.direction,
                line_id: r.line_id,
                start_station_id: r.start_station_id,
                end_station_id: r.end_station_id,
                stops: r.route_stops,
            })
            .collect();
        network
            .add_line(Line::new(def.line_id, def.name, routes))
            .map_err(TopologyError::Line)?;
    }

    let mut travel_times_complete = true;
    match doc.travel_times {
        None => {
            warn!("topology document has no travel_times section; edge times default to 0");
            travel_times_complete = false;
        }
        Some(times) => {
            for def in times {
                if let Err(e) = network.set_travel_time(
                    &def.start_station_id,
                    &def.end_station_id,
                    def.travel_time,
                ) {
                    warn!(error = %e, "skipping inapplicable travel time entry");
                    travel_times_complete = false;
                }
            }
        }
    }

    Ok(TopologyLoad {
        network,
        travel_times_complete,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::testutil::{lid, rid, sid};

    fn topology_json() -> String {
        r#"{
            "stations": [
                {"station_id": "station_a", "name": "Acton Town"},
                {"station_id": "station_b", "name": "Barons Court"},
                {"station_id": "station_c", "name": "Covent Garden"}
            ],
            "lines": [
                {
                    "line_id": "line_1",
                    "name": "Piccadilly",
                    "routes": [
                        {
                            "route_id": "route_1",
                            "direction": "inbound",
                            "line_id": "line_1",
                            "start_station_id": "station_a",
                            "end_station_id": "station_c",
                            "route_stops": ["station_a", "station_b", "station_c"]
                        }
                    ]
                }
            ],
            "travel_times": [
                {"start_station_id": "station_a", "end_station_id": "station_b", "travel_time": 2},
                {"start_station_id": "station_b", "end_station_id": "station_c", "travel_time": 3}
            ]
        }"#
        .to_string()
    }

    #[test]
    fn load_full_document() {
        let load = load_str(&topology_json()).unwrap();

        assert!(load.travel_times_complete);
        assert_eq!(load.network.station_count(), 3);
        assert_eq!(load.network.line_count(), 1);
        assert_eq!(load.network.line_name(&lid("line_1")), Some("Piccadilly"));
        assert_eq!(
            load.network.travel_time_between(&sid("station_a"), &sid("station_b")),
            2,
        );
        assert_eq!(
            load.network.route_travel_time(
                &lid("line_1"),
                &rid("route_1"),
                &sid("station_a"),
                &sid("station_c"),
            ),
            5,
        );
    }

    #[test]
    fn missing_travel_times_is_soft() {
        let json = r#"{
            "stations": [
                {"station_id": "station_a", "name": "Acton Town"},
                {"station_id": "station_b", "name": "Barons Court"}
            ],
            "lines": [
                {
                    "line_id": "line_1",
                    "name": "Piccadilly",
                    "routes": [
                        {
                            "route_id": "route_1",
                            "direction": "inbound",
                            "line_id": "line_1",
                            "start_station_id": "station_a",
                            "end_station_id": "station_b",
                            "route_stops": ["station_a", "station_b"]
                        }
                    ]
                }
            ]
        }"#;

        let load = load_str(json).unwrap();

        // Structure loads fine; travel times default to 0 and the gap is
        // reported.
        assert!(!load.travel_times_complete);
        assert_eq!(load.network.station_count(), 2);
        assert_eq!(
            load.network.travel_time_between(&sid("station_a"), &sid("station_b")),
            0,
        );
    }

    #[test]
    fn inapplicable_travel_time_is_soft() {
        let json = topology_json().replace(
            r#""start_station_id": "station_b", "end_station_id": "station_c""#,
            r#""start_station_id": "station_a", "end_station_id": "station_c""#,
        );

        let load = load_str(&json).unwrap();

        // The non-adjacent entry is skipped, the applicable one sticks.
        assert!(!load.travel_times_complete);
        assert_eq!(
            load.network.travel_time_between(&sid("station_a"), &sid("station_b")),
            2,
        );
        assert_eq!(
            load.network.travel_time_between(&sid("station_b"), &sid("station_c")),
            0,
        );
    }

    #[test]
    fn malformed_json_is_fatal() {
        let err = load_str("{\"stations\": 12}").unwrap_err();
        assert!(matches!(err, TopologyError::Json(_)));
    }

    #[test]
    fn unknown_stop_is_fatal() {
        let json = topology_json().replace("\"station_b\", \"station_c\"]", "\"station_x\"]");
        let err = load_str(&json).unwrap_err();
        assert!(matches!(err, TopologyError::Line(_)));
    }

    #[test]
    fn duplicate_station_is_fatal() {
        let json = topology_json().replace(
            r#"{"station_id": "station_b", "name": "Barons Court"}"#,
            r#"{"station_id": "station_a", "name": "Barons Court"}"#,
        );
        let err = load_str(&json).unwrap_err();
        assert!(matches!(err, TopologyError::Station(_)));
    }
}
