//! Arena representation of the network graph.
//!
//! Ownership in the graph is acyclic (network → line → route → stops/edges)
//! but references are cyclic (edge → station → edge), so everything lives in
//! flat arenas and cross-references are plain indices. This keeps the graph
//! free of reference-counted cycles and trivially cloneable.

use std::collections::HashMap;

use crate::domain::{LineId, RouteId, StationId};

macro_rules! impl_arena_idx {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub(crate) struct $name(pub(crate) u32);

        impl $name {
            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

impl_arena_idx!(StationIdx, "Index of a station node in the station arena.");
impl_arena_idx!(EdgeIdx, "Index of an edge in the edge arena.");
impl_arena_idx!(RouteIdx, "Index of a route record in the route arena.");
impl_arena_idx!(LineIdx, "Index of a line record in the line arena.");

/// A station node: the internal station representation.
#[derive(Debug, Clone)]
pub(crate) struct StationNode {
    pub(crate) id: StationId,
    pub(crate) name: String,
    pub(crate) passenger_count: i64,
    /// Outgoing edges, one per route departing from this station.
    pub(crate) edges: Vec<EdgeIdx>,
}

/// A directed hop to the next stop of one specific route.
///
/// Each route going through a station gets its own edge, even when several
/// routes connect the same pair of stations.
#[derive(Debug, Clone)]
pub(crate) struct RouteEdge {
    pub(crate) route: RouteIdx,
    pub(crate) next_stop: StationIdx,
    /// Travel time in minutes. Defaults to 0 until set from topology data.
    pub(crate) travel_time: u32,
}

/// Internal route representation.
#[derive(Debug, Clone)]
pub(crate) struct RouteRecord {
    pub(crate) id: RouteId,
    pub(crate) line: LineIdx,
    pub(crate) stops: Vec<StationIdx>,
}

/// Internal line representation; routes are mapped by id within their line.
#[derive(Debug, Clone)]
pub(crate) struct LineRecord {
    pub(crate) id: LineId,
    pub(crate) name: String,
    pub(crate) routes: HashMap<RouteId, RouteIdx>,
}
