//! Route planning over the transport network.
//!
//! The planner answers two queries: the *fastest* route between two
//! stations, and a *quiet* route that accepts a bounded slowdown in
//! exchange for less crowding. Both run on the network's multigraph, where
//! the search state is a (station, arriving route) pair: changing routes
//! costs a fixed penalty, so how you arrived matters.

mod config;
mod dijkstra;
mod quiet;

pub use config::QuietConfig;
pub use dijkstra::{ROUTE_CHANGE_PENALTY, RoutePlanner};
