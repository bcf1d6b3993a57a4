//! Metro network routing engine.
//!
//! Models a metro system of stations, lines, and directional routes, tracks
//! live per-station passenger counts, and answers fastest-route and
//! quiet-route queries between any two stations.

pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
