//! Quiet-route search.
//!
//! A quiet route trades travel time for crowding: among the paths within a
//! bounded slowdown of the fastest route, pick the least crowded one, but
//! only adopt it if it beats the fastest path's crowding by a minimum
//! margin. Crowding is the sum of non-negative passenger counts over a
//! path's interior stations; the origin and destination don't count (the
//! passenger is there either way).

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::domain::{StationId, TravelRoute};

use super::dijkstra::{Path, PathStop, RoutePlanner, total_cost};

impl RoutePlanner<'_> {
    /// A quiet travel route from `from` to `to`.
    ///
    /// - `max_slowdown_pc` (0..=1): how much slower than the fastest route
    ///   a quieter path may be, as a fraction.
    /// - `min_quietness_pc` (0..=1): the crowding reduction required to
    ///   adopt a slower path, as a fraction.
    /// - `max_n_paths`: cap on explored near-optimal paths; the search is
    ///   best-effort within this bound.
    ///
    /// Degenerate queries (same station, unreachable, unknown station)
    /// return exactly what [`RoutePlanner::fastest`] returns. When no
    /// explored path clears the quietness bar, the fastest route stands.
    pub fn quiet(
        &self,
        from: &StationId,
        to: &StationId,
        max_slowdown_pc: f64,
        min_quietness_pc: f64,
        max_n_paths: usize,
    ) -> TravelRoute {
        let network = self.network();
        let (Some(a), Some(b)) = (network.station_idx(from), network.station_idx(to)) else {
            return TravelRoute::unreachable(from.clone(), to.clone());
        };

        if a == b {
            return TravelRoute::zero_length(from.clone());
        }

        let Some(fastest) = self.shortest_path(a, b, &HashSet::new()) else {
            return TravelRoute::unreachable(from.clone(), to.clone());
        };

        // A zero slowdown budget admits no detour at all: the fastest route
        // stands, whatever the crowds.
        if max_slowdown_pc <= 0.0 {
            return self.materialize(&fastest);
        }

        let paths = self.near_optimal_paths(fastest, max_slowdown_pc, max_n_paths);

        let fastest_crowding = self.path_crowding(&paths[0]);
        let threshold = fastest_crowding as f64 * (1.0 - min_quietness_pc);

        debug!(
            %from,
            %to,
            candidates = paths.len(),
            fastest_crowding,
            "quiet route query",
        );

        // Least crowded qualifying path; ties go to the faster path, and
        // the fastest path itself is first so a full tie keeps it.
        let quietest = paths
            .iter()
            .map(|path| (path, self.path_crowding(path)))
            .filter(|&(_, crowding)| crowding as f64 <= threshold)
            .min_by_key(|&(path, crowding)| (crowding, total_cost(path)));

        match quietest {
            Some((path, _)) => self.materialize(path),
            None => self.materialize(&paths[0]),
        }
    }

    /// Collect up to `max_n_paths` distinct paths whose cost is within
    /// `(1 + max_slowdown_pc)` of the fastest path's.
    ///
    /// Exploration excludes interior path stops of already-found paths, one
    /// more per attempt, re-running the fastest-path search each time. The
    /// fastest path itself is always first in the result.
    fn near_optimal_paths(
        &self,
        fastest: Path,
        max_slowdown_pc: f64,
        max_n_paths: usize,
    ) -> Vec<Path> {
        let origin = fastest[0].0.station;
        let target = fastest.last().expect("paths are never empty").0.station;
        let budget = total_cost(&fastest) as f64 * (1.0 + max_slowdown_pc);

        let mut pending: VecDeque<HashSet<PathStop>> = VecDeque::new();
        let mut attempted: HashSet<Vec<PathStop>> = HashSet::new();
        let mut seen: HashSet<Vec<PathStop>> = HashSet::new();
        seen.insert(stop_sequence(&fastest));
        queue_wider_exclusions(&fastest, &HashSet::new(), &mut pending, &mut attempted);

        let mut paths = vec![fastest];
        while paths.len() < max_n_paths {
            let Some(excluded) = pending.pop_front() else {
                break;
            };
            let Some(path) = self.shortest_path(origin, target, &excluded) else {
                continue;
            };
            if total_cost(&path) as f64 > budget {
                continue;
            }
            if !seen.insert(stop_sequence(&path)) {
                continue;
            }

            queue_wider_exclusions(&path, &excluded, &mut pending, &mut attempted);
            paths.push(path);
        }
        paths
    }

    /// Total crowding over a path's interior stations. Negative counts
    /// contribute nothing.
    fn path_crowding(&self, path: &Path) -> u64 {
        let interior = &path[1..path.len() - 1];
        interior
            .iter()
            .map(|&(stop, _)| self.network().node(stop.station).passenger_count.max(0) as u64)
            .sum()
    }
}

/// For each interior stop of `path`, queue `excluded` widened by that stop,
/// skipping exclusion sets that were already queued.
fn queue_wider_exclusions(
    path: &Path,
    excluded: &HashSet<PathStop>,
    pending: &mut VecDeque<HashSet<PathStop>>,
    attempted: &mut HashSet<Vec<PathStop>>,
) {
    for &(stop, _) in &path[1..path.len() - 1] {
        let mut wider = excluded.clone();
        wider.insert(stop);

        let mut key: Vec<PathStop> = wider.iter().copied().collect();
        key.sort();
        if attempted.insert(key) {
            pending.push_back(wider);
        }
    }
}

/// The path's stop sequence, used to deduplicate found paths.
fn stop_sequence(path: &Path) -> Vec<PathStop> {
    path.iter().map(|&(stop, _)| stop).collect()
}
