//! Default parameters for quiet-route queries.

/// Defaults applied to quiet-route queries that don't specify their own
/// parameters.
#[derive(Debug, Clone)]
pub struct QuietConfig {
    /// Maximum fractional travel-time increase a quieter path may cost
    /// (0.5 = up to 50% slower than the fastest route).
    pub max_slowdown_pc: f64,

    /// Minimum fractional crowding decrease required to adopt a slower
    /// path (0.1 = at least 10% less crowded).
    pub min_quietness_pc: f64,

    /// Maximum number of near-optimal paths to explore per query.
    pub max_n_paths: usize,
}

impl QuietConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_slowdown_pc: f64, min_quietness_pc: f64, max_n_paths: usize) -> Self {
        Self {
            max_slowdown_pc,
            min_quietness_pc,
            max_n_paths,
        }
    }
}

impl Default for QuietConfig {
    fn default() -> Self {
        Self {
            max_slowdown_pc: 0.5,
            min_quietness_pc: 0.1,
            max_n_paths: 100,
        }
    }
}
