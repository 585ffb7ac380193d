//! Solver configuration.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Configuration for the backtracking solver.
///
/// The default runs an unbounded, single-threaded, deterministic search.
///
/// # Examples
///
/// ```
/// use u_timetable::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_node_limit(100_000)
///     .with_time_limit_ms(5_000);
/// assert_eq!(config.node_limit, Some(100_000));
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum number of candidate trials. `None` = no limit.
    ///
    /// With parallel workers the limit applies to each worker.
    pub node_limit: Option<u64>,

    /// Maximum wall-clock search time in milliseconds. `None` = no limit.
    pub time_limit_ms: Option<u64>,

    /// Number of workers exploring root branches concurrently.
    ///
    /// Values above 1 only take effect with the `parallel` feature; the
    /// returned solution is then no longer deterministic.
    pub num_workers: usize,

    /// External cancellation flag, polled once per candidate trial.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            node_limit: None,
            time_limit_ms: None,
            num_workers: 1,
            cancel: None,
        }
    }
}

impl SolverConfig {
    /// Sets the maximum number of candidate trials.
    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Sets the number of workers (at least 1).
    pub fn with_num_workers(mut self, n: usize) -> Self {
        self.num_workers = n.max(1);
        self
    }

    /// Sets the external cancellation flag.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Whether the search may stop before exhausting the space.
    pub fn is_bounded(&self) -> bool {
        self.node_limit.is_some() || self.time_limit_ms.is_some() || self.cancel.is_some()
    }
}
