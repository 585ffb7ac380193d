//! Parallel exploration of root branches.
//!
//! The root variable's LCV-ordered values are split across a dedicated
//! rayon pool. Every worker owns a clone of the search state, so pruning in
//! one branch is never visible to another. The first worker to complete a
//! timetable raises a shared flag and the others stop at their next trial.
//!
//! Once every worker has returned, the solution of the earliest root value
//! (in LCV order) that completed one is kept. Which workers complete before
//! the flag stops them depends on thread scheduling, so the returned
//! timetable can differ between runs.

use log::{debug, warn};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::search::{Search, SearchStats, Step};

pub(crate) fn run(search: Search, workers: usize) -> (Step, Vec<Option<usize>>, SearchStats) {
    let Some((var, values)) = search.root_branches() else {
        let (assigned, stats) = search.into_parts();
        return (Step::Found, assigned, stats);
    };

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool,
        Err(e) => {
            warn!("could not start {workers} search workers ({e}); searching sequentially");
            let mut search = search;
            let step = search.search_from_root();
            let (assigned, stats) = search.into_parts();
            return (step, assigned, stats);
        }
    };

    debug!(
        "exploring {} root branches of variable {var} on {workers} workers",
        values.len()
    );

    let found = Arc::new(AtomicBool::new(false));
    let outcomes: Vec<(Step, Vec<Option<usize>>, SearchStats)> = pool.install(|| {
        values
            .par_iter()
            .map(|&value| {
                let mut worker = search.fork(&found);
                let step = worker.explore(var, value);
                if step == Step::Found {
                    found.store(true, Ordering::Relaxed);
                }
                let (assigned, stats) = worker.into_parts();
                (step, assigned, stats)
            })
            .collect()
    });

    let mut stats = SearchStats::default();
    for (_, _, s) in &outcomes {
        stats.absorb(s);
    }

    let mut interrupted = false;
    for (step, assigned, _) in outcomes {
        match step {
            Step::Found => return (Step::Found, assigned, stats),
            Step::Interrupted => interrupted = true,
            Step::Exhausted => {}
        }
    }

    // Without a winner, interruptions can only come from the caller's limits
    let step = if interrupted {
        Step::Interrupted
    } else {
        Step::Exhausted
    };
    let (assigned, _) = search.into_parts();
    (step, assigned, stats)
}
