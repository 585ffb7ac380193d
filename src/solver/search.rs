//! Depth-first search with MRV, LCV and forward checking.

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::store::{DomainStore, Interner};
use super::{SolveError, SolverConfig};
use crate::domain::Domains;
use crate::models::{Assignment, Session, Solution};

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Every session received a conflict-free assignment.
    Solved(Solution),
    /// The search space was exhausted: no conflict-free timetable exists
    /// for these domains.
    NoSolution,
    /// A node limit, time limit or cancellation stopped the search first.
    Interrupted,
}

/// Search effort counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Candidate trials (tentative assignments).
    pub nodes: u64,
    /// Tentative assignments undone.
    pub backtracks: u64,
    /// Trials rejected because forward checking emptied a domain.
    pub wipeouts: u64,
    /// Candidates removed by forward checking.
    pub values_pruned: u64,
    /// Deepest search level reached (number of assigned sessions).
    pub max_depth: usize,
    /// Wall-clock time (ms).
    pub solve_time_ms: u64,
}

impl SearchStats {
    #[cfg(feature = "parallel")]
    pub(crate) fn absorb(&mut self, other: &SearchStats) {
        self.nodes += other.nodes;
        self.backtracks += other.backtracks;
        self.wipeouts += other.wipeouts;
        self.values_pruned += other.values_pruned;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// Result of a solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    /// How the search ended.
    pub outcome: SolveOutcome,
    /// Effort spent.
    pub stats: SearchStats,
}

impl SolveResult {
    /// Whether a timetable was found.
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, SolveOutcome::Solved(_))
    }

    /// The timetable, if one was found.
    pub fn solution(&self) -> Option<&Solution> {
        match &self.outcome {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    /// Consumes the result, returning the timetable if one was found.
    pub fn into_solution(self) -> Option<Solution> {
        match self.outcome {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Backtracking CSP solver.
///
/// # Algorithm
/// 1. **MRV**: pick the unassigned session with the fewest live candidates;
///    ties go to the session given first.
/// 2. **LCV**: order its candidates by how many live candidates of other
///    unassigned sessions they would eliminate, fewest first; ties keep the
///    domain's natural order (stable sort).
/// 3. **Forward checking**: after each tentative choice, prune conflicting
///    candidates from every other unassigned session; an emptied domain
///    rejects the choice without recursing.
/// 4. Recurse; on failure undo the pruning from the trail and try the next
///    candidate.
///
/// With the default configuration the search is deterministic: identical
/// inputs in identical order give the same solution on every run.
///
/// # Example
///
/// ```
/// use u_timetable::domain::build_domains;
/// use u_timetable::models::{Instructor, Room, Session, TimeSlot};
/// use u_timetable::solver::BacktrackingSolver;
///
/// let sessions = vec![Session::lecture("S1", "CSC 111", "1")];
/// let instructors = vec![Instructor::professor("P1").with_course("CSC 111")];
/// let rooms = vec![Room::lecture("H1")];
/// let slots = vec![
///     TimeSlot::new("t1", "Sunday", "09:00"),
///     TimeSlot::new("t2", "Sunday", "10:00"),
/// ];
///
/// let build = build_domains(&sessions, &instructors, &rooms, &slots).unwrap();
/// let result = BacktrackingSolver::new()
///     .solve(&sessions, &build.domains)
///     .unwrap();
/// assert!(result.is_solved());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    config: SolverConfig,
}

impl BacktrackingSolver {
    /// Creates a solver with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Searches for a conflict-free timetable.
    ///
    /// Only sessions that received a domain may be passed in; domain entries
    /// for sessions not in `sessions` are ignored.
    ///
    /// # Errors
    /// [`SolveError::MissingDomain`] if a session has no domain entry and
    /// [`SolveError::DuplicateSession`] if a session id repeats. Both are
    /// checked before any search.
    pub fn solve<S: Borrow<Session>>(
        &self,
        sessions: &[S],
        domains: &Domains,
    ) -> Result<SolveResult, SolveError> {
        let start = Instant::now();
        let problem = Problem::compile(sessions, domains)?;

        info!(
            "solving {} sessions ({} candidates)",
            problem.given.len(),
            problem.given.iter().map(|d| d.len()).sum::<usize>()
        );

        let limits = Limits::new(&self.config, start);
        let search = Search::new(&problem, problem.store.clone(), limits);

        let (step, assigned, mut stats) = if self.config.num_workers > 1 {
            run_parallel(search, self.config.num_workers)
        } else {
            run_sequential(search)
        };

        stats.solve_time_ms = start.elapsed().as_millis() as u64;
        let outcome = match step {
            Step::Found => SolveOutcome::Solved(problem.solution(&assigned)),
            Step::Exhausted => SolveOutcome::NoSolution,
            Step::Interrupted => SolveOutcome::Interrupted,
        };

        info!(
            "search finished: {} after {} nodes, {} backtracks in {} ms",
            match &outcome {
                SolveOutcome::Solved(_) => "solved",
                SolveOutcome::NoSolution => "no solution",
                SolveOutcome::Interrupted => "interrupted",
            },
            stats.nodes,
            stats.backtracks,
            stats.solve_time_ms
        );

        Ok(SolveResult { outcome, stats })
    }
}

/// Solves with the default configuration.
///
/// See [`BacktrackingSolver::solve`].
pub fn solve<S: Borrow<Session>>(
    sessions: &[S],
    domains: &Domains,
) -> Result<SolveResult, SolveError> {
    BacktrackingSolver::new().solve(sessions, domains)
}

/// Sessions compiled against their domains.
pub(crate) struct Problem<'a> {
    /// Candidates per variable as given, for building the solution.
    given: Vec<&'a [Assignment]>,
    /// Compiled store at the root.
    store: DomainStore,
}

impl<'a> Problem<'a> {
    fn compile<S: Borrow<Session>>(
        sessions: &[S],
        domains: &'a Domains,
    ) -> Result<Self, SolveError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(sessions.len());
        let mut given = Vec::with_capacity(sessions.len());

        for session in sessions {
            let session = session.borrow();
            if !seen.insert(session.id.as_str()) {
                return Err(SolveError::DuplicateSession(session.id.clone()));
            }
            let domain = domains
                .get(&session.id)
                .ok_or_else(|| SolveError::MissingDomain(session.id.clone()))?;
            given.push(domain);
        }

        let ignored = domains.iter().filter(|(id, _)| !seen.contains(id)).count();
        if ignored > 0 {
            debug!("ignoring {ignored} domain entries without a matching session");
        }

        let mut interner = Interner::default();
        let values = given
            .iter()
            .map(|domain| domain.iter().map(|a| interner.candidate(a)).collect())
            .collect();

        Ok(Self {
            given,
            store: DomainStore::new(values),
        })
    }

    fn solution(&self, assigned: &[Option<usize>]) -> Solution {
        let assignments = self
            .given
            .iter()
            .zip(assigned)
            .filter_map(|(domain, value)| value.map(|v| domain[v].clone()))
            .collect();
        Solution::from_assignments(assignments)
    }
}

/// Stop conditions shared by every branch of one run.
#[derive(Debug, Clone)]
pub(crate) struct Limits {
    node_limit: Option<u64>,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
    /// Raised by a parallel worker that found a solution.
    sibling_found: Option<Arc<AtomicBool>>,
}

impl Limits {
    fn new(config: &SolverConfig, start: Instant) -> Self {
        Self {
            node_limit: config.node_limit,
            deadline: config
                .time_limit_ms
                .map(|ms| start + Duration::from_millis(ms)),
            cancel: config.cancel.clone(),
            sibling_found: None,
        }
    }

    fn reached(&self, nodes: u64) -> bool {
        if self.node_limit.is_some_and(|limit| nodes >= limit) {
            return true;
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return true;
        }
        let raised = |flag: &Option<Arc<AtomicBool>>| {
            flag.as_ref().is_some_and(|f| f.load(Ordering::Relaxed))
        };
        raised(&self.cancel) || raised(&self.sibling_found)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Found,
    Exhausted,
    Interrupted,
}

/// Mutable search state: the store, the partial assignment and counters.
#[derive(Debug, Clone)]
pub(crate) struct Search {
    store: DomainStore,
    assigned: Vec<Option<usize>>,
    assigned_count: usize,
    limits: Limits,
    stats: SearchStats,
}

impl Search {
    fn new(problem: &Problem<'_>, store: DomainStore, limits: Limits) -> Self {
        let n = problem.given.len();
        Self {
            store,
            assigned: vec![None; n],
            assigned_count: 0,
            limits,
            stats: SearchStats::default(),
        }
    }

    fn is_complete(&self) -> bool {
        self.assigned_count == self.store.num_vars()
    }

    /// MRV: the unassigned variable with the fewest live values.
    ///
    /// Strict comparison keeps the first variable among equals.
    pub(crate) fn select_variable(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for var in 0..self.store.num_vars() {
            if self.assigned[var].is_some() {
                continue;
            }
            let count = self.store.live_count(var);
            if best.map_or(true, |(_, best_count)| count < best_count) {
                best = Some((var, count));
            }
        }
        best.map(|(var, _)| var)
    }

    /// Number of live values of other unassigned variables that `value`
    /// would eliminate.
    pub(crate) fn elimination_score(&self, var: usize, value: usize) -> usize {
        let chosen = self.store.candidate(var, value);
        (0..self.store.num_vars())
            .filter(|&other| other != var && self.assigned[other].is_none())
            .map(|other| {
                self.store
                    .live_values(other)
                    .filter(|&v| chosen.conflicts_with(self.store.candidate(other, v)))
                    .count()
            })
            .sum()
    }

    /// LCV: live values of `var`, least constraining first.
    ///
    /// The sort is stable, so equal scores keep the domain's natural order.
    pub(crate) fn order_values(&self, var: usize) -> Vec<usize> {
        let mut scored: Vec<(usize, usize)> = self
            .store
            .live_values(var)
            .map(|value| (self.elimination_score(var, value), value))
            .collect();
        scored.sort_by_key(|&(score, _)| score);
        scored.into_iter().map(|(_, value)| value).collect()
    }

    /// Prunes values conflicting with `var = value` from every other
    /// unassigned variable. Returns `false` on a domain wipe-out.
    fn forward_check(&mut self, var: usize, value: usize) -> bool {
        let chosen = *self.store.candidate(var, value);
        for other in 0..self.store.num_vars() {
            if other == var || self.assigned[other].is_some() {
                continue;
            }
            let doomed: Vec<usize> = self
                .store
                .live_values(other)
                .filter(|&v| chosen.conflicts_with(self.store.candidate(other, v)))
                .collect();
            for v in doomed {
                self.store.remove(other, v);
            }
            if self.store.live_count(other) == 0 {
                return false;
            }
        }
        true
    }

    fn assign(&mut self, var: usize, value: usize) {
        self.assigned[var] = Some(value);
        self.assigned_count += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.assigned_count);
    }

    fn unassign(&mut self, var: usize) {
        self.assigned[var] = None;
        self.assigned_count -= 1;
    }

    /// Explores the subtree below the current partial assignment.
    fn search(&mut self) -> Step {
        if self.is_complete() {
            return Step::Found;
        }
        let Some(var) = self.select_variable() else {
            return Step::Found;
        };

        for value in self.order_values(var) {
            match self.try_value(var, value) {
                Step::Exhausted => continue,
                step => return step,
            }
        }
        Step::Exhausted
    }

    /// Tentatively sets `var = value` and searches below it.
    ///
    /// On `Exhausted` every change is undone; on `Found` the assignment is
    /// left in place.
    fn try_value(&mut self, var: usize, value: usize) -> Step {
        if self.limits.reached(self.stats.nodes) {
            return Step::Interrupted;
        }
        self.stats.nodes += 1;

        let checkpoint = self.store.checkpoint();
        self.store.new_checkpoint();
        self.assign(var, value);

        let consistent = self.forward_check(var, value);
        self.stats.values_pruned += self.store.removed_at_current_checkpoint() as u64;

        if consistent {
            match self.search() {
                Step::Exhausted => {}
                step => return step,
            }
        } else {
            self.stats.wipeouts += 1;
        }

        trace!("backtrack: variable {var} value {value} at depth {}", self.assigned_count);
        self.unassign(var);
        self.store.backtrack_to(checkpoint);
        self.stats.backtracks += 1;
        Step::Exhausted
    }
}

fn run_sequential(mut search: Search) -> (Step, Vec<Option<usize>>, SearchStats) {
    let step = search.search();
    (step, search.assigned, search.stats)
}

#[cfg(not(feature = "parallel"))]
fn run_parallel(search: Search, workers: usize) -> (Step, Vec<Option<usize>>, SearchStats) {
    debug!("{workers} workers requested without the `parallel` feature; searching sequentially");
    run_sequential(search)
}

#[cfg(feature = "parallel")]
fn run_parallel(search: Search, workers: usize) -> (Step, Vec<Option<usize>>, SearchStats) {
    super::parallel::run(search, workers)
}

#[cfg(feature = "parallel")]
impl Search {
    /// Root variable and its LCV-ordered values, or `None` when nothing is
    /// left to assign.
    pub(crate) fn root_branches(&self) -> Option<(usize, Vec<usize>)> {
        if self.is_complete() {
            return None;
        }
        let var = self.select_variable()?;
        Some((var, self.order_values(var)))
    }

    /// Clone for one worker, stopping when `found` is raised.
    pub(crate) fn fork(&self, found: &Arc<AtomicBool>) -> Self {
        let mut worker = self.clone();
        worker.limits.sibling_found = Some(Arc::clone(found));
        worker.stats = SearchStats::default();
        worker
    }

    pub(crate) fn explore(&mut self, var: usize, value: usize) -> Step {
        self.try_value(var, value)
    }

    pub(crate) fn search_from_root(&mut self) -> Step {
        self.search()
    }

    pub(crate) fn into_parts(self) -> (Vec<Option<usize>>, SearchStats) {
        (self.assigned, self.stats)
    }
}
