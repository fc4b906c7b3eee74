//! Exhaustive search over the river-crossing state graph.
//!
//! Two strategies share the same model, registry and event stream:
//!
//! - BFS marks candidates visited as soon as they are generated, so the
//!   queue never holds a state twice. The first goal dequeued is a
//!   minimum-crossing solution.
//! - DFS marks a state visited when recursion enters it and returns the
//!   first solution along the fixed move order. That solution is not
//!   necessarily minimal.

use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::SolveError;
use crate::events::{NodeKind, NullObserver, SearchEvent, SearchObserver};
use crate::pruning::{candidate_moves, is_unsafe};
use crate::puzzle::{Move, PuzzleConfig, State};
use crate::registry::{NodeHandle, SearchIndex};
use crate::trace::{reconstruct_path, SolutionStep};

/// Traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Bfs,
    Dfs,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters collected during a search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// States that entered the visited registry
    pub states_discovered: usize,
    /// States whose successors were generated
    pub states_expanded: usize,
    /// Unsafe states cut off without expansion
    pub states_pruned: usize,
    /// Safe states that produced no new successor
    pub dead_ends: usize,
    /// Deepest depth at which a state was discovered
    pub max_depth: usize,
    pub time_elapsed_ms: u64,
}

/// Outcome of a search
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub strategy: Strategy,
    /// Whether the goal state was reached
    pub solved: bool,
    /// The goal state, if reached
    pub goal: Option<State>,
    /// Visited registry and backtracking index built by this search
    pub index: SearchIndex,
    pub stats: SearchStats,
    /// The puzzle that was searched
    pub puzzle: PuzzleConfig,
}

impl SolverResult {
    /// Ordered crossings from start to goal.
    ///
    /// Fails with [`SolveError::NoSolution`] if the search did not succeed.
    pub fn solution(&self) -> Result<Vec<SolutionStep>, SolveError> {
        let goal = self.goal.ok_or(SolveError::NoSolution)?;
        reconstruct_path(&self.puzzle, &self.index.backtrack, goal)
    }

    /// Number of crossings in the solution, if one was found
    pub fn crossings(&self) -> Option<usize> {
        self.goal
            .and_then(|goal| self.index.backtrack.depth_of(&goal))
    }
}

/// Run a search without observing it
pub fn solve_silent(puzzle: &PuzzleConfig, strategy: Strategy) -> SolverResult {
    solve(puzzle, strategy, &mut NullObserver)
}

/// Search the puzzle's state graph with the given strategy.
///
/// Every call builds a fresh registry and index. The observer receives one
/// `Discovered` event per state, one `Edge` event per tree edge and a
/// `Classified` event for every state the search processes.
pub fn solve(
    puzzle: &PuzzleConfig,
    strategy: Strategy,
    observer: &mut dyn SearchObserver,
) -> SolverResult {
    let start_time = Instant::now();
    debug!(
        %strategy,
        start = %puzzle.start_state(),
        goal = %puzzle.goal_state(),
        moves = puzzle.moves.len(),
        "starting search"
    );

    let mut search = Search {
        puzzle,
        index: SearchIndex::new(),
        stats: SearchStats::default(),
        observer,
    };

    let goal = match strategy {
        Strategy::Bfs => search.bfs(),
        Strategy::Dfs => {
            let start = puzzle.start_state();
            if search.dfs(start, None, 0) {
                Some(puzzle.goal_state())
            } else {
                None
            }
        }
    };

    let mut stats = search.stats;
    stats.time_elapsed_ms = start_time.elapsed().as_millis() as u64;

    let result = SolverResult {
        strategy,
        solved: goal.is_some(),
        goal,
        index: search.index,
        stats,
        puzzle: puzzle.clone(),
    };

    debug!(
        %strategy,
        solved = result.solved,
        crossings = ?result.crossings(),
        discovered = result.stats.states_discovered,
        expanded = result.stats.states_expanded,
        pruned = result.stats.states_pruned,
        "search finished"
    );
    result
}

/// State of one in-progress search
struct Search<'a> {
    puzzle: &'a PuzzleConfig,
    index: SearchIndex,
    stats: SearchStats,
    observer: &'a mut dyn SearchObserver,
}

impl<'a> Search<'a> {
    /// Mark a state visited, record how it was reached and announce it
    fn discover(&mut self, state: State, via: Option<(State, Move)>, depth: usize) -> NodeHandle {
        debug_assert!(
            self.puzzle.contains(&state),
            "out-of-range state {} reached the registry",
            state
        );

        let newly_visited = self.index.visited.mark_visited(state);
        debug_assert!(newly_visited, "state {} discovered twice", state);

        let handle = self.index.backtrack.record_edge(state, via, depth);
        self.stats.states_discovered += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        self.observer.on_event(&SearchEvent::Discovered {
            state,
            parent: via.map(|(parent, _)| parent),
            handle,
            depth,
        });
        if let Some((parent, mv)) = via {
            self.observer.on_event(&SearchEvent::Edge {
                from: parent,
                to: state,
                mv,
                handle,
            });
        }
        handle
    }

    fn classify(&mut self, state: State, kind: NodeKind) {
        let Some(handle) = self.index.backtrack.handle_of(&state) else {
            debug_assert!(false, "classifying undiscovered state {}", state);
            return;
        };
        match kind {
            NodeKind::Unsafe => self.stats.states_pruned += 1,
            NodeKind::DeadEnd => self.stats.dead_ends += 1,
            _ => {}
        }
        self.observer.on_event(&SearchEvent::Classified {
            state,
            handle,
            kind,
        });
    }

    /// Kind of a safe, expanded, non-goal state
    fn expanded_kind(&self, state: &State, produced_children: bool) -> NodeKind {
        if self.puzzle.is_start(state) {
            NodeKind::Start
        } else if produced_children {
            NodeKind::Internal
        } else {
            NodeKind::DeadEnd
        }
    }

    /// Level-order traversal. Returns the goal state if it was dequeued.
    fn bfs(&mut self) -> Option<State> {
        let puzzle = self.puzzle;
        let start = puzzle.start_state();

        let mut queue: VecDeque<(State, usize)> = VecDeque::new();
        self.discover(start, None, 0);
        queue.push_back((start, 0));

        while let Some((state, depth)) = queue.pop_front() {
            if puzzle.is_goal(&state) {
                self.classify(state, NodeKind::Goal);
                return Some(state);
            }

            if is_unsafe(puzzle, &state) {
                trace!(%state, depth, "pruned unsafe state");
                self.classify(state, NodeKind::Unsafe);
                continue;
            }

            self.stats.states_expanded += 1;
            let mut produced_children = false;

            for (mv, next) in candidate_moves(puzzle, &state) {
                if self.index.visited.has(&next) {
                    continue;
                }
                self.discover(next, Some((state, mv)), depth + 1);
                queue.push_back((next, depth + 1));
                produced_children = true;
            }

            trace!(%state, depth, produced_children, queued = queue.len(), "expanded state");
            let kind = self.expanded_kind(&state, produced_children);
            self.classify(state, kind);
        }

        None
    }

    /// Pre-order traversal. Returns `true` once the goal is entered.
    fn dfs(&mut self, state: State, via: Option<(State, Move)>, depth: usize) -> bool {
        let puzzle = self.puzzle;
        self.discover(state, via, depth);

        if puzzle.is_goal(&state) {
            self.classify(state, NodeKind::Goal);
            return true;
        }

        if is_unsafe(puzzle, &state) {
            trace!(%state, depth, "pruned unsafe state");
            self.classify(state, NodeKind::Unsafe);
            return false;
        }

        self.stats.states_expanded += 1;
        let mut produced_children = false;

        for (mv, next) in candidate_moves(puzzle, &state) {
            // A sibling's subtree may have reached this candidate already
            if self.index.visited.has(&next) {
                continue;
            }
            produced_children = true;

            if self.dfs(next, Some((state, mv)), depth + 1) {
                let kind = self.expanded_kind(&state, true);
                self.classify(state, kind);
                return true;
            }
        }

        trace!(%state, depth, produced_children, "backtracking");
        let kind = self.expanded_kind(&state, produced_children);
        self.classify(state, kind);
        false
    }
}
