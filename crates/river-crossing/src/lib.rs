//! River-crossing puzzle solver.
//!
//! This crate exhaustively searches the state graph of a generalized
//! missionaries-and-cannibals puzzle with breadth-first or depth-first
//! search. Each search returns its own visited registry and backtracking
//! index, from which the solution path is reconstructed. Renderers follow
//! the search through a stream of events.

pub mod display;
pub mod error;
pub mod events;
pub mod executor;
pub mod pruning;
pub mod puzzle;
pub mod registry;
pub mod render;
pub mod solver;
pub mod trace;

// Re-export main types
pub use error::SolveError;
pub use events::{EventLog, NodeKind, NullObserver, SearchEvent, SearchObserver};
pub use executor::{execute, verify_solution, ExecutionResult, ExecutionStatus};
pub use pruning::{candidate_moves, is_unsafe, violates_safety};
pub use puzzle::{BankCounts, BoatSide, KindLabels, Move, PuzzleConfig, State, CLASSIC_MOVES};
pub use registry::{BacktrackIndex, NodeHandle, NodeRecord, SearchIndex, VisitedRegistry};
pub use render::StateGraph;
pub use solver::{solve, solve_silent, SearchStats, SolverResult, Strategy};
pub use trace::{reconstruct_path, SolutionStep};
