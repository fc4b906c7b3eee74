use thiserror::Error;

use crate::puzzle::State;

/// Errors surfaced by the solver library and the CLI.
///
/// Running out of states is not an error: a search that finds nothing
/// reports `solved == false`. `NoSolution` only appears when a caller asks
/// for the path of such a search.
#[derive(Error, Debug)]
pub enum SolveError {
    /// Path reconstruction was requested for a search that did not reach the goal.
    #[error("no solution: the search did not reach the goal state")]
    NoSolution,

    /// The backtracking index does not lead from the goal back to the start.
    #[error("backtracking index is broken at state {0}")]
    BrokenTrace(State),

    /// The puzzle configuration is unusable.
    #[error("invalid puzzle configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
