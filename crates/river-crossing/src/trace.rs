//! Solution path reconstruction from the backtracking index.

use serde::Serialize;

use crate::error::SolveError;
use crate::puzzle::{BankCounts, BoatSide, Move, PuzzleConfig, State};
use crate::registry::{BacktrackIndex, NodeHandle};

/// One crossing of a reconstructed solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionStep {
    /// 1-based position in the solution
    pub step: usize,
    #[serde(rename = "move")]
    pub mv: Move,
    /// Bank the boat departed from
    pub boat_side_before: BoatSide,
    /// State after the crossing
    pub state: State,
    pub left: BankCounts,
    pub right: BankCounts,
    /// Handle of `state`, for highlighting by renderers
    pub handle: NodeHandle,
}

/// Walk parent links from `goal` back to the start and return the crossings
/// in start-to-goal order.
///
/// Bank counts are rebuilt by replaying each load from the start state.
/// Any mismatch with the recorded states is reported as
/// [`SolveError::BrokenTrace`] and never turned into a partial path.
pub fn reconstruct_path(
    puzzle: &PuzzleConfig,
    index: &BacktrackIndex,
    goal: State,
) -> Result<Vec<SolutionStep>, SolveError> {
    let mut chain: Vec<(State, Move, NodeHandle)> = Vec::new();
    let mut cursor = goal;

    loop {
        let record = index.record(&cursor).ok_or(SolveError::BrokenTrace(cursor))?;
        match (record.parent, record.mv) {
            (Some(parent), Some(mv)) => {
                chain.push((cursor, mv, record.handle));
                cursor = parent;
            }
            (None, None) => break,
            _ => return Err(SolveError::BrokenTrace(cursor)),
        }
        // Parent links cannot loop when every state is recorded once
        if chain.len() > index.len() {
            return Err(SolveError::BrokenTrace(cursor));
        }
    }

    if !puzzle.is_start(&cursor) {
        return Err(SolveError::BrokenTrace(cursor));
    }
    chain.reverse();

    let mut current = cursor;
    let mut steps = Vec::with_capacity(chain.len());
    for (i, (recorded, mv, handle)) in chain.into_iter().enumerate() {
        let boat_side_before = current.boat;
        let next = puzzle
            .apply(&current, mv)
            .filter(|next| *next == recorded)
            .ok_or(SolveError::BrokenTrace(recorded))?;

        steps.push(SolutionStep {
            step: i + 1,
            mv,
            boat_side_before,
            state: next,
            left: puzzle.left_bank(&next),
            right: puzzle.right_bank(&next),
            handle,
        });
        current = next;
    }

    Ok(steps)
}
