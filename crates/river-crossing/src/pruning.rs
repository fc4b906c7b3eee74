//! Search space pruning rules.
//!
//! Two things prune the graph. Out-of-range candidates never become
//! states. Unsafe states become states but are never expanded.

use smallvec::SmallVec;

use crate::puzzle::{Move, PuzzleConfig, State};

/// Successor candidates of a single state, in move-set order
pub type Candidates = SmallVec<[(Move, State); 8]>;

/// Check whether a bank is overrun.
///
/// A bank is unsafe when the threatening kind outnumbers the protected
/// kind, but only if at least one protected item is there to be overrun.
pub fn violates_safety(primary: u8, secondary: u8) -> bool {
    primary > 0 && secondary > primary
}

/// Check both banks of a state independently
pub fn is_unsafe(puzzle: &PuzzleConfig, state: &State) -> bool {
    let left = puzzle.left_bank(state);
    let right = puzzle.right_bank(state);
    violates_safety(left.primary, left.secondary) || violates_safety(right.primary, right.secondary)
}

/// Generate every in-range successor of `state`.
///
/// Candidates keep the order of `puzzle.moves`. Loads that would overshoot
/// a bank are dropped here. Safety is not checked, since unsafe states are
/// still part of the explored graph.
pub fn candidate_moves(puzzle: &PuzzleConfig, state: &State) -> Candidates {
    puzzle
        .moves
        .iter()
        .filter_map(|&mv| puzzle.apply(state, mv).map(|next| (mv, next)))
        .collect()
}
