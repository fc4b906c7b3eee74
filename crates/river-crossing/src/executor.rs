//! Replay of an explicit move sequence.
//!
//! The search engine never needs this; it exists to check solutions that
//! come from elsewhere (a file, another solver, a reconstructed path).

use serde::Serialize;
use smallvec::SmallVec;

use crate::pruning::is_unsafe;
use crate::puzzle::{Move, PuzzleConfig, State};

/// Result status of a replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Every move applied and the goal was reached
    Solved,
    /// A load is not in the puzzle's move set
    IllegalMove,
    /// A crossing would leave a bank outside its range
    OutOfRange,
    /// A crossing produced a state that violates safety
    Unsafe,
    /// All moves applied but the goal was not reached
    Incomplete,
}

/// Result of replaying a move sequence
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    pub solved: bool,
    /// Moves applied successfully
    pub steps_executed: usize,
    /// Index of the move that failed, if any
    pub failed_at: Option<usize>,
    /// Last state reached
    pub final_state: State,
    /// Every state visited, starting with the start state
    pub trail: SmallVec<[State; 16]>,
}

impl ExecutionResult {
    fn stop(
        status: ExecutionStatus,
        failed_at: Option<usize>,
        final_state: State,
        trail: SmallVec<[State; 16]>,
    ) -> Self {
        Self {
            status,
            solved: status == ExecutionStatus::Solved,
            steps_executed: trail.len().saturating_sub(1),
            failed_at,
            final_state,
            trail,
        }
    }
}

/// Replay `moves` from the start state with every rule enforced
pub fn execute(puzzle: &PuzzleConfig, moves: &[Move]) -> ExecutionResult {
    let mut trail: SmallVec<[State; 16]> = SmallVec::new();
    let mut state = puzzle.start_state();
    trail.push(state);

    if is_unsafe(puzzle, &state) {
        return ExecutionResult::stop(ExecutionStatus::Unsafe, None, state, trail);
    }

    for (i, &mv) in moves.iter().enumerate() {
        if !puzzle.moves.contains(&mv) {
            return ExecutionResult::stop(ExecutionStatus::IllegalMove, Some(i), state, trail);
        }

        let next = match puzzle.apply(&state, mv) {
            Some(next) => next,
            None => {
                return ExecutionResult::stop(ExecutionStatus::OutOfRange, Some(i), state, trail)
            }
        };

        // The offending state is not part of the trail
        if is_unsafe(puzzle, &next) {
            return ExecutionResult::stop(ExecutionStatus::Unsafe, Some(i), state, trail);
        }
        state = next;
        trail.push(state);
    }

    let status = if puzzle.is_goal(&state) {
        ExecutionStatus::Solved
    } else {
        ExecutionStatus::Incomplete
    };
    ExecutionResult::stop(status, None, state, trail)
}

/// Simple verification: does the sequence solve the puzzle?
pub fn verify_solution(puzzle: &PuzzleConfig, moves: &[Move]) -> bool {
    execute(puzzle, moves).solved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::BoatSide;
    use crate::solver::{solve_silent, Strategy};

    fn classic_solution() -> Vec<Move> {
        [
            (1, 1),
            (1, 0),
            (0, 2),
            (0, 1),
            (2, 0),
            (1, 1),
            (2, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 1),
        ]
        .into_iter()
        .map(|(primary, secondary): (u8, u8)| Move::new(primary, secondary))
        .collect()
    }

    #[test]
    fn test_known_solution_replays() {
        let puzzle = PuzzleConfig::classic();
        let result = execute(&puzzle, &classic_solution());

        assert_eq!(result.status, ExecutionStatus::Solved);
        assert!(result.solved);
        assert_eq!(result.steps_executed, 11);
        assert_eq!(result.final_state, puzzle.goal_state());
        assert_eq!(result.trail.len(), 12);
    }

    #[test]
    fn test_reconstructed_paths_replay() {
        let puzzle = PuzzleConfig::classic();
        for strategy in [Strategy::Bfs, Strategy::Dfs] {
            let steps = solve_silent(&puzzle, strategy).solution().unwrap();
            let moves: Vec<Move> = steps.iter().map(|s| s.mv).collect();
            assert!(verify_solution(&puzzle, &moves));
        }
    }

    #[test]
    fn test_unsafe_crossing_rejected() {
        let puzzle = PuzzleConfig::classic();
        // Two missionaries leave: (1, 3) stays behind on the left
        let result = execute(&puzzle, &[Move::new(2, 0)]);

        assert_eq!(result.status, ExecutionStatus::Unsafe);
        assert_eq!(result.failed_at, Some(0));
        assert_eq!(result.steps_executed, 0);
        assert_eq!(result.final_state, puzzle.start_state());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let puzzle = PuzzleConfig::classic();
        // Nobody is on the right bank to come back with
        let result = execute(&puzzle, &[Move::new(1, 1), Move::new(0, 2)]);

        assert_eq!(result.status, ExecutionStatus::OutOfRange);
        assert_eq!(result.failed_at, Some(1));
        assert_eq!(result.final_state, State::new(2, 2, BoatSide::Right));
    }

    #[test]
    fn test_failure_mid_sequence_reports_last_good_state() {
        let puzzle = PuzzleConfig::classic();
        // Third crossing leaves (1, 2) on the right bank
        let moves = [Move::new(1, 1), Move::new(1, 0), Move::new(1, 1)];
        let result = execute(&puzzle, &moves);

        assert_eq!(result.status, ExecutionStatus::Unsafe);
        assert_eq!(result.failed_at, Some(2));
        assert_eq!(result.steps_executed, 2);
        assert_eq!(result.final_state, State::new(3, 2, BoatSide::Left));
        assert_eq!(result.trail.last(), Some(&result.final_state));
    }

    #[test]
    fn test_illegal_load_rejected() {
        let puzzle = PuzzleConfig::classic();
        let result = execute(&puzzle, &[Move::new(2, 1)]);
        assert_eq!(result.status, ExecutionStatus::IllegalMove);
        assert!(!result.solved);
    }

    #[test]
    fn test_short_sequence_incomplete() {
        let puzzle = PuzzleConfig::classic();
        let mut moves = classic_solution();
        moves.pop();

        let result = execute(&puzzle, &moves);
        assert_eq!(result.status, ExecutionStatus::Incomplete);
        assert_eq!(result.failed_at, None);
        assert_eq!(result.steps_executed, 10);
    }
}
