//! Puzzle representation: bank states, boat loads and the puzzle configuration.
//!
//! A state only stores the left bank. The right bank is always derived from
//! the configured totals, so the two banks can never disagree.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SolveError;

/// Items of each kind in the classic instance
pub const DEFAULT_TOTAL: u8 = 3;

/// Seats in the boat in the classic instance
pub const DEFAULT_BOAT_CAPACITY: u8 = 2;

/// Boat loads of the classic instance, in expansion order.
///
/// The order decides which edges BFS expands first and which solution DFS
/// finds first.
pub const CLASSIC_MOVES: [Move; 5] = [
    Move::new(1, 0),
    Move::new(0, 1),
    Move::new(1, 1),
    Move::new(0, 2),
    Move::new(2, 0),
];

/// Bank the boat is currently moored at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoatSide {
    Left,
    Right,
}

impl BoatSide {
    pub fn opposite(self) -> BoatSide {
        match self {
            BoatSide::Left => BoatSide::Right,
            BoatSide::Right => BoatSide::Left,
        }
    }

    /// Sign applied to the left-bank counts when the boat departs from this side.
    ///
    /// Leaving the left bank takes items away from it; leaving the right
    /// bank brings them back.
    pub fn departure_sign(self) -> i16 {
        match self {
            BoatSide::Left => -1,
            BoatSide::Right => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BoatSide::Left => "left",
            BoatSide::Right => "right",
        }
    }
}

impl fmt::Display for BoatSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single boat load: how many items of each kind cross together.
///
/// Serialized as a `[primary, secondary]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(u8, u8)", into = "(u8, u8)")]
pub struct Move {
    pub primary: u8,
    pub secondary: u8,
}

impl Move {
    pub const fn new(primary: u8, secondary: u8) -> Self {
        Self { primary, secondary }
    }

    /// Number of seats this load occupies
    pub fn load(self) -> u16 {
        self.primary as u16 + self.secondary as u16
    }
}

impl From<(u8, u8)> for Move {
    fn from((primary, secondary): (u8, u8)) -> Self {
        Move::new(primary, secondary)
    }
}

impl From<Move> for (u8, u8) {
    fn from(mv: Move) -> Self {
        (mv.primary, mv.secondary)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.primary, self.secondary)
    }
}

/// Snapshot of the puzzle: left-bank counts plus the boat position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State {
    pub primary: u8,
    pub secondary: u8,
    pub boat: BoatSide,
}

impl State {
    pub const fn new(primary: u8, secondary: u8, boat: BoatSide) -> Self {
        Self {
            primary,
            secondary,
            boat,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.boat {
            BoatSide::Left => 'L',
            BoatSide::Right => 'R',
        };
        write!(f, "({}, {}, {})", self.primary, self.secondary, side)
    }
}

/// Item counts on one bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BankCounts {
    pub primary: u8,
    pub secondary: u8,
}

/// Human-facing names for the two item kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KindLabels {
    /// Name of the protected kind
    pub primary: String,
    /// Name of the threatening kind
    pub secondary: String,
    pub primary_glyph: String,
    pub secondary_glyph: String,
}

impl Default for KindLabels {
    fn default() -> Self {
        Self {
            primary: "missionaries".to_string(),
            secondary: "cannibals".to_string(),
            primary_glyph: "M".to_string(),
            secondary_glyph: "C".to_string(),
        }
    }
}

/// The complete puzzle configuration.
///
/// Every field has a default, so a partial JSON document (or `{}`) yields
/// the classic 3/3 instance with a two-seat boat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PuzzleConfig {
    pub primary_total: u8,
    pub secondary_total: u8,
    pub boat_capacity: u8,
    pub moves: Vec<Move>,
    pub labels: KindLabels,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            primary_total: DEFAULT_TOTAL,
            secondary_total: DEFAULT_TOTAL,
            boat_capacity: DEFAULT_BOAT_CAPACITY,
            moves: CLASSIC_MOVES.to_vec(),
            labels: KindLabels::default(),
        }
    }
}

impl PuzzleConfig {
    /// The classic three-and-three instance
    pub fn classic() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, SolveError> {
        let config: PuzzleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, SolveError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that the boat loads make sense for this boat
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.boat_capacity == 0 {
            return Err(SolveError::InvalidConfig(
                "boat capacity must be at least 1".to_string(),
            ));
        }
        if self.moves.is_empty() {
            return Err(SolveError::InvalidConfig(
                "at least one boat load is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for &mv in &self.moves {
            if mv.load() == 0 {
                return Err(SolveError::InvalidConfig(format!(
                    "boat load {} carries nobody",
                    mv
                )));
            }
            if mv.load() > self.boat_capacity as u16 {
                return Err(SolveError::InvalidConfig(format!(
                    "boat load {} exceeds capacity {}",
                    mv, self.boat_capacity
                )));
            }
            if !seen.insert(mv) {
                return Err(SolveError::InvalidConfig(format!(
                    "boat load {} is listed twice",
                    mv
                )));
            }
        }
        Ok(())
    }

    /// Everyone and the boat on the near (left) bank
    pub fn start_state(&self) -> State {
        State::new(self.primary_total, self.secondary_total, BoatSide::Left)
    }

    /// Nobody left on the near bank, boat on the far side
    pub fn goal_state(&self) -> State {
        State::new(0, 0, BoatSide::Right)
    }

    pub fn is_start(&self, state: &State) -> bool {
        *state == self.start_state()
    }

    pub fn is_goal(&self, state: &State) -> bool {
        *state == self.goal_state()
    }

    /// Whether both left-bank counts lie within `0..=total`.
    ///
    /// Takes signed values so candidates that overshoot in either
    /// direction can be rejected before a `State` is ever built.
    pub fn is_valid_count(&self, primary: i16, secondary: i16) -> bool {
        (0..=self.primary_total as i16).contains(&primary)
            && (0..=self.secondary_total as i16).contains(&secondary)
    }

    /// Whether a state lies inside this puzzle's state space
    pub fn contains(&self, state: &State) -> bool {
        state.primary <= self.primary_total && state.secondary <= self.secondary_total
    }

    pub fn left_bank(&self, state: &State) -> BankCounts {
        BankCounts {
            primary: state.primary,
            secondary: state.secondary,
        }
    }

    /// Right-bank counts, derived from the totals
    pub fn right_bank(&self, state: &State) -> BankCounts {
        BankCounts {
            primary: self.primary_total.saturating_sub(state.primary),
            secondary: self.secondary_total.saturating_sub(state.secondary),
        }
    }

    /// Apply a boat load to a state.
    ///
    /// Returns `None` when the crossing would leave a bank with a negative
    /// count or more items than exist.
    pub fn apply(&self, state: &State, mv: Move) -> Option<State> {
        let sign = state.boat.departure_sign();
        let primary = state.primary as i16 + sign * mv.primary as i16;
        let secondary = state.secondary as i16 + sign * mv.secondary as i16;

        if !self.is_valid_count(primary, secondary) {
            return None;
        }
        Some(State::new(
            primary as u8,
            secondary as u8,
            state.boat.opposite(),
        ))
    }

    /// Number of distinct triples in the state space
    pub fn state_space_size(&self) -> usize {
        (self.primary_total as usize + 1) * (self.secondary_total as usize + 1) * 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_defaults() {
        let puzzle = PuzzleConfig::classic();
        assert_eq!(puzzle.start_state(), State::new(3, 3, BoatSide::Left));
        assert_eq!(puzzle.goal_state(), State::new(0, 0, BoatSide::Right));
        assert_eq!(puzzle.moves, CLASSIC_MOVES.to_vec());
        assert_eq!(puzzle.state_space_size(), 32);
        assert!(puzzle.validate().is_ok());
    }

    #[test]
    fn test_is_valid_count_bounds() {
        let puzzle = PuzzleConfig::classic();
        assert!(puzzle.is_valid_count(0, 0));
        assert!(puzzle.is_valid_count(3, 3));
        assert!(!puzzle.is_valid_count(4, 0));
        assert!(!puzzle.is_valid_count(-1, 2));
        assert!(!puzzle.is_valid_count(2, 4));
    }

    #[test]
    fn test_start_and_goal_predicates() {
        let puzzle = PuzzleConfig::classic();
        assert!(puzzle.is_start(&State::new(3, 3, BoatSide::Left)));
        assert!(!puzzle.is_start(&State::new(3, 3, BoatSide::Right)));
        assert!(puzzle.is_goal(&State::new(0, 0, BoatSide::Right)));
        assert!(!puzzle.is_goal(&State::new(0, 0, BoatSide::Left)));
    }

    #[test]
    fn test_apply_is_signed_by_boat_side() {
        let puzzle = PuzzleConfig::classic();
        let start = puzzle.start_state();

        let crossed = puzzle.apply(&start, Move::new(1, 1)).unwrap();
        assert_eq!(crossed, State::new(2, 2, BoatSide::Right));

        let back = puzzle.apply(&crossed, Move::new(1, 0)).unwrap();
        assert_eq!(back, State::new(3, 2, BoatSide::Left));

        // Nobody on the right bank to bring back two cannibals
        let empty_right = State::new(3, 3, BoatSide::Right);
        assert_eq!(puzzle.apply(&empty_right, Move::new(0, 2)), None);
    }

    #[test]
    fn test_banks_sum_to_totals() {
        let puzzle = PuzzleConfig::classic();
        for primary in 0..=3 {
            for secondary in 0..=3 {
                let state = State::new(primary, secondary, BoatSide::Left);
                let left = puzzle.left_bank(&state);
                let right = puzzle.right_bank(&state);
                assert_eq!(left.primary + right.primary, 3);
                assert_eq!(left.secondary + right.secondary, 3);
            }
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let puzzle = PuzzleConfig::from_json_str(r#"{"primaryTotal": 2, "secondaryTotal": 2}"#)
            .unwrap();
        assert_eq!(puzzle.start_state(), State::new(2, 2, BoatSide::Left));
        assert_eq!(puzzle.boat_capacity, 2);
        assert_eq!(puzzle.moves.len(), 5);
        assert_eq!(puzzle.labels.primary_glyph, "M");
    }

    #[test]
    fn test_moves_parse_as_pairs() {
        let puzzle =
            PuzzleConfig::from_json_str(r#"{"boatCapacity": 1, "moves": [[0, 1], [1, 0]]}"#)
                .unwrap();
        assert_eq!(puzzle.moves, vec![Move::new(0, 1), Move::new(1, 0)]);
    }

    #[test]
    fn test_validate_rejects_bad_loads() {
        let over = r#"{"boatCapacity": 2, "moves": [[2, 1]]}"#;
        assert!(matches!(
            PuzzleConfig::from_json_str(over),
            Err(SolveError::InvalidConfig(_))
        ));

        let empty_boat = r#"{"moves": [[0, 0]]}"#;
        assert!(matches!(
            PuzzleConfig::from_json_str(empty_boat),
            Err(SolveError::InvalidConfig(_))
        ));

        let duplicate = r#"{"moves": [[1, 0], [1, 0]]}"#;
        assert!(matches!(
            PuzzleConfig::from_json_str(duplicate),
            Err(SolveError::InvalidConfig(_))
        ));

        let none = r#"{"moves": []}"#;
        assert!(matches!(
            PuzzleConfig::from_json_str(none),
            Err(SolveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bundled_puzzles_parse() {
        let classic = PuzzleConfig::from_json_str(include_str!("../puzzles/classic.json")).unwrap();
        assert_eq!(classic, PuzzleConfig::classic());

        let larger =
            PuzzleConfig::from_json_str(include_str!("../puzzles/five-three-seats.json")).unwrap();
        assert_eq!(larger.boat_capacity, 3);
        assert_eq!(larger.moves.len(), 9);
        assert_eq!(larger.state_space_size(), 72);

        let unsolvable =
            PuzzleConfig::from_json_str(include_str!("../puzzles/four-unsolvable.json")).unwrap();
        assert_eq!(unsolvable.moves, CLASSIC_MOVES.to_vec());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let missing = Path::new("puzzles/does-not-exist.json");
        assert!(matches!(PuzzleConfig::load(missing), Err(SolveError::Io(_))));
    }

    #[test]
    fn test_malformed_json_is_a_json_error() {
        assert!(matches!(
            PuzzleConfig::from_json_str(r#"{"primaryTotal": 300}"#),
            Err(SolveError::Json(_))
        ));
    }
}
