//! Textual replay of a solution, one bank snapshot per crossing.

use std::fmt::{self, Write as FmtWrite};

use crate::puzzle::{BankCounts, PuzzleConfig};
use crate::trace::SolutionStep;

const RULE_WIDTH: usize = 60;
const RIVER_WIDTH: usize = 40;

fn bank(puzzle: &PuzzleConfig, counts: BankCounts) -> String {
    format!(
        "({} {})",
        puzzle.labels.primary_glyph.repeat(counts.primary as usize),
        puzzle.labels.secondary_glyph.repeat(counts.secondary as usize)
    )
}

fn banks_line(puzzle: &PuzzleConfig, left: BankCounts, right: BankCounts) -> String {
    format!(
        "{} ---{:>width$}--- {}",
        bank(puzzle, left),
        "",
        bank(puzzle, right),
        width = RIVER_WIDTH
    )
}

/// Render the solution as the start banks followed by one block per crossing
pub fn render_solution(puzzle: &PuzzleConfig, steps: &[SolutionStep]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_solution_to(&mut out, puzzle, steps);
    out
}

fn write_solution_to(
    out: &mut String,
    puzzle: &PuzzleConfig,
    steps: &[SolutionStep],
) -> fmt::Result {
    let rule = "*".repeat(RULE_WIDTH);
    let start = puzzle.start_state();

    writeln!(out, "{}", rule)?;
    writeln!(
        out,
        "{}\n",
        banks_line(puzzle, puzzle.left_bank(&start), puzzle.right_bank(&start))
    )?;

    for step in steps {
        writeln!(
            out,
            "Step {}: Move {} {} and {} {} from {} side.",
            step.step,
            step.mv.primary,
            puzzle.labels.primary,
            step.mv.secondary,
            puzzle.labels.secondary,
            step.boat_side_before
        )?;
        writeln!(out, "{}\n", banks_line(puzzle, step.left, step.right))?;
    }

    writeln!(out, "{}", rule)?;
    writeln!(out, "Solved in {} crossings.", steps.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve_silent, Strategy};

    #[test]
    fn test_render_classic_solution() {
        let puzzle = PuzzleConfig::classic();
        let steps = solve_silent(&puzzle, Strategy::Bfs).solution().unwrap();
        let text = render_solution(&puzzle, &steps);

        assert!(text.contains("(MMM CCC) ---"));
        assert!(text.contains("Step 1: Move 1 missionaries and 1 cannibals from left side."));
        assert!(text.contains("Step 2: Move 1 missionaries and 0 cannibals from right side."));
        assert!(text.contains("Step 11:"));
        assert!(text.trim_end().ends_with("Solved in 11 crossings."));
        // Final snapshot: everyone on the right bank
        assert!(text.contains("( ) ---"));
        assert!(text.contains("--- (MMM CCC)"));
    }

    #[test]
    fn test_render_uses_configured_glyphs() {
        let mut puzzle = PuzzleConfig::classic();
        puzzle.labels.primary_glyph = "w".to_string();
        puzzle.labels.secondary_glyph = "g".to_string();
        puzzle.labels.primary = "wolves".to_string();
        puzzle.labels.secondary = "goats".to_string();

        let text = render_solution(&puzzle, &[]);
        assert!(text.contains("(www ggg)"));
        assert!(text.contains("Solved in 0 crossings."));
    }
}
