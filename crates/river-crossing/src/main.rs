//! CLI entry point for the river-crossing solver.
//!
//! Usage:
//!   river-crossing solve [options]
//!   river-crossing verify <moves.json> [--puzzle <puzzle.json>]
//!   river-crossing verify --stdin [--puzzle <puzzle.json>]
//!
//! Options for solve:
//!   --method <bfs|dfs>   Search strategy (default: bfs)
//!   --puzzle <file>      Puzzle configuration JSON (default: classic 3/3)
//!   --dot <file>         Write the explored state-space tree as Graphviz DOT
//!   --legend             Add a colour legend to the DOT output
//!   --json               Print a JSON report in place of the textual replay
//!
//! Exit status is 0 on success, 1 when no solution exists or a sequence
//! fails verification, and 2 on usage, I/O or configuration errors.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use river_crossing::display::render_solution;
use river_crossing::{
    execute, solve, ExecutionStatus, Move, PuzzleConfig, SearchStats, SolutionStep, SolveError,
    State, StateGraph, Strategy,
};

#[derive(Parser)]
#[command(name = "river-crossing")]
#[command(about = "Exhaustive BFS/DFS solver for river-crossing puzzles")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a solution and replay it
    Solve {
        /// Search strategy
        #[arg(short, long, value_enum, default_value_t = Strategy::Bfs)]
        method: Strategy,

        /// Puzzle configuration JSON file
        #[arg(short, long, value_name = "FILE")]
        puzzle: Option<PathBuf>,

        /// Write the explored state-space tree as Graphviz DOT
        #[arg(long, value_name = "FILE")]
        dot: Option<PathBuf>,

        /// Draw a legend in the DOT output
        #[arg(short, long)]
        legend: bool,

        /// Print a JSON report instead of the textual replay
        #[arg(long)]
        json: bool,
    },

    /// Replay a JSON array of boat loads and check that it solves the puzzle
    Verify {
        /// Path to a moves JSON file such as [[1,1],[1,0]] (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read moves from stdin instead of file
        #[arg(long)]
        stdin: bool,

        /// Puzzle configuration JSON file
        #[arg(short, long, value_name = "FILE")]
        puzzle: Option<PathBuf>,
    },
}

/// JSON report for `solve --json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    method: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crossings: Option<usize>,
    stats: SearchStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Vec<SolutionStep>>,
}

/// JSON report for `verify`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyOutput {
    valid: bool,
    status: ExecutionStatus,
    steps_executed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_at: Option<usize>,
    final_state: State,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(command: Commands) -> Result<ExitCode, SolveError> {
    match command {
        Commands::Solve {
            method,
            puzzle,
            dot,
            legend,
            json,
        } => run_solve(method, puzzle.as_deref(), dot.as_deref(), legend, json),
        Commands::Verify {
            file,
            stdin,
            puzzle,
        } => run_verify(file.as_deref(), stdin, puzzle.as_deref()),
    }
}

fn load_puzzle(path: Option<&Path>) -> Result<PuzzleConfig, SolveError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading puzzle configuration");
            PuzzleConfig::load(path)
        }
        None => Ok(PuzzleConfig::classic()),
    }
}

fn run_solve(
    strategy: Strategy,
    puzzle_path: Option<&Path>,
    dot: Option<&Path>,
    legend: bool,
    json: bool,
) -> Result<ExitCode, SolveError> {
    let puzzle = load_puzzle(puzzle_path)?;

    let mut graph = StateGraph::new();
    let result = solve(&puzzle, strategy, &mut graph);
    let steps = if result.solved {
        Some(result.solution()?)
    } else {
        None
    };

    if let Some(path) = dot {
        if let Some(steps) = &steps {
            graph.highlight_path(steps);
        }
        graph.write_dot(path, &puzzle, legend)?;
        info!(path = %path.display(), nodes = graph.node_count(), "state graph written");
    }

    if json {
        let output = SolveOutput {
            solved: result.solved,
            method: strategy,
            reason: if result.solved {
                None
            } else {
                Some("no_solution".to_string())
            },
            crossings: result.crossings(),
            stats: result.stats.clone(),
            solution: steps,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if let Some(steps) = &steps {
        print!("{}", render_solution(&puzzle, steps));
    } else {
        println!(
            "No solution found with {} after exploring {} states.",
            strategy, result.stats.states_discovered
        );
    }

    Ok(if result.solved {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn run_verify(
    file: Option<&Path>,
    stdin: bool,
    puzzle_path: Option<&Path>,
) -> Result<ExitCode, SolveError> {
    let json_content = if stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(path) = file {
        fs::read_to_string(path)?
    } else {
        eprintln!("Error: Must provide either a file path or --stdin");
        return Ok(ExitCode::from(2));
    };

    let puzzle = load_puzzle(puzzle_path)?;
    let moves: Vec<Move> = serde_json::from_str(&json_content)?;
    let result = execute(&puzzle, &moves);

    let output = VerifyOutput {
        valid: result.solved,
        status: result.status,
        steps_executed: result.steps_executed,
        failed_at: result.failed_at,
        final_state: result.final_state,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(if result.solved {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
