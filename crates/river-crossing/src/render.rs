//! Graphviz rendering of the explored state-space tree.
//!
//! [`StateGraph`] is a [`SearchObserver`]: hand it to [`crate::solve`],
//! optionally highlight the solution, then write DOT text. Rasterizing is
//! left to the `dot` tool (`dot -Tpng bfs.dot -o bfs.png`).

use std::collections::HashMap;
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::SolveError;
use crate::events::{NodeKind, SearchEvent, SearchObserver};
use crate::puzzle::{PuzzleConfig, State};
use crate::registry::NodeHandle;
use crate::trace::SolutionStep;

#[derive(Debug, Clone)]
struct RenderNode {
    state: State,
    kind: Option<NodeKind>,
    on_path: bool,
}

/// Tree of discovered states, built from search events
#[derive(Debug, Clone, Default)]
pub struct StateGraph {
    nodes: Vec<RenderNode>,
    handles: HashMap<State, NodeHandle>,
    edges: Vec<(NodeHandle, NodeHandle)>,
}

impl StateGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Mark the nodes of a solution so they are drawn as the solution path
    pub fn highlight_path(&mut self, steps: &[SolutionStep]) {
        for step in steps {
            if let Some(node) = self.nodes.get_mut(step.handle.0) {
                node.on_path = true;
            }
        }
    }

    /// Fill colour and font colour for a node
    fn style(node: &RenderNode) -> (&'static str, &'static str) {
        match node.kind {
            Some(NodeKind::Start) => ("blue", "white"),
            Some(NodeKind::Goal) => ("green", "black"),
            _ if node.on_path => ("yellow", "black"),
            Some(NodeKind::Unsafe) => ("red", "black"),
            Some(NodeKind::DeadEnd) => ("gray", "black"),
            Some(NodeKind::Internal) => ("orange", "black"),
            None => ("white", "black"),
        }
    }

    /// Render as a DOT document
    pub fn to_dot(&self, puzzle: &PuzzleConfig, legend: bool) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_dot_to(&mut out, puzzle, legend);
        out
    }

    fn write_dot_to(
        &self,
        out: &mut String,
        puzzle: &PuzzleConfig,
        legend: bool,
    ) -> std::fmt::Result {
        let title = format!(
            "{} and {} state space tree",
            capitalize(&puzzle.labels.primary),
            puzzle.labels.secondary
        );

        writeln!(out, "graph state_space {{")?;
        writeln!(
            out,
            "  graph [bgcolor=\"#fff3af\", label=\"{}\", fontcolor=\"red\", fontsize=\"24\"];",
            escape(&title)
        )?;

        for (i, node) in self.nodes.iter().enumerate() {
            let (fill, font) = Self::style(node);
            writeln!(
                out,
                "  n{} [label=\"{}\", style=\"filled\", fillcolor=\"{}\", fontcolor=\"{}\"];",
                i, node.state, fill, font
            )?;
        }
        for (from, to) in &self.edges {
            writeln!(out, "  n{} -- n{} [dir=\"forward\"];", from.0, to.0)?;
        }

        if legend {
            self.write_legend(out, puzzle)?;
        }
        writeln!(out, "}}")
    }

    fn write_legend(&self, out: &mut String, puzzle: &PuzzleConfig) -> std::fmt::Result {
        const ENTRIES: [(&str, &str); 6] = [
            ("Start node", "blue"),
            ("Unsafe node", "red"),
            ("Solution nodes", "yellow"),
            ("Can't be expanded", "gray"),
            ("Goal node", "green"),
            ("Node with child", "orange"),
        ];

        writeln!(out, "  subgraph cluster_legend {{")?;
        writeln!(
            out,
            "    label=\"Legend\"; fontsize=\"20\"; color=\"gold\"; fontcolor=\"blue\"; style=\"filled\"; fillcolor=\"#fff4f4\";"
        )?;
        for (i, (label, color)) in ENTRIES.iter().enumerate() {
            writeln!(
                out,
                "    legend{} [label=\"{}\", style=\"filled\", fillcolor=\"{}\", width=\"2\", fixedsize=\"true\"];",
                i, label, color
            )?;
        }

        let moves: Vec<String> = puzzle.moves.iter().map(|m| m.to_string()).collect();
        let description = format!(
            "Each node (p, s, b) is the near bank: p = {}, s = {}, b = boat side (L or R)\\nGoal: move everyone to the far side {}\\nBoat loads: {}",
            puzzle.labels.primary,
            puzzle.labels.secondary,
            puzzle.goal_state(),
            moves.join(", ")
        );
        writeln!(
            out,
            "    legend_desc [label=\"{}\", shape=\"plaintext\", fontsize=\"20\", fontcolor=\"red\"];",
            escape(&description)
        )?;
        writeln!(out, "  }}")
    }

    /// Write the DOT document to a file
    pub fn write_dot(
        &self,
        path: &Path,
        puzzle: &PuzzleConfig,
        legend: bool,
    ) -> Result<(), SolveError> {
        fs::write(path, self.to_dot(puzzle, legend))?;
        debug!(path = %path.display(), nodes = self.nodes.len(), "wrote state graph");
        Ok(())
    }
}

impl SearchObserver for StateGraph {
    fn on_event(&mut self, event: &SearchEvent) {
        match event {
            SearchEvent::Discovered { state, handle, .. } => {
                debug_assert_eq!(handle.0, self.nodes.len());
                self.handles.insert(*state, *handle);
                self.nodes.push(RenderNode {
                    state: *state,
                    kind: None,
                    on_path: false,
                });
            }
            SearchEvent::Edge { from, handle, .. } => {
                if let Some(&parent) = self.handles.get(from) {
                    self.edges.push((parent, *handle));
                }
            }
            SearchEvent::Classified { handle, kind, .. } => {
                if let Some(node) = self.nodes.get_mut(handle.0) {
                    node.kind = Some(*kind);
                }
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Escape double quotes for a DOT string. Backslash sequences are kept so
/// `\n` line breaks survive.
fn escape(s: &str) -> String {
    s.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve, Strategy};

    #[test]
    fn test_one_node_per_state_and_one_edge_per_tree_edge() {
        let puzzle = PuzzleConfig::classic();
        let mut graph = StateGraph::new();
        let result = solve(&puzzle, Strategy::Bfs, &mut graph);

        assert_eq!(graph.node_count(), result.index.backtrack.len());
        assert_eq!(graph.edge_count(), result.index.backtrack.len() - 1);

        let dot = graph.to_dot(&puzzle, false);
        assert_eq!(dot.matches(" -- ").count(), graph.edge_count());
        assert!(dot.starts_with("graph state_space {"));
        assert!(dot.trim_end().ends_with('}'));
        assert!(!dot.contains("cluster_legend"));
    }

    #[test]
    fn test_solution_nodes_highlighted() {
        let puzzle = PuzzleConfig::classic();
        let mut graph = StateGraph::new();
        let result = solve(&puzzle, Strategy::Dfs, &mut graph);
        let steps = result.solution().unwrap();
        graph.highlight_path(&steps);

        let dot = graph.to_dot(&puzzle, false);
        // Start and goal keep their own colours; the rest of the path is yellow
        assert_eq!(dot.matches("fillcolor=\"yellow\"").count(), steps.len() - 1);
        assert_eq!(dot.matches("fillcolor=\"blue\"").count(), 1);
        assert_eq!(dot.matches("fillcolor=\"green\"").count(), 1);
        assert!(dot.contains("label=\"(0, 0, R)\""));
    }

    #[test]
    fn test_edges_link_parent_handles() {
        let puzzle = PuzzleConfig::classic();
        let mut graph = StateGraph::new();
        let result = solve(&puzzle, Strategy::Bfs, &mut graph);
        let backtrack = &result.index.backtrack;

        for &(from, to) in &graph.edges {
            let child = backtrack.state_of(to).unwrap();
            let parent = backtrack.state_of(from).unwrap();
            assert_eq!(backtrack.parent_of(&child), Some(parent));
            assert_eq!(graph.handles.get(&parent), Some(&from));
        }
        assert_eq!(graph.handles.len(), graph.node_count());
    }

    #[test]
    fn test_legend_cluster() {
        let puzzle = PuzzleConfig::classic();
        let mut graph = StateGraph::new();
        solve(&puzzle, Strategy::Bfs, &mut graph);

        let dot = graph.to_dot(&puzzle, true);
        assert!(dot.contains("subgraph cluster_legend {"));
        assert!(dot.contains("Can't be expanded"));
        assert!(dot.contains("Boat loads: (1, 0), (0, 1), (1, 1), (0, 2), (2, 0)"));
        assert!(dot.contains("Missionaries and cannibals state space tree"));
    }
}
