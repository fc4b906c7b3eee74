//! Per-search bookkeeping: the visited registry and the backtracking index.
//!
//! Both structures are owned by a single search and handed back inside its
//! result, so separate solves never share state.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::puzzle::{Move, State};

/// Stable reference to a discovered state, assigned in discovery order.
///
/// Renderers key their own styling on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeHandle(pub usize);

/// States already reached in the current search
#[derive(Debug, Clone, Default)]
pub struct VisitedRegistry {
    states: HashSet<State>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, state: &State) -> bool {
        self.states.contains(state)
    }

    /// Returns `true` if the state was not yet visited
    pub fn mark_visited(&mut self, state: State) -> bool {
        self.states.insert(state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// How a state was first reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRecord {
    /// `None` only for the start state
    pub parent: Option<State>,
    pub mv: Option<Move>,
    pub handle: NodeHandle,
    pub depth: usize,
}

/// Parent links for every discovered state.
///
/// Each state is recorded once, at first discovery, and never overwritten.
/// Following parents from any state therefore yields a simple path.
#[derive(Debug, Clone, Default)]
pub struct BacktrackIndex {
    records: HashMap<State, NodeRecord>,
    order: Vec<State>,
}

impl BacktrackIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how `state` was reached and assign its handle.
    ///
    /// `via` is the parent state and the load that crossed, or `None` for
    /// the start state. Recording a state twice keeps the first record.
    pub fn record_edge(
        &mut self,
        state: State,
        via: Option<(State, Move)>,
        depth: usize,
    ) -> NodeHandle {
        if let Some(existing) = self.records.get(&state) {
            debug_assert!(false, "state {} recorded twice", state);
            return existing.handle;
        }

        let handle = NodeHandle(self.order.len());
        self.records.insert(
            state,
            NodeRecord {
                parent: via.map(|(parent, _)| parent),
                mv: via.map(|(_, mv)| mv),
                handle,
                depth,
            },
        );
        self.order.push(state);
        handle
    }

    pub fn record(&self, state: &State) -> Option<&NodeRecord> {
        self.records.get(state)
    }

    pub fn parent_of(&self, state: &State) -> Option<State> {
        self.records.get(state).and_then(|r| r.parent)
    }

    pub fn move_of(&self, state: &State) -> Option<Move> {
        self.records.get(state).and_then(|r| r.mv)
    }

    pub fn handle_of(&self, state: &State) -> Option<NodeHandle> {
        self.records.get(state).map(|r| r.handle)
    }

    pub fn depth_of(&self, state: &State) -> Option<usize> {
        self.records.get(state).map(|r| r.depth)
    }

    /// The state a handle was assigned to
    pub fn state_of(&self, handle: NodeHandle) -> Option<State> {
        self.order.get(handle.0).copied()
    }

    /// Recorded states in discovery order
    pub fn states(&self) -> &[State] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Everything a search leaves behind for path reconstruction and rendering
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    pub visited: VisitedRegistry,
    pub backtrack: BacktrackIndex,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }
}
