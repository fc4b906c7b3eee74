//! Events emitted while the search runs.
//!
//! Renderers subscribe through [`SearchObserver`]. They see every discovered
//! state and tree edge but have no way to steer the search.

use serde::Serialize;

use crate::puzzle::{Move, State};
use crate::registry::NodeHandle;

/// How a processed state ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Start,
    Goal,
    /// Safe, but every successor was out of range or already visited
    DeadEnd,
    /// Safety violated on one of the banks; never expanded
    Unsafe,
    /// Expanded with at least one new child
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent {
    /// A state entered the visited registry
    Discovered {
        state: State,
        parent: Option<State>,
        handle: NodeHandle,
        depth: usize,
    },
    /// A tree edge was recorded in the backtracking index
    Edge {
        from: State,
        to: State,
        mv: Move,
        handle: NodeHandle,
    },
    /// A state was processed and classified
    Classified {
        state: State,
        handle: NodeHandle,
        kind: NodeKind,
    },
}

pub trait SearchObserver {
    fn on_event(&mut self, event: &SearchEvent);
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl SearchObserver for NullObserver {
    fn on_event(&mut self, _event: &SearchEvent) {}
}

/// Observer that keeps every event in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<SearchEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovered states in discovery order
    pub fn discovered(&self) -> Vec<State> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::Discovered { state, .. } => Some(*state),
                _ => None,
            })
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SearchEvent::Edge { .. }))
            .count()
    }

    /// Last classification reported for a state
    pub fn kind_of(&self, state: &State) -> Option<NodeKind> {
        self.events.iter().rev().find_map(|e| match e {
            SearchEvent::Classified { state: s, kind, .. } if s == state => Some(*kind),
            _ => None,
        })
    }
}

impl SearchObserver for EventLog {
    fn on_event(&mut self, event: &SearchEvent) {
        self.events.push(event.clone());
    }
}
