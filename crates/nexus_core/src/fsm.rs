//! Typed state machines
//!
//! The cursor and overlay each own a flat `(from, event, to)` table. Side
//! effects stay with the owner, which inspects the state returned by
//! [`StateMachine::send`] and starts its own transitions.
//!
//! Events without a matching row leave the state untouched, so a machine can
//! never be driven into a state that is not in its table.

use smallvec::SmallVec;
use std::fmt::Debug;

/// One row of a transition table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
}

/// Collects the transition table
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: Vec<Transition<S, E>>,
}

impl<S, E> StateMachineBuilder<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    /// Add a row `from --event--> to`
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition {
            from_state: from,
            event,
            to_state: to,
        });
        self
    }

    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            history: SmallVec::new(),
        }
    }
}

/// Number of recent transitions kept for inspection
const HISTORY_LEN: usize = 16;

/// A running state machine
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: Vec<Transition<S, E>>,
    history: SmallVec<[Transition<S, E>; HISTORY_LEN]>,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + Eq + Debug,
    E: Copy + Eq + Debug,
{
    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder {
            initial_state,
            transitions: Vec::new(),
        }
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Most recent transitions taken, oldest first
    pub fn history(&self) -> &[Transition<S, E>] {
        &self.history
    }

    /// Every state that appears in the table
    pub fn states(&self) -> Vec<S> {
        let mut states: Vec<S> = Vec::new();
        for t in &self.transitions {
            for s in [t.from_state, t.to_state] {
                if !states.contains(&s) {
                    states.push(s);
                }
            }
        }
        states
    }

    /// Whether the table holds a direct edge `from -> to` on any event
    pub fn has_edge(&self, from: S, to: S) -> bool {
        self.transitions
            .iter()
            .any(|t| t.from_state == from && t.to_state == to)
    }

    /// Apply `event`; returns the state afterwards
    pub fn send(&mut self, event: E) -> S {
        let current = self.current_state;
        let Some(row) = self
            .transitions
            .iter()
            .find(|t| t.from_state == current && t.event == event)
            .copied()
        else {
            return current;
        };

        self.current_state = row.to_state;
        if self.history.len() == HISTORY_LEN {
            self.history.remove(0);
        }
        self.history.push(row);
        tracing::trace!(from = ?current, ?event, to = ?row.to_state, "fsm transition");
        row.to_state
    }
}
