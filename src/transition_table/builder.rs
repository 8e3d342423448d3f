use crate::{
    alphabet::Symbol,
    automaton::{DFA, NFA},
    error::ConstructionError,
    state::State,
};

use super::TransitionTable;

/// Helper struct for the construction of transition tables and automata. It collects transitions
/// and accepting states, the initial state is given when the automaton is created.
///
/// # Example
///
/// The NFA below moves spontaneously from `q0` to `q1` and `q3`, then it alternates between `q1`
/// and `q2` on `a` and between `q3` and `q4` on `b`.
/// ```
/// use regular_sets::prelude::*;
///
/// let nfa = TableBuilder::default()
///     .with_epsilon_transitions([("q0", "q1"), ("q0", "q3")])
///     .with_transitions([
///         ("q1", 'a', "q2"),
///         ("q2", 'a', "q1"),
///         ("q3", 'b', "q4"),
///         ("q4", 'b', "q3"),
///     ])
///     .with_accepting(["q1", "q3"])
///     .into_nfa("q0")
///     .unwrap();
/// assert!(!nfa.is_epsilon_free());
/// ```
#[derive(Clone, Default, Debug)]
pub struct TableBuilder {
    table: TransitionTable,
    accepting: Vec<State>,
}

impl TableBuilder {
    /// Adds a list of transitions `(p, a, q)` to `self`.
    pub fn with_transitions<I, P, S, Q>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (P, S, Q)>,
        P: Into<State>,
        S: Into<Symbol>,
        Q: Into<State>,
    {
        self.table.extend(iter);
        self
    }

    /// Adds a list of epsilon transitions `(p, q)` to `self`.
    pub fn with_epsilon_transitions<I, P, Q>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (P, Q)>,
        P: Into<State>,
        Q: Into<State>,
    {
        self.table
            .extend(iter.into_iter().map(|(p, q)| (p, Symbol::Epsilon, q)));
        self
    }

    /// Adds states that have no outgoing transitions of their own.
    pub fn with_states<I, S>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        for state in iter {
            self.table.add_state(state);
        }
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I, S>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.accepting.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Returns the collected transition table, dropping the accepting states.
    pub fn into_table(self) -> TransitionTable {
        self.table
    }

    /// Builds a [`DFA`] with the given initial state.
    pub fn into_dfa<S: Into<State>>(self, initial: S) -> Result<DFA, ConstructionError> {
        DFA::new(self.table, initial.into(), self.accepting)
    }

    /// Builds an [`NFA`] with the given initial state.
    pub fn into_nfa<S: Into<State>>(self, initial: S) -> Result<NFA, ConstructionError> {
        NFA::new(self.table, initial.into(), self.accepting)
    }
}
