use tracing::trace;

use crate::{
    alphabet::{Alphabet, Symbol},
    error::ConstructionError,
    math::{Map, OrderedSet},
    state::State,
};

mod builder;
pub use builder::TableBuilder;

/// The transition relation shared by all automata. It maps a state to a map from symbols to the
/// set of successor states. An absent entry, just like an empty set, means there is no move from
/// the state on that symbol.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct TransitionTable {
    delta: Map<State, Map<Symbol, OrderedSet<State>>>,
}

impl TransitionTable {
    /// Creates an empty transition table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a [`TableBuilder`] for building tables and automata on the fly.
    ///
    /// # Example
    /// ```
    /// use regular_sets::prelude::*;
    ///
    /// let dfa = TransitionTable::builder()
    ///     .with_transitions([
    ///         ("q0", 'a', "q1"),
    ///         ("q0", 'b', "q1"),
    ///         ("q1", 'a', "q0"),
    ///         ("q1", 'b', "q0"),
    ///     ])
    ///     .with_accepting(["q0"])
    ///     .into_dfa("q0")
    ///     .unwrap();
    /// assert!(dfa.validate("abab"));
    /// ```
    pub fn builder() -> TableBuilder {
        TableBuilder::default()
    }

    /// Registers `state` as a source of the table, even if it has no outgoing transitions.
    pub fn add_state<S: Into<State>>(&mut self, state: S) {
        self.delta.entry(state.into()).or_default();
    }

    /// Adds the transition `from --on--> to`. Returns false if it was already present.
    pub fn add_transition<P, S, Q>(&mut self, from: P, on: S, to: Q) -> bool
    where
        P: Into<State>,
        S: Into<Symbol>,
        Q: Into<State>,
    {
        self.delta
            .entry(from.into())
            .or_default()
            .entry(on.into())
            .or_default()
            .insert(to.into())
    }

    /// Returns the successors of `state` on `symbol`, if the table has an entry for the pair.
    pub fn successors(&self, state: &State, symbol: &Symbol) -> Option<&OrderedSet<State>> {
        self.delta.get(state)?.get(symbol)
    }

    /// Returns an iterator over the successors of `state` on `symbol`, which is empty if there
    /// is no move.
    pub fn successors_iter<'a>(
        &'a self,
        state: &State,
        symbol: &Symbol,
    ) -> impl Iterator<Item = &'a State> + 'a {
        self.successors(state, symbol).into_iter().flatten()
    }

    /// Returns the union of all symbols over all entries, including epsilon if it occurs.
    pub fn symbols(&self) -> Alphabet {
        self.delta
            .values()
            .flat_map(|entries| entries.keys().copied())
            .collect()
    }

    /// Returns all states that occur in the table, either as source or as successor.
    pub fn states(&self) -> OrderedSet<State> {
        self.delta
            .iter()
            .flat_map(|(source, entries)| {
                std::iter::once(source).chain(entries.values().flatten())
            })
            .cloned()
            .collect()
    }

    /// Returns an iterator over all transitions `(p, a, q)`.
    pub fn transitions(&self) -> impl Iterator<Item = (&'_ State, &'_ Symbol, &'_ State)> + '_ {
        self.delta.iter().flat_map(|(source, entries)| {
            entries.iter().flat_map(move |(symbol, targets)| {
                targets.iter().map(move |target| (source, symbol, target))
            })
        })
    }

    /// Returns the number of transitions.
    pub fn size(&self) -> usize {
        self.transitions().count()
    }

    /// Returns true if the table has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.delta.is_empty()
    }

    /// Returns true if the table has no epsilon transitions and at most one successor for
    /// every entry.
    pub fn is_deterministic(&self) -> bool {
        self.check_deterministic().is_ok()
    }

    /// Verifies that the table can back a DFA and reports the first entry that violates it.
    pub(crate) fn check_deterministic(&self) -> Result<(), ConstructionError> {
        for (state, entries) in &self.delta {
            for (symbol, successors) in entries {
                if successors.is_empty() {
                    continue;
                }
                if symbol.is_epsilon() {
                    trace!("found epsilon transition from {state}");
                    return Err(ConstructionError::EpsilonInDfa {
                        state: state.clone(),
                    });
                }
                if successors.len() > 1 {
                    trace!("found {} successors of {state} on {symbol}", successors.len());
                    return Err(ConstructionError::Nondeterministic {
                        state: state.clone(),
                        symbol: *symbol,
                        successors: successors.clone().into(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl<P, S, Q> FromIterator<(P, S, Q)> for TransitionTable
where
    P: Into<State>,
    S: Into<Symbol>,
    Q: Into<State>,
{
    fn from_iter<T: IntoIterator<Item = (P, S, Q)>>(iter: T) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<P, S, Q> Extend<(P, S, Q)> for TransitionTable
where
    P: Into<State>,
    S: Into<Symbol>,
    Q: Into<State>,
{
    fn extend<T: IntoIterator<Item = (P, S, Q)>>(&mut self, iter: T) {
        for (from, on, to) in iter {
            self.add_transition(from, on, to);
        }
    }
}
