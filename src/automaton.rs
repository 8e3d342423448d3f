use crate::{
    alphabet::Alphabet,
    error::ConstructionError,
    math::OrderedSet,
    state::State,
    transition_table::TransitionTable,
};

mod dfa;
pub use dfa::{Outcome, DFA};

mod nfa;
pub use nfa::NFA;

mod subset;

/// The capabilities that deterministic and nondeterministic automata have in common. An automaton
/// consists of a [`TransitionTable`] together with an initial state and a set of accepting states.
///
/// The two implementors, [`DFA`] and [`NFA`], differ in how they run a word: a [`DFA`] reaches a
/// single state (or rejects), while an [`NFA`] reaches a set of states. This is why running a word
/// is not part of this trait, only deciding acceptance is.
pub trait FiniteAutomaton {
    /// Returns the underlying transition table.
    fn table(&self) -> &TransitionTable;

    /// Returns the initial state.
    fn initial(&self) -> &State;

    /// Returns the set of accepting states.
    fn accepting(&self) -> &OrderedSet<State>;

    /// Decides whether `input` is accepted, every `char` of the input is consumed as one symbol.
    fn validate(&self, input: &str) -> bool;

    /// Returns true if `state` is accepting.
    fn is_accepting(&self, state: &State) -> bool {
        self.accepting().contains(state)
    }

    /// Returns the symbols labelling the transitions of `self`, without epsilon.
    fn alphabet(&self) -> Alphabet {
        self.table()
            .symbols()
            .into_iter()
            .filter(|symbol| !symbol.is_epsilon())
            .collect()
    }

    /// Returns the initial state together with all states that occur in the table.
    fn states(&self) -> OrderedSet<State> {
        let mut states = self.table().states();
        states.insert(self.initial().clone());
        states
    }
}

/// Verifies that all states of an automaton are drawn from the identifier space of its
/// initial state.
pub(crate) fn check_state_kinds<'a, I>(
    table: &TransitionTable,
    initial: &State,
    accepting: I,
) -> Result<(), ConstructionError>
where
    I: IntoIterator<Item = &'a State>,
{
    let expected = initial.kind();
    let found = table
        .states()
        .into_iter()
        .find(|state| state.kind() != expected)
        .or_else(|| {
            accepting
                .into_iter()
                .find(|state| state.kind() != expected)
                .cloned()
        });
    match found {
        Some(found) => Err(ConstructionError::MixedStateKinds { expected, found }),
        None => Ok(()),
    }
}
