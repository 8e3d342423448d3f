use thiserror::Error;

use crate::{
    alphabet::Symbol,
    state::{State, StateKind, StateSet},
};

/// Errors that are raised when an automaton or a grammar is assembled from malformed parts.
/// Running an automaton never fails, a word that is not accepted is simply rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The automaton mixes atomic and composite states.
    #[error("state {found} is {}, but the automaton uses {expected} states", found.kind())]
    MixedStateKinds {
        /// Kind of the initial state, which every other state has to share.
        expected: StateKind,
        /// The first state of a different kind.
        found: State,
    },
    /// A transition table that should be deterministic has multiple successors for one entry.
    #[error("state {state} has {successors} as successors on {symbol}, a DFA allows at most one")]
    Nondeterministic {
        /// Source of the offending entry.
        state: State,
        /// Symbol of the offending entry.
        symbol: Symbol,
        /// All successors recorded for the entry.
        successors: StateSet,
    },
    /// A transition table that should be deterministic has an epsilon transition.
    #[error("state {state} has an epsilon transition, which a DFA cannot have")]
    EpsilonInDfa {
        /// Source of the epsilon transition.
        state: State,
    },
    /// The start symbol of a grammar is not one of its non-terminals.
    #[error("start symbol {0} is not a declared non-terminal")]
    UndeclaredStartSymbol(State),
    /// A production refers to a non-terminal that was not declared.
    #[error("non-terminal {0} is used in a production but not declared")]
    UndeclaredNonTerminal(State),
    /// A production refers to a terminal that was not declared.
    #[error("terminal {0} is used in a production but not declared")]
    UndeclaredTerminal(char),
}
