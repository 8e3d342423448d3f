//! Library for working with regular languages through finite automata and right-linear grammars.
//!
//! An automaton consists of a [`TransitionTable`] together with an initial state and a set of
//! accepting states. The table maps every state to a map from symbols to sets of successor states,
//! and one reserved symbol ([`Symbol::Epsilon`]) labels spontaneous transitions that consume no
//! input. A [`DFA`] guarantees at most one successor for every state and symbol, while an [`NFA`]
//! may have arbitrarily many and may contain epsilon transitions. Both implement
//! [`FiniteAutomaton`], which provides acceptance of words as well as the alphabet and the states.
//!
//! The central algorithm is [`NFA::determinization`], the subset construction. The states of the
//! resulting DFA are composite [`State`]s, each of which packages an epsilon-closed set of states
//! of the NFA. Two composite states are equal if and only if they package the same set.
//!
//! Finally, a [`RegularGrammar`] can be converted into an automaton, where every production
//! `A -> aB` becomes a transition and every production `A -> a` leads into an accepting sink.
//! In the other direction, [`DFA::to_grammar`] reads off the productions from the transitions.
//!
//! ```
//! use regular_sets::prelude::*;
//!
//! let nfa = TableBuilder::default()
//!     .with_transitions([
//!         ("q0", 'a', "q1"),
//!         ("q0", 'a', "q2"),
//!         ("q1", 'a', "q1"),
//!         ("q2", 'b', "q3"),
//!         ("q3", 'a', "q2"),
//!     ])
//!     .with_accepting(["q1", "q3"])
//!     .into_nfa("q0")
//!     .unwrap();
//! let dfa = nfa.determinization();
//! assert!(dfa.validate("ababab"));
//! assert!(!dfa.validate("aaabab"));
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use regular_sets::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, Symbol},
        automaton::{FiniteAutomaton, Outcome, DFA, NFA},
        error::ConstructionError,
        grammar::{GrammarConversion, Production, RegularGrammar},
        math,
        math::OrderedSet,
        state::{State, StateKind, StateSet},
        transition_table::{TableBuilder, TransitionTable},
    };
}

/// This module contains the set and map types which are used throughout the crate.
pub mod math;

/// Module that contains definitions for dealing with symbols and alphabets.
pub mod alphabet;
pub use alphabet::Symbol;

/// Defines the identifiers of states, which are either atomic or composite.
pub mod state;
pub use state::State;

/// Contains the error that is raised when assembling malformed automata or grammars.
pub mod error;
pub use error::ConstructionError;

/// Defines the transition relation that backs every automaton.
pub mod transition_table;
pub use transition_table::TransitionTable;

/// Defines deterministic and nondeterministic finite automata as well as the subset construction.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;
pub use automaton::{FiniteAutomaton, DFA, NFA};

/// Defines right-linear grammars and their conversion into automata.
pub mod grammar;
pub use grammar::RegularGrammar;
