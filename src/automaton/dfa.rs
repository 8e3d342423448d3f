use tracing::trace;

use crate::{
    alphabet::Symbol,
    error::ConstructionError,
    grammar::{Production, RegularGrammar},
    math::{Map, OrderedSet},
    state::State,
    transition_table::TransitionTable,
};

use super::{check_state_kinds, FiniteAutomaton, NFA};

/// The result of running a word in a [`DFA`]. A missing transition is not an error, the run simply
/// ends in [`Outcome::Rejected`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome<'a> {
    /// The whole word was consumed and the run ended in the given state.
    Reached(&'a State),
    /// The run got stuck on a symbol for which no transition exists.
    Rejected,
}

impl<'a> Outcome<'a> {
    /// Returns the reached state, if any.
    pub fn state(&self) -> Option<&'a State> {
        match *self {
            Outcome::Reached(state) => Some(state),
            Outcome::Rejected => None,
        }
    }

    /// Returns true if the run got stuck.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected)
    }
}

/// A deterministic finite automaton (DFA). Its transition table has no epsilon transitions and at
/// most one successor for every state and symbol. It accepts a finite word if the run on it
/// reaches an accepting state.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DFA {
    table: TransitionTable,
    initial: State,
    accepting: OrderedSet<State>,
}

impl DFA {
    /// Creates a new DFA, failing if `table` is not deterministic or if the states are not all of
    /// the same kind as `initial`.
    pub fn new<I>(
        table: TransitionTable,
        initial: State,
        accepting: I,
    ) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = State>,
    {
        let accepting: OrderedSet<State> = accepting.into_iter().collect();
        table.check_deterministic()?;
        check_state_kinds(&table, &initial, &accepting)?;
        Ok(Self::from_parts(table, initial, accepting))
    }

    /// Assembles a DFA from parts that are known to be consistent.
    pub(crate) fn from_parts(
        table: TransitionTable,
        initial: State,
        accepting: OrderedSet<State>,
    ) -> Self {
        debug_assert!(table.is_deterministic());
        Self {
            table,
            initial,
            accepting,
        }
    }

    /// Returns the unique successor of `state` on `symbol`.
    pub fn successor(&self, state: &State, symbol: char) -> Option<&State> {
        self.table
            .successors(state, &Symbol::Char(symbol))
            .and_then(|successors| successors.first())
    }

    /// Runs `input` starting in `start`. If some symbol cannot be read, the run stops right there
    /// and [`Outcome::Rejected`] is returned.
    pub fn compute<'a>(&'a self, start: &'a State, input: &str) -> Outcome<'a> {
        let mut current = start;
        for symbol in input.chars() {
            let Some(next) = self.successor(current, symbol) else {
                trace!("no transition from {current} on {symbol}, rejecting");
                return Outcome::Rejected;
            };
            current = next;
        }
        Outcome::Reached(current)
    }

    /// Views `self` as an [`NFA`] whose successor sets all have at most one element.
    pub fn into_nfa(self) -> NFA {
        NFA::from_parts(self.table, self.initial, self.accepting)
    }

    /// Reads off a right-linear grammar. Every transition `p --a--> q` turns into the production
    /// `p -> aq`, and additionally into `p -> a` if `q` is accepting. If the initial state is
    /// accepting, the start symbol also derives `&`.
    ///
    /// The non-terminals are the states of `self` and the start symbol is the initial state. The
    /// result generates the language of `self` but is in no way canonical.
    pub fn to_grammar(&self) -> RegularGrammar {
        let mut productions: Map<State, OrderedSet<Production>> = Map::default();
        for (source, symbol, target) in self.table.transitions() {
            let Some(terminal) = symbol.as_char() else {
                continue;
            };
            let rhs = productions.entry(source.clone()).or_default();
            rhs.insert(Production::Step(terminal, target.clone()));
            if self.is_accepting(target) {
                rhs.insert(Production::Terminal(terminal));
            }
        }
        if self.is_accepting(&self.initial) {
            productions
                .entry(self.initial.clone())
                .or_default()
                .insert(Production::Epsilon);
        }

        let terminals = self
            .alphabet()
            .into_iter()
            .filter_map(|symbol| symbol.as_char())
            .collect();
        trace!(
            "read off {} productions from DFA",
            productions.values().map(|rhs| rhs.len()).sum::<usize>()
        );
        RegularGrammar::from_parts(self.states(), terminals, self.initial.clone(), productions)
    }
}

impl FiniteAutomaton for DFA {
    fn table(&self) -> &TransitionTable {
        &self.table
    }

    fn initial(&self) -> &State {
        &self.initial
    }

    fn accepting(&self) -> &OrderedSet<State> {
        &self.accepting
    }

    fn validate(&self, input: &str) -> bool {
        self.compute(&self.initial, input)
            .state()
            .is_some_and(|state| self.accepting.contains(state))
    }
}
