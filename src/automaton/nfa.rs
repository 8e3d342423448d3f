use std::collections::VecDeque;

use tracing::trace;

use crate::{
    alphabet::{Alphabet, Symbol},
    error::ConstructionError,
    grammar::RegularGrammar,
    math::OrderedSet,
    state::State,
    transition_table::TransitionTable,
};

use super::{check_state_kinds, FiniteAutomaton, DFA};

/// A nondeterministic finite automaton (NFA). A state may have any number of successors on a
/// symbol, and the table may contain epsilon transitions.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NFA {
    table: TransitionTable,
    initial: State,
    accepting: OrderedSet<State>,
}

impl NFA {
    /// Creates a new NFA, failing if the states are not all of the same kind as `initial`.
    pub fn new<I>(
        table: TransitionTable,
        initial: State,
        accepting: I,
    ) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = State>,
    {
        let accepting: OrderedSet<State> = accepting.into_iter().collect();
        check_state_kinds(&table, &initial, &accepting)?;
        Ok(Self::from_parts(table, initial, accepting))
    }

    pub(crate) fn from_parts(
        table: TransitionTable,
        initial: State,
        accepting: OrderedSet<State>,
    ) -> Self {
        Self {
            table,
            initial,
            accepting,
        }
    }

    /// Builds the NFA of a regular grammar, see [`RegularGrammar::to_nfa`].
    pub fn from_grammar(grammar: &RegularGrammar) -> Self {
        grammar.to_nfa()
    }

    /// Runs `input` starting in `start` and returns the set of states in which some run ends.
    /// Only transitions on the symbols of `input` are taken, epsilon transitions are **not**
    /// followed. An empty set means that no run survives.
    pub fn compute(&self, start: &State, input: &str) -> OrderedSet<State> {
        let mut current = OrderedSet::from([start.clone()]);
        for symbol in input.chars().map(Symbol::Char) {
            current = current
                .iter()
                .flat_map(|state| self.table.successors_iter(state, &symbol))
                .cloned()
                .collect();
            if current.is_empty() {
                trace!("no run survives {symbol}");
                break;
            }
        }
        current
    }

    /// Runs `input` starting in `start`, taking the epsilon closure before the first symbol and
    /// after every symbol. This gives the usual semantics of an NFA with epsilon transitions.
    pub fn compute_closed(&self, start: &State, input: &str) -> OrderedSet<State> {
        let mut current = self.epsilon_closure(start);
        for symbol in input.chars().map(Symbol::Char) {
            let moved: Vec<&State> = current
                .iter()
                .flat_map(|state| self.table.successors_iter(state, &symbol))
                .collect();
            current = self.epsilon_closure_of_set(moved);
            if current.is_empty() {
                break;
            }
        }
        current
    }

    /// Decides acceptance of `input` with epsilon transitions taken into account. For an
    /// epsilon-free NFA this coincides with [`FiniteAutomaton::validate`].
    pub fn accepts(&self, input: &str) -> bool {
        self.compute_closed(&self.initial, input)
            .iter()
            .any(|state| self.accepting.contains(state))
    }

    /// Returns all symbols of the table, including epsilon if some transition carries it.
    pub fn symbols(&self) -> Alphabet {
        self.table.symbols()
    }

    /// Returns true if and only if there is no epsilon transition.
    pub fn is_epsilon_free(&self) -> bool {
        !self.symbols().contains(&Symbol::Epsilon)
    }

    /// Computes the set of states that are reachable from `state` using only epsilon transitions.
    /// The result always contains `state` itself. Epsilon cycles are fine, every state is expanded
    /// at most once.
    pub fn epsilon_closure(&self, state: &State) -> OrderedSet<State> {
        self.epsilon_closure_of_set([state])
    }

    /// Computes the union of the epsilon closures of all given states.
    pub fn epsilon_closure_of_set<'a, I>(&self, states: I) -> OrderedSet<State>
    where
        I: IntoIterator<Item = &'a State>,
    {
        let mut closure: OrderedSet<State> = OrderedSet::new();
        let mut queue: VecDeque<&State> = VecDeque::new();
        for state in states {
            if closure.insert(state.clone()) {
                queue.push_back(state);
            }
        }

        while let Some(state) = queue.pop_front() {
            for next in self.table.successors_iter(state, &Symbol::Epsilon) {
                if closure.insert(next.clone()) {
                    trace!("{next} is epsilon reachable from {state}");
                    queue.push_back(next);
                }
            }
        }
        closure
    }

    /// Converts `self` into an equivalent [`DFA`] through the subset construction. The states of
    /// the result are composite states, each packaging a set of states of `self` that is closed
    /// under epsilon transitions. `self` is left untouched.
    pub fn determinization(&self) -> DFA {
        super::subset::subset_construction(self)
    }
}

impl FiniteAutomaton for NFA {
    fn table(&self) -> &TransitionTable {
        &self.table
    }

    fn initial(&self) -> &State {
        &self.initial
    }

    fn accepting(&self) -> &OrderedSet<State> {
        &self.accepting
    }

    /// Epsilon transitions are not followed, use [`NFA::accepts`] for NFAs that have them.
    fn validate(&self, input: &str) -> bool {
        self.compute(&self.initial, input)
            .iter()
            .any(|state| self.accepting.contains(state))
    }
}

impl From<DFA> for NFA {
    fn from(value: DFA) -> Self {
        value.into_nfa()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn states<const N: usize>(names: [&str; N]) -> OrderedSet<State> {
        OrderedSet::from(names.map(State::from))
    }

    /// Moves spontaneously into two cycles, one reading `a` and one reading `b`.
    fn two_cycles() -> NFA {
        TableBuilder::default()
            .with_epsilon_transitions([("q0", "q1"), ("q0", "q3")])
            .with_transitions([
                ("q1", 'a', "q2"),
                ("q2", 'a', "q1"),
                ("q3", 'b', "q4"),
                ("q4", 'b', "q3"),
            ])
            .with_accepting(["q1", "q3"])
            .into_nfa("q0")
            .unwrap()
    }

    #[test_log::test]
    fn epsilon_closure_follows_epsilon_only() {
        let nfa = two_cycles();
        assert_eq!(nfa.epsilon_closure(&"q0".into()), states(["q0", "q1", "q3"]));
        assert_eq!(nfa.epsilon_closure(&"q2".into()), states(["q2"]));
        assert_eq!(nfa.epsilon_closure(&"unknown".into()), states(["unknown"]));
        assert!(!nfa.is_epsilon_free());
        assert_eq!(nfa.alphabet(), Alphabet::from(['a', 'b'].map(Symbol::from)));
        assert!(nfa.symbols().contains(&Symbol::Epsilon));
    }

    #[test_log::test]
    fn epsilon_closure_is_idempotent() {
        let nfa = TableBuilder::default()
            .with_epsilon_transitions([("q0", "q1"), ("q1", "q2"), ("q2", "q0"), ("q2", "q3")])
            .with_transitions([("q3", 'a', "q0")])
            .into_nfa("q0")
            .unwrap();

        for state in nfa.states() {
            let closure = nfa.epsilon_closure(&state);
            assert!(closure.contains(&state));
            assert_eq!(nfa.epsilon_closure_of_set(closure.iter()), closure);
        }
        assert_eq!(
            nfa.epsilon_closure(&"q1".into()),
            states(["q0", "q1", "q2", "q3"])
        );
    }

    #[test_log::test]
    fn compute_ignores_epsilon() {
        let nfa = two_cycles();
        assert!(nfa.compute(&"q0".into(), "a").is_empty());
        assert!(!nfa.validate("aa"));
        assert!(!nfa.validate(""));
        assert!(nfa.accepts(""));
        assert_eq!(nfa.compute(&"q1".into(), "a"), states(["q2"]));

        assert!(nfa.accepts("aa"));
        assert!(nfa.accepts("bbbb"));
        assert!(!nfa.accepts("ab"));
        assert!(!nfa.accepts("a"));
    }

    #[test_log::test]
    fn compute_tracks_all_runs() {
        let nfa = TableBuilder::default()
            .with_transitions([
                ("q0", 'a', "q1"),
                ("q0", 'a', "q2"),
                ("q1", 'a', "q1"),
                ("q2", 'b', "q3"),
                ("q3", 'a', "q2"),
            ])
            .with_accepting(["q1", "q3"])
            .into_nfa("q0")
            .unwrap();

        assert!(nfa.is_epsilon_free());
        assert_eq!(nfa.compute(&"q0".into(), "a"), states(["q1", "q2"]));
        assert_eq!(nfa.compute(&"q0".into(), "ab"), states(["q3"]));
        assert!(nfa.compute(&"q0".into(), "abb").is_empty());
        assert!(nfa.validate("aaa"));
        assert!(nfa.validate("ababab"));
        assert!(!nfa.validate("aaabab"));
    }

    #[test_log::test]
    fn accepting_state_outside_table_is_never_reached() {
        let nfa = TableBuilder::default()
            .with_transitions([("q0", 'a', "q0"), ("q0", 'a', "q1")])
            .with_accepting(["q0", "q9"])
            .into_nfa("q0")
            .unwrap();
        let q9 = State::from("q9");

        for word in ["", "a", "aaa", "b"] {
            assert!(!nfa.compute(nfa.initial(), word).contains(&q9));
            assert_eq!(nfa.validate(word), !word.contains('b'), "{word}");
        }

        let dfa = nfa.determinization();
        for state in dfa.states() {
            assert!(!state.members().is_some_and(|members| members.contains(&q9)));
        }
        assert!(dfa.validate("aa"));
        assert!(!dfa.validate("ab"));
    }

    #[test_log::test]
    fn dfa_as_nfa() {
        let dfa = TableBuilder::default()
            .with_transitions([("q0", 'a', "q1"), ("q1", 'b', "q0")])
            .with_accepting(["q0"])
            .into_dfa("q0")
            .unwrap();
        let nfa = NFA::from(dfa.clone());
        for word in ["", "ab", "aba", "abab", "b"] {
            assert_eq!(nfa.validate(word), dfa.validate(word), "{word}");
        }
    }
}
