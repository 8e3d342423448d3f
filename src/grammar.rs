use std::fmt::Display;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    alphabet::Symbol,
    automaton::{DFA, NFA},
    error::ConstructionError,
    math::{Map, OrderedSet},
    state::{State, StateKind},
    transition_table::TransitionTable,
};

/// The right-hand side of a production of a right-linear grammar.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Production {
    /// A single terminal, `A -> a`.
    Terminal(char),
    /// A terminal followed by a non-terminal, `A -> aB`.
    Step(char, State),
    /// The empty word, `A -> &`.
    Epsilon,
}

impl Production {
    /// Creates the production `a` for the given terminal.
    pub fn terminal(terminal: char) -> Self {
        Production::Terminal(terminal)
    }

    /// Creates the production `aB` for the given terminal and non-terminal.
    pub fn step<S: Into<State>>(terminal: char, non_terminal: S) -> Self {
        Production::Step(terminal, non_terminal.into())
    }

    /// Returns the terminal of the production, if it has one.
    pub fn terminal_symbol(&self) -> Option<char> {
        match self {
            Production::Terminal(a) | Production::Step(a, _) => Some(*a),
            Production::Epsilon => None,
        }
    }

    /// Returns the trailing non-terminal of the production, if it has one.
    pub fn non_terminal(&self) -> Option<&State> {
        match self {
            Production::Step(_, q) => Some(q),
            _ => None,
        }
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Production::Terminal(a) => write!(f, "{a}"),
            Production::Step(a, q) => write!(f, "{a}{q}"),
            Production::Epsilon => write!(f, "{}", Symbol::Epsilon),
        }
    }
}

/// Options for turning a [`RegularGrammar`] into an automaton.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GrammarConversion {
    /// Name of the accepting sink state that every production `A -> a` leads to. If a
    /// non-terminal already has this name, `'` is appended until the name is fresh.
    pub sink: String,
    /// Whether a non-terminal `A` with the production `A -> &` is made accepting. Without this,
    /// epsilon productions are dropped and the sink is the only accepting state.
    pub epsilon_accepts: bool,
}

impl Default for GrammarConversion {
    fn default() -> Self {
        Self {
            sink: "qAccept".to_string(),
            epsilon_accepts: true,
        }
    }
}

/// A right-linear grammar, consisting of non-terminals, terminals, a start symbol and productions
/// of the forms `A -> aB`, `A -> a` and `A -> &`. Non-terminals are [`State`]s, so that a grammar
/// can be read off an automaton and turned back into one without renaming anything.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RegularGrammar {
    non_terminals: OrderedSet<State>,
    terminals: OrderedSet<char>,
    start: State,
    productions: Map<State, OrderedSet<Production>>,
}

impl RegularGrammar {
    /// Creates a new grammar. Fails if the start symbol or some non-terminal used in a production
    /// is not declared, or if a production uses an undeclared terminal.
    ///
    /// # Example
    /// ```
    /// use regular_sets::prelude::*;
    ///
    /// // S -> aA | a, A -> aA | a
    /// let grammar = RegularGrammar::new(
    ///     ["S", "A"],
    ///     ['a'],
    ///     "S",
    ///     [
    ///         ("S", vec![Production::step('a', "A"), Production::terminal('a')]),
    ///         ("A", vec![Production::step('a', "A"), Production::terminal('a')]),
    ///     ],
    /// )
    /// .unwrap();
    /// assert!(grammar.to_nfa().validate("aaa"));
    /// ```
    pub fn new<N, S, T, P, R>(
        non_terminals: N,
        terminals: T,
        start: S,
        productions: P,
    ) -> Result<Self, ConstructionError>
    where
        N: IntoIterator,
        N::Item: Into<State>,
        S: Into<State>,
        T: IntoIterator<Item = char>,
        P: IntoIterator<Item = (S, R)>,
        R: IntoIterator<Item = Production>,
    {
        let non_terminals: OrderedSet<State> = non_terminals.into_iter().map(Into::into).collect();
        let terminals: OrderedSet<char> = terminals.into_iter().collect();
        let start = start.into();
        if !non_terminals.contains(&start) {
            return Err(ConstructionError::UndeclaredStartSymbol(start));
        }

        let mut collected: Map<State, OrderedSet<Production>> = Map::default();
        for (lhs, rhs) in productions {
            let lhs = lhs.into();
            if !non_terminals.contains(&lhs) {
                return Err(ConstructionError::UndeclaredNonTerminal(lhs));
            }
            let entry = collected.entry(lhs).or_default();
            for production in rhs {
                if let Some(a) = production.terminal_symbol() {
                    if !terminals.contains(&a) {
                        return Err(ConstructionError::UndeclaredTerminal(a));
                    }
                }
                if let Some(q) = production.non_terminal() {
                    if !non_terminals.contains(q) {
                        return Err(ConstructionError::UndeclaredNonTerminal(q.clone()));
                    }
                }
                entry.insert(production);
            }
        }

        Ok(Self::from_parts(non_terminals, terminals, start, collected))
    }

    pub(crate) fn from_parts(
        non_terminals: OrderedSet<State>,
        terminals: OrderedSet<char>,
        start: State,
        productions: Map<State, OrderedSet<Production>>,
    ) -> Self {
        Self {
            non_terminals,
            terminals,
            start,
            productions,
        }
    }

    /// Reads off a grammar from `dfa`, see [`DFA::to_grammar`].
    pub fn from_dfa(dfa: &DFA) -> Self {
        dfa.to_grammar()
    }

    /// Returns the set of non-terminals.
    pub fn non_terminals(&self) -> &OrderedSet<State> {
        &self.non_terminals
    }

    /// Returns the set of terminals.
    pub fn terminals(&self) -> &OrderedSet<char> {
        &self.terminals
    }

    /// Returns the start symbol.
    pub fn start(&self) -> &State {
        &self.start
    }

    /// Returns the right-hand sides of all productions of `non_terminal`.
    pub fn productions_of(&self, non_terminal: &State) -> Option<&OrderedSet<Production>> {
        self.productions.get(non_terminal)
    }

    /// Returns an iterator over all productions as pairs of left- and right-hand side.
    pub fn productions(&self) -> impl Iterator<Item = (&'_ State, &'_ Production)> + '_ {
        self.productions
            .iter()
            .flat_map(|(lhs, rhs)| rhs.iter().map(move |production| (lhs, production)))
    }

    /// Returns true if `non_terminal` has the production `non_terminal -> &`.
    pub fn derives_epsilon(&self, non_terminal: &State) -> bool {
        self.productions_of(non_terminal)
            .is_some_and(|rhs| rhs.contains(&Production::Epsilon))
    }

    /// Picks the sink state for a conversion. It has the same kind as the start symbol and does
    /// not clash with any non-terminal.
    fn sink(&self, options: &GrammarConversion) -> State {
        let mut name = options.sink.clone();
        loop {
            let candidate = match self.start.kind() {
                StateKind::Atomic => State::atomic(name.as_str()),
                StateKind::Composite => State::composite([name.as_str()]),
            };
            if !self.non_terminals.contains(&candidate) {
                return candidate;
            }
            name.push('\'');
        }
    }

    /// Converts `self` into a transition table with the default [`GrammarConversion`].
    pub fn to_automaton(&self) -> TransitionTable {
        self.to_automaton_with(&GrammarConversion::default()).0
    }

    /// Converts `self` into a transition table and returns it along with the sink state. A
    /// production `A -> aB` becomes the transition `A --a--> B`, and a production `A -> a`
    /// becomes `A --a--> sink`. Epsilon productions yield no transition.
    pub fn to_automaton_with(&self, options: &GrammarConversion) -> (TransitionTable, State) {
        let sink = self.sink(options);
        let mut table = TransitionTable::new();
        for non_terminal in &self.non_terminals {
            table.add_state(non_terminal.clone());
        }
        table.add_state(sink.clone());

        for (lhs, production) in self.productions() {
            match production {
                Production::Step(a, q) => {
                    table.add_transition(lhs.clone(), *a, q.clone());
                }
                Production::Terminal(a) => {
                    table.add_transition(lhs.clone(), *a, sink.clone());
                }
                Production::Epsilon => {
                    trace!("epsilon production of {lhs} yields no transition");
                }
            }
        }
        debug!("grammar converted into {} transitions", table.size());
        (table, sink)
    }

    /// Converts `self` into an [`NFA`] with the default [`GrammarConversion`].
    pub fn to_nfa(&self) -> NFA {
        self.to_nfa_with(&GrammarConversion::default())
    }

    /// Converts `self` into an [`NFA`]. The initial state is the start symbol and the sink is
    /// accepting. If `options.epsilon_accepts` is set, every non-terminal deriving `&` is
    /// accepting as well.
    pub fn to_nfa_with(&self, options: &GrammarConversion) -> NFA {
        let (table, sink) = self.to_automaton_with(options);
        let mut accepting = OrderedSet::from([sink]);
        if options.epsilon_accepts {
            accepting.extend(
                self.non_terminals
                    .iter()
                    .filter(|q| self.derives_epsilon(q))
                    .cloned(),
            );
        }
        NFA::from_parts(table, self.start.clone(), accepting)
    }
}

impl Display for RegularGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let order = std::iter::once(&self.start)
            .chain(self.non_terminals.iter().filter(|q| *q != &self.start));
        let mut lines = order.filter_map(|lhs| {
            let rhs = self.productions_of(lhs)?;
            if rhs.is_empty() {
                return None;
            }
            Some(format!("{lhs} -> {}", rhs.iter().join(" | ")))
        });
        write!(f, "{}", lines.join("\n"))
    }
}

impl From<&RegularGrammar> for NFA {
    fn from(value: &RegularGrammar) -> Self {
        value.to_nfa()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// S1 -> aA | a, A -> aA | a
    fn plus_a() -> RegularGrammar {
        RegularGrammar::new(
            ["S1", "A"],
            ['a'],
            "S1",
            [
                ("S1", vec![Production::step('a', "A"), Production::terminal('a')]),
                ("A", vec![Production::step('a', "A"), Production::terminal('a')]),
            ],
        )
        .unwrap()
    }

    #[test_log::test]
    fn to_automaton_adds_sink() {
        let table = plus_a().to_automaton();
        let sink = State::from("qAccept");
        assert_eq!(
            table.successors(&"S1".into(), &'a'.into()),
            Some(&OrderedSet::from([State::from("A"), sink.clone()]))
        );
        assert!(table.states().contains(&sink));
        assert_eq!(table.size(), 4);
    }

    #[test_log::test]
    fn round_trip_preserves_language() {
        let grammar = plus_a();
        let nfa = grammar.to_nfa();
        assert_eq!(nfa.accepting(), &OrderedSet::from([State::from("qAccept")]));

        let dfa = nfa.determinization();
        let back = dfa.to_grammar().to_nfa();
        let automata: [&dyn FiniteAutomaton; 3] = [&nfa, &dfa, &back];
        for automaton in automata {
            assert!(automaton.validate("a"));
            assert!(automaton.validate("aa"));
            assert!(automaton.validate("aaa"));
            assert!(!automaton.validate(""));
            assert!(!automaton.validate("ab"));
        }
    }

    #[test_log::test]
    fn epsilon_production_accepts_empty_word() {
        let grammar = RegularGrammar::new(
            ["S"],
            ['a'],
            "S",
            [("S", vec![Production::step('a', "S"), Production::Epsilon])],
        )
        .unwrap();

        let nfa = grammar.to_nfa();
        assert!(nfa.validate(""));
        assert!(nfa.validate("aaa"));

        let strict = grammar.to_nfa_with(&GrammarConversion {
            epsilon_accepts: false,
            ..Default::default()
        });
        assert!(!strict.validate(""));
        assert!(!strict.validate("aaa"));
    }

    #[test_log::test]
    fn sink_name_is_fresh() {
        let grammar = RegularGrammar::new(
            ["S", "qAccept"],
            ['a'],
            "S",
            [
                ("S", vec![Production::terminal('a')]),
                ("qAccept", vec![Production::step('a', "S")]),
            ],
        )
        .unwrap();
        let (table, sink) = grammar.to_automaton_with(&GrammarConversion::default());
        assert_eq!(sink, State::from("qAccept'"));
        assert!(table.successors(&"S".into(), &'a'.into()).unwrap().contains(&sink));
    }

    #[test_log::test]
    fn undeclared_symbols_are_rejected() {
        let no_productions: Vec<(&str, Vec<Production>)> = Vec::new();
        let missing_start = RegularGrammar::new(["A"], ['a'], "S", no_productions);
        assert_eq!(
            missing_start.unwrap_err(),
            ConstructionError::UndeclaredStartSymbol("S".into())
        );

        let missing_terminal =
            RegularGrammar::new(["S"], ['a'], "S", [("S", vec![Production::terminal('b')])]);
        assert_eq!(
            missing_terminal.unwrap_err(),
            ConstructionError::UndeclaredTerminal('b')
        );

        let missing_non_terminal =
            RegularGrammar::new(["S"], ['a'], "S", [("S", vec![Production::step('a', "B")])]);
        assert_eq!(
            missing_non_terminal.unwrap_err(),
            ConstructionError::UndeclaredNonTerminal("B".into())
        );
    }

    #[test_log::test]
    fn display_lists_start_first() {
        assert_eq!(plus_a().to_string(), "S1 -> a | aA\nA -> a | aA");
    }
}
