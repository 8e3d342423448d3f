use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    alphabet::Symbol,
    math::{Map, OrderedSet, Set},
    state::{State, StateSet},
    transition_table::TransitionTable,
};

use super::{FiniteAutomaton, DFA, NFA};

/// Performs the subset construction on `nfa`. Every state of the resulting [`DFA`] is a composite
/// state whose members are closed under epsilon transitions, the initial one being the closure of
/// the initial state of `nfa`.
pub(super) fn subset_construction(nfa: &NFA) -> DFA {
    let closures: Map<State, OrderedSet<State>> = nfa
        .states()
        .into_iter()
        .map(|state| {
            let closure = nfa.epsilon_closure(&state);
            (state, closure)
        })
        .collect();
    let symbols: Vec<Symbol> = nfa.alphabet().into_iter().collect();

    let initial = closed(nfa, &closures, [nfa.initial()]);
    let mut table = TransitionTable::new();
    table.add_state(initial.clone());

    let mut discovered: Set<StateSet> = Set::default();
    discovered.insert(initial.clone());
    let mut queue: VecDeque<StateSet> = VecDeque::from([initial.clone()]);

    while let Some(current) = queue.pop_front() {
        for symbol in &symbols {
            let moved: OrderedSet<&State> = current
                .iter()
                .flat_map(|state| nfa.table().successors_iter(state, symbol))
                .collect();
            let target = closed(nfa, &closures, moved);
            if target.is_empty() {
                continue;
            }

            trace!("{current} --{symbol}--> {target}");
            table.add_transition(current.clone(), *symbol, target.clone());
            if discovered.insert(target.clone()) {
                queue.push_back(target);
            }
        }
    }

    let accepting: OrderedSet<State> = discovered
        .iter()
        .filter(|set| set.iter().any(|state| nfa.is_accepting(state)))
        .cloned()
        .map(State::Composite)
        .collect();
    debug!(
        "subset construction discovered {} states, {} of which are accepting",
        discovered.len(),
        accepting.len()
    );

    DFA::from_parts(table, State::Composite(initial), accepting)
}

/// Collects the epsilon closures of `states` into one set, using the precomputed closures where
/// they exist.
fn closed<'a, I>(nfa: &NFA, closures: &Map<State, OrderedSet<State>>, states: I) -> StateSet
where
    I: IntoIterator<Item = &'a State>,
{
    let mut out = OrderedSet::new();
    for state in states {
        match closures.get(state) {
            Some(closure) => out.extend(closure.iter().cloned()),
            None => out.extend(nfa.epsilon_closure(state)),
        }
    }
    StateSet::from(out)
}
