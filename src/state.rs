use std::fmt::Display;

use itertools::Itertools;

use crate::math::OrderedSet;

/// Identifies a state of an automaton and doubles as a non-terminal of a regular grammar.
///
/// There are two kinds of states. An [`State::Atomic`] state is given by its name, this is what
/// hand-built automata and grammars use. A [`State::Composite`] state packages a set of states
/// and is produced by the subset construction. The identity of a composite state is exactly its
/// member set, so `{q1, q2}` and `{q2, q1}` are the same state.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum State {
    /// A state that is identified by its name.
    Atomic(String),
    /// A state that stands for a set of other states.
    Composite(StateSet),
}

/// The two identifier spaces a [`State`] can be drawn from.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub enum StateKind {
    /// See [`State::Atomic`].
    Atomic,
    /// See [`State::Composite`].
    Composite,
}

impl Display for StateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateKind::Atomic => write!(f, "atomic"),
            StateKind::Composite => write!(f, "composite"),
        }
    }
}

impl State {
    /// Creates an atomic state with the given name.
    pub fn atomic<S: Into<String>>(name: S) -> Self {
        State::Atomic(name.into())
    }

    /// Creates a composite state packaging the given states.
    pub fn composite<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        State::Composite(members.into_iter().map(Into::into).collect())
    }

    /// Returns the kind of identifier `self` is.
    pub fn kind(&self) -> StateKind {
        match self {
            State::Atomic(_) => StateKind::Atomic,
            State::Composite(_) => StateKind::Composite,
        }
    }

    /// Returns the member set if `self` is composite.
    pub fn members(&self) -> Option<&StateSet> {
        match self {
            State::Atomic(_) => None,
            State::Composite(set) => Some(set),
        }
    }
}

impl From<&str> for State {
    fn from(value: &str) -> Self {
        State::Atomic(value.to_string())
    }
}

impl From<String> for State {
    fn from(value: String) -> Self {
        State::Atomic(value)
    }
}

impl From<StateSet> for State {
    fn from(value: StateSet) -> Self {
        State::Composite(value)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            State::Atomic(name) => write!(f, "{name}"),
            State::Composite(set) => write!(f, "{set}"),
        }
    }
}

/// An immutable set of states with structural equality. This is the identity of a composite
/// [`State`], so it is ordered and hashable and can be used as a key in maps.
#[derive(Clone, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct StateSet(OrderedSet<State>);

impl StateSet {
    /// Returns an iterator over the members in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &'_ State> + '_ {
        self.0.iter()
    }

    /// Returns true if `state` is a member of `self`.
    pub fn contains(&self, state: &State) -> bool {
        self.0.contains(state)
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if `self` has no members.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<OrderedSet<State>> for StateSet {
    fn from(value: OrderedSet<State>) -> Self {
        Self(value)
    }
}

impl FromIterator<State> for StateSet {
    fn from_iter<T: IntoIterator<Item = State>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for StateSet {
    type Item = State;
    type IntoIter = std::collections::btree_set::IntoIter<State>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a State;
    type IntoIter = std::collections::btree_set::Iter<'a, State>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "∅")
        } else {
            write!(f, "{{{}}}", self.0.iter().join(", "))
        }
    }
}
