use std::fmt::Display;

use crate::math::OrderedSet;

/// A symbol that labels a transition. Apart from the ordinary symbols, which are just a single
/// `char`, there is the reserved [`Symbol::Epsilon`] which labels spontaneous transitions that do
/// not consume any input.
///
/// Symbols are written the way regular grammars are written down textually, where `&` stands
/// for the empty word. Note that `Symbol::Char('&')` is still an ordinary symbol, constructing the
/// epsilon symbol is only possible through the variant itself.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Symbol {
    /// An ordinary symbol that consumes one `char` of the input.
    Char(char),
    /// The reserved symbol of spontaneous transitions.
    Epsilon,
}

impl Symbol {
    /// Returns true if and only if `self` is the reserved epsilon symbol.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Returns the `char` that is consumed by `self`, or `None` for epsilon.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Symbol::Char(c) => Some(*c),
            Symbol::Epsilon => None,
        }
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Symbol::Char(value)
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{c}"),
            Symbol::Epsilon => write!(f, "&"),
        }
    }
}

/// The alphabet of an automaton, which is the set of all symbols labelling its transitions.
/// An ordered set is used so that iterating over the alphabet is reproducible.
pub type Alphabet = OrderedSet<Symbol>;
