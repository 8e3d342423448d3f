use std::collections::BTreeSet;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Type alias for sets whose iteration order is fixed by the ordering of the elements. Sets of
/// successor states use this, so that two sets with the same members are equal and hash alike
/// no matter in which order the members were added.
pub type OrderedSet<S> = BTreeSet<S>;
