//! State sets backed by a fixed-size bit set.
//!
//! Used for the rows of Boolean closures and for the set of states a
//! Boolean automaton occupies after reading a word.

use fixedbitset::FixedBitSet;
use std::fmt;

/// A state index, `0..n`.
pub type StateId = usize;

/// A set of states.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// The states `i` with `flags[i] == true`.
    pub fn from_flags(flags: &[bool]) -> Self {
        let mut set = Self::with_capacity(flags.len());
        for (i, _) in flags.iter().enumerate().filter(|(_, f)| **f) {
            set.bits.insert(i);
        }
        set
    }

    /// Characteristic vector of length `n`.
    pub fn to_flags(&self, n: usize) -> Vec<bool> {
        (0..n).map(|i| self.contains(i)).collect()
    }

    /// Insert a state into the set.
    pub fn insert(&mut self, state: StateId) {
        if state >= self.bits.len() {
            self.bits.grow(state + 1);
        }
        self.bits.insert(state);
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        state < self.bits.len() && self.bits.contains(state)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in the set.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones()
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    /// Sorted list of members.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::with_capacity(0);
        for state in iter {
            set.insert(state);
        }
        set
    }
}
