//! Finite, ordered alphabets.
//!
//! Every construction that needs "all symbols" (negated classes, `.`) works
//! against an explicit alphabet supplied by the caller; there is no implicit
//! ASCII or Unicode default.

use indexmap::IndexSet;
use std::hash::Hash;

/// A deduplicated set of symbols that remembers insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet<Sym: Hash + Eq> {
    symbols: IndexSet<Sym>,
}

impl<Sym: Hash + Eq> Alphabet<Sym> {
    /// Check whether `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: &Sym) -> bool {
        self.symbols.contains(symbol)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Sym> {
        self.symbols.iter()
    }
}

impl<Sym: Hash + Eq> FromIterator<Sym> for Alphabet<Sym> {
    fn from_iter<I: IntoIterator<Item = Sym>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}

impl<'a, Sym: Hash + Eq + Clone + 'a> From<&'a [Sym]> for Alphabet<Sym> {
    fn from(symbols: &'a [Sym]) -> Self {
        symbols.iter().cloned().collect()
    }
}

impl From<&str> for Alphabet<char> {
    fn from(symbols: &str) -> Self {
        symbols.chars().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_order() {
        let alphabet: Alphabet<char> = "abcab".into();
        assert_eq!(alphabet.len(), 3);
        assert_eq!(alphabet.iter().copied().collect::<String>(), "abc");
        assert!(!alphabet.contains(&'z'));
    }

    #[test]
    fn test_from_slice() {
        let alphabet = Alphabet::from(&["x", "y"][..]);
        assert!(alphabet.contains(&"x"));
        assert!(!alphabet.is_empty());
    }
}
