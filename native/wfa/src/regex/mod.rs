//! Regular expressions compiled to Boolean weighted automata.
//!
//! The pipeline is [`parse`] → [`build_nfa`] → [`eliminate_epsilons`]. The
//! matcher is a pure finite automaton: no captures, no backreferences, no
//! anchors. Patterns are interpreted over an explicit, finite alphabet of
//! `char`s; negated classes and `.` range over exactly that alphabet.

pub mod ast;
mod compile;
mod parser;
mod thompson;

pub use ast::{CharSet, Node, NodeId, RegexAst};
pub use compile::eliminate_epsilons;
pub use parser::{parse, parse_with_options};
pub use thompson::{Nfa, build_nfa};

use crate::alphabet::Alphabet;
use crate::automaton::WeightedAutomaton;
use crate::error::{Error, LookupError};
use crate::semiring::BoolSemiring;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegexOptions {
    /// Maximum depth of nested groups. Bounds the parser's recursion.
    pub max_nesting: usize,
}

impl Default for RegexOptions {
    fn default() -> Self {
        Self { max_nesting: 256 }
    }
}

impl RegexOptions {
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }
}

/// Compile `pattern` over `alphabet` into a Boolean automaton recognising
/// exactly the pattern's language.
pub fn compile_regex_to_wa(
    pattern: &str,
    alphabet: &[char],
) -> Result<WeightedAutomaton<BoolSemiring, char>, Error> {
    compile_regex_with_options(pattern, &Alphabet::from(alphabet), &RegexOptions::default())
}

/// [`compile_regex_to_wa`] with explicit parser options.
pub fn compile_regex_with_options(
    pattern: &str,
    alphabet: &Alphabet<char>,
    options: &RegexOptions,
) -> Result<WeightedAutomaton<BoolSemiring, char>, Error> {
    let ast = parse_with_options(pattern, options)?;
    let nfa = build_nfa(&ast, alphabet);
    Ok(eliminate_epsilons(&nfa)?)
}

/// A compiled pattern.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    automaton: WeightedAutomaton<BoolSemiring, char>,
}

impl Regex {
    /// Compile `pattern` over `alphabet`.
    pub fn new(pattern: &str, alphabet: &[char]) -> Result<Self, Error> {
        Self::with_options(pattern, &Alphabet::from(alphabet), &RegexOptions::default())
    }

    pub fn with_options(
        pattern: &str,
        alphabet: &Alphabet<char>,
        options: &RegexOptions,
    ) -> Result<Self, Error> {
        Ok(Self {
            pattern: pattern.to_owned(),
            automaton: compile_regex_with_options(pattern, alphabet, options)?,
        })
    }

    /// Whether the whole of `text` is in the pattern's language.
    ///
    /// Fails if `text` contains a character outside the alphabet.
    pub fn is_match(&self, text: &str) -> Result<bool, LookupError> {
        self.automaton.accepts(text.chars())
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The compiled automaton.
    pub fn automaton(&self) -> &WeightedAutomaton<BoolSemiring, char> {
        &self.automaton
    }
}
