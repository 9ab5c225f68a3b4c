//! Weighted finite automata over a semiring.
//!
//! An automaton with `n` states is an initial row vector, a final column
//! vector and one `n × n` transition matrix per symbol. The weight of a word
//! `a₁…a_k` is `init · Δ(a₁) · … · Δ(a_k) · final`.

use crate::error::{LookupError, ShapeError};
use crate::matrix::{Matrix, dot_unchecked, kron, kron_vec, vec_mat_unchecked};
use crate::semiring::{BoolSemiring, Semiring};
use crate::state::StateSet;
use indexmap::IndexMap;
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

/// A weighted automaton with weights in `S` and transitions labelled by `Sym`.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "S: Serialize, S::Elem: Serialize, Sym: Serialize"))]
pub struct WeightedAutomaton<S: Semiring, Sym: Hash + Eq> {
    semiring: S,
    n: usize,
    init: Vec<S::Elem>,
    #[serde(rename = "final")]
    final_weights: Vec<S::Elem>,
    delta: IndexMap<Sym, Matrix<S::Elem>>,
}

impl<S: Semiring, Sym: Hash + Eq> WeightedAutomaton<S, Sym> {
    /// Assemble an automaton, checking that `init` and `final_weights` have the
    /// same length `n` and that every transition matrix is `n × n`.
    pub fn new(
        semiring: S,
        init: Vec<S::Elem>,
        final_weights: Vec<S::Elem>,
        delta: IndexMap<Sym, Matrix<S::Elem>>,
    ) -> Result<Self, ShapeError> {
        let n = init.len();
        if final_weights.len() != n {
            return Err(ShapeError::LengthMismatch {
                what: "final weights",
                expected: n,
                found: final_weights.len(),
            });
        }
        for matrix in delta.values() {
            if matrix.shape() != (n, n) {
                let (rows, cols) = matrix.shape();
                return Err(if rows == cols {
                    ShapeError::LengthMismatch {
                        what: "transition matrix",
                        expected: n,
                        found: rows,
                    }
                } else {
                    ShapeError::NotSquare { rows, cols }
                });
            }
        }
        Ok(Self {
            semiring,
            n,
            init,
            final_weights,
            delta,
        })
    }

    pub fn semiring(&self) -> &S {
        &self.semiring
    }

    /// Number of states.
    pub fn num_states(&self) -> usize {
        self.n
    }

    /// Initial weights.
    pub fn init(&self) -> &[S::Elem] {
        &self.init
    }

    /// Final weights.
    pub fn final_weights(&self) -> &[S::Elem] {
        &self.final_weights
    }

    /// All transition matrices, in insertion order.
    pub fn delta(&self) -> &IndexMap<Sym, Matrix<S::Elem>> {
        &self.delta
    }

    /// Transition matrix for `symbol`.
    pub fn transition(&self, symbol: &Sym) -> Option<&Matrix<S::Elem>> {
        self.delta.get(symbol)
    }
}

impl<S, Sym> WeightedAutomaton<S, Sym>
where
    S: Semiring,
    Sym: Hash + Eq + Debug,
{
    /// State weights after reading `word`: `init · Δ(a₁) · … · Δ(a_k)`.
    pub fn forward_vector<I>(&self, word: I) -> Result<Vec<S::Elem>, LookupError>
    where
        I: IntoIterator,
        I::Item: Borrow<Sym>,
    {
        let mut v = self.init.clone();
        for symbol in word {
            let symbol = symbol.borrow();
            let matrix = self
                .delta
                .get(symbol)
                .ok_or_else(|| LookupError::missing(symbol))?;
            v = vec_mat_unchecked(&self.semiring, &v, matrix);
        }
        Ok(v)
    }

    /// Weight of `word`: `Σᵢ v[i] ⊗ final[i]` where `v` is the
    /// [`forward_vector`](Self::forward_vector).
    ///
    /// Fails on the first symbol without a transition matrix.
    pub fn run<I>(&self, word: I) -> Result<S::Elem, LookupError>
    where
        I: IntoIterator,
        I::Item: Borrow<Sym>,
    {
        let v = self.forward_vector(word)?;
        let weight = dot_unchecked(&self.semiring, &v, &self.final_weights);
        trace!(?weight, "ran automaton");
        Ok(weight)
    }
}

impl<S, Sym> WeightedAutomaton<S, Sym>
where
    S: Semiring + Clone,
    Sym: Hash + Eq + Clone + Debug,
{
    /// Synchronized product with `other` over `alphabet`.
    ///
    /// The product has `self.n · other.n` states; state `(p, q)` is index
    /// `p · other.n + q`. Initial and final vectors are Kronecker products of
    /// the operands' vectors and `Δ(a) = kron(Δ₁(a), Δ₂(a))` for each `a` in
    /// `alphabet`, so the weight of a word is the `⊗`-product of the two
    /// operands' path weights summed over pairs of paths. Over a commutative
    /// semiring that equals `self.run(w) ⊗ other.run(w)`; over
    /// [`BoolSemiring`] the product recognises the intersection.
    ///
    /// Only the symbols in `alphabet` are combined. Each of them must have a
    /// transition matrix on both sides.
    ///
    /// All arithmetic, and the semiring stored in the result, come from
    /// `self`. For instances with parameters, such as
    /// [`RealField`](crate::semiring::RealField)'s tolerance, `other`'s
    /// configuration is ignored.
    pub fn product(&self, other: &Self, alphabet: &[Sym]) -> Result<Self, LookupError> {
        let s = &self.semiring;
        let mut delta = IndexMap::with_capacity(alphabet.len());
        for symbol in alphabet {
            let left = self
                .delta
                .get(symbol)
                .ok_or_else(|| LookupError::missing(symbol))?;
            let right = other
                .delta
                .get(symbol)
                .ok_or_else(|| LookupError::missing(symbol))?;
            delta.insert(symbol.clone(), kron(s, left, right));
        }
        let n = self.n * other.n;
        debug!(
            left = self.n,
            right = other.n,
            states = n,
            symbols = delta.len(),
            "built product automaton"
        );
        Ok(Self {
            semiring: s.clone(),
            n,
            init: kron_vec(s, &self.init, &other.init),
            final_weights: kron_vec(s, &self.final_weights, &other.final_weights),
            delta,
        })
    }
}

impl<Sym: Hash + Eq + Debug> WeightedAutomaton<BoolSemiring, Sym> {
    /// Whether some run over `word` ends in an accepting state.
    pub fn accepts<I>(&self, word: I) -> Result<bool, LookupError>
    where
        I: IntoIterator,
        I::Item: Borrow<Sym>,
    {
        self.run(word)
    }

    /// The states reachable from an initial state by reading `word`.
    pub fn active_states<I>(&self, word: I) -> Result<StateSet, LookupError>
    where
        I: IntoIterator,
        I::Item: Borrow<Sym>,
    {
        Ok(StateSet::from_flags(&self.forward_vector(word)?))
    }

    /// Whether the automaton accepts the empty word.
    pub fn accepts_empty(&self) -> bool {
        StateSet::from_flags(&self.init).intersects(&StateSet::from_flags(&self.final_weights))
    }
}
