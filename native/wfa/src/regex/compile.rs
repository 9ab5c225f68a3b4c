//! ε-elimination: collapse a Thompson NFA into a Boolean weighted automaton.
//!
//! With `E` the reflexive-transitive closure of the ε-edges, the compiled
//! automaton has `Δ'(s) = E · Δ(s) · E` for every symbol, `init' = init · E`
//! and `final' = E · final`.

use super::thompson::Nfa;
use crate::automaton::WeightedAutomaton;
use crate::error::ShapeError;
use crate::graph::transitive_closure_bool;
use crate::matrix::{mat_mul, mat_vec, vec_mat};
use crate::semiring::BoolSemiring;
use indexmap::IndexMap;
use tracing::debug;

/// Remove the ε-edges of `nfa`.
pub fn eliminate_epsilons(nfa: &Nfa) -> Result<WeightedAutomaton<BoolSemiring, char>, ShapeError> {
    let s = &BoolSemiring;
    let closure = transitive_closure_bool(&nfa.eps_adj, true)?;

    let mut delta = IndexMap::with_capacity(nfa.sym_adj.len());
    for (&symbol, adj) in &nfa.sym_adj {
        let left = mat_mul(s, &closure, adj)?;
        delta.insert(symbol, mat_mul(s, &left, &closure)?);
    }

    let mut init = vec![false; nfa.n];
    init[nfa.start] = true;
    let mut final_weights = vec![false; nfa.n];
    final_weights[nfa.accept] = true;

    let init = vec_mat(s, &init, &closure)?;
    let final_weights = mat_vec(s, &closure, &final_weights)?;

    debug!(
        states = nfa.n,
        initial = init.iter().filter(|b| **b).count(),
        accepting = final_weights.iter().filter(|b| **b).count(),
        "eliminated epsilon transitions"
    );
    WeightedAutomaton::new(BoolSemiring, init, final_weights, delta)
}
