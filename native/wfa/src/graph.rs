//! Graph algorithms as semiring matrix computations.
//!
//! Each algorithm is the same matrix primitive under a different semiring:
//! powers over [`NatSemiring`] count walks, truncated stars over
//! [`BoolSemiring`] give bounded reachability, and over [`MinPlus`] they give
//! shortest paths with a bounded number of edges.

use crate::error::ShapeError;
use crate::matrix::{Matrix, closure_up_to, pow_mat};
use crate::semiring::{BoolSemiring, MinPlus, NatSemiring};
use crate::state::StateSet;

fn check_vertex(index: usize, size: usize) -> Result<(), ShapeError> {
    if index < size {
        Ok(())
    } else {
        Err(ShapeError::IndexOutOfBounds { index, size })
    }
}

/// Boolean adjacency matrix of a directed graph on `n` vertices.
pub fn bool_adjacency(n: usize, edges: &[(usize, usize)]) -> Result<Matrix<bool>, ShapeError> {
    let mut adj = Matrix::filled(n, n, false);
    for &(from, to) in edges {
        check_vertex(from, n)?;
        check_vertex(to, n)?;
        adj[(from, to)] = true;
    }
    Ok(adj)
}

/// Edge-count adjacency matrix; parallel edges add up.
pub fn count_adjacency(n: usize, edges: &[(usize, usize)]) -> Result<Matrix<u64>, ShapeError> {
    let mut adj = Matrix::filled(n, n, 0u64);
    for &(from, to) in edges {
        check_vertex(from, n)?;
        check_vertex(to, n)?;
        adj[(from, to)] = adj[(from, to)].saturating_add(1);
    }
    Ok(adj)
}

/// Min-plus adjacency matrix: missing edges are `+∞`, parallel edges keep the
/// lightest weight.
pub fn weighted_adjacency(
    n: usize,
    edges: &[(usize, usize, f64)],
) -> Result<Matrix<f64>, ShapeError> {
    let mut adj = Matrix::filled(n, n, f64::INFINITY);
    for &(from, to, weight) in edges {
        check_vertex(from, n)?;
        check_vertex(to, n)?;
        adj[(from, to)] = adj[(from, to)].min(weight);
    }
    Ok(adj)
}

/// Number of walks of exactly `len` edges between every pair of vertices.
pub fn count_paths_of_length(adj: &Matrix<u64>, len: u32) -> Result<Matrix<u64>, ShapeError> {
    pow_mat(&NatSemiring, adj, len)
}

/// `reach[i][j]` iff `j` is reachable from `i` in at most `max_len` edges.
pub fn reachable_within(adj: &Matrix<bool>, max_len: u32) -> Result<Matrix<bool>, ShapeError> {
    closure_up_to(&BoolSemiring, adj, max_len)
}

/// Lightest walk of at most `max_len` edges between every pair of vertices.
///
/// The diagonal starts at `0` (the empty walk); unreachable pairs stay `+∞`.
/// With non-negative weights, `max_len = n - 1` yields exact shortest paths.
pub fn shortest_paths_up_to(weights: &Matrix<f64>, max_len: u32) -> Result<Matrix<f64>, ShapeError> {
    closure_up_to(&MinPlus, weights, max_len)
}

/// Exact transitive closure by Warshall's algorithm.
///
/// With `reflexive` set the result also relates every vertex to itself
/// (reflexive-transitive closure), which is what ε-elimination needs.
pub fn transitive_closure_bool(
    adj: &Matrix<bool>,
    reflexive: bool,
) -> Result<Matrix<bool>, ShapeError> {
    if !adj.is_square() {
        return Err(ShapeError::NotSquare {
            rows: adj.rows(),
            cols: adj.cols(),
        });
    }
    let n = adj.rows();
    let mut rows: Vec<StateSet> = (0..n)
        .map(|i| {
            let mut row = StateSet::from_flags(adj.row(i));
            if reflexive {
                row.insert(i);
            }
            row
        })
        .collect();

    for k in 0..n {
        let pivot = rows[k].clone();
        for row in rows.iter_mut() {
            if row.contains(k) {
                row.union_with(&pivot);
            }
        }
    }

    Ok(Matrix::from_fn(n, n, |i, j| rows[i].contains(j)))
}
