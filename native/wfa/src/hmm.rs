//! Hidden Markov models and the forward algorithm over any semiring.
//!
//! Over [`Probability`](crate::semiring::Probability) the forward pass gives
//! the total likelihood of an observation sequence; over
//! [`MaxTimes`](crate::semiring::MaxTimes), or [`MaxPlus`](crate::semiring::MaxPlus)
//! with log weights, it gives the Viterbi best-path score.

use crate::error::{LookupError, ShapeError};
use crate::matrix::{Matrix, diag, dot_unchecked, vec_mat_unchecked};
use crate::semiring::Semiring;
use indexmap::IndexMap;
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::trace;

/// An HMM with `n` hidden states and weights in `S`.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "S: Serialize, S::Elem: Serialize, Obs: Serialize"))]
pub struct Hmm<S: Semiring, Obs: Hash + Eq> {
    semiring: S,
    n: usize,
    transition: Matrix<S::Elem>,
    emission: IndexMap<Obs, Matrix<S::Elem>>,
    initial: Vec<S::Elem>,
    final_weights: Option<Vec<S::Elem>>,
}

impl<S: Semiring, Obs: Hash + Eq> Hmm<S, Obs> {
    /// Build an HMM from an `n × n` transition matrix, one diagonal `n × n`
    /// emission matrix per observation and an initial distribution of
    /// length `n`.
    ///
    /// An emission matrix with an entry off the diagonal that is not the
    /// semiring's zero is rejected with [`ShapeError::NotDiagonal`].
    pub fn new(
        semiring: S,
        transition: Matrix<S::Elem>,
        emission: IndexMap<Obs, Matrix<S::Elem>>,
        initial: Vec<S::Elem>,
    ) -> Result<Self, ShapeError> {
        let n = initial.len();
        check_square(&transition, n, "transition matrix")?;
        for matrix in emission.values() {
            check_square(matrix, n, "emission matrix")?;
            check_diagonal(&semiring, matrix)?;
        }
        Ok(Self {
            semiring,
            n,
            transition,
            emission,
            initial,
            final_weights: None,
        })
    }

    /// Build an HMM from per-observation emission vectors instead of
    /// diagonal matrices.
    pub fn from_emission_vectors(
        semiring: S,
        transition: Matrix<S::Elem>,
        emission: IndexMap<Obs, Vec<S::Elem>>,
        initial: Vec<S::Elem>,
    ) -> Result<Self, ShapeError> {
        let emission = emission
            .into_iter()
            .map(|(obs, weights)| {
                let matrix = diag(&semiring, &weights);
                (obs, matrix)
            })
            .collect();
        Self::new(semiring, transition, emission, initial)
    }

    /// Weight each state at the end of the pass. Without one every state
    /// ends with `one`.
    pub fn with_final(mut self, final_weights: Vec<S::Elem>) -> Result<Self, ShapeError> {
        if final_weights.len() != self.n {
            return Err(ShapeError::LengthMismatch {
                what: "final weights",
                expected: self.n,
                found: final_weights.len(),
            });
        }
        self.final_weights = Some(final_weights);
        Ok(self)
    }

    /// Number of hidden states.
    pub fn num_states(&self) -> usize {
        self.n
    }

    pub fn transition(&self) -> &Matrix<S::Elem> {
        &self.transition
    }

    pub fn emission(&self) -> &IndexMap<Obs, Matrix<S::Elem>> {
        &self.emission
    }
}

fn check_square<R>(matrix: &Matrix<R>, n: usize, what: &'static str) -> Result<(), ShapeError> {
    let (rows, cols) = matrix.shape();
    if rows != cols {
        Err(ShapeError::NotSquare { rows, cols })
    } else if rows != n {
        Err(ShapeError::LengthMismatch {
            what,
            expected: n,
            found: rows,
        })
    } else {
        Ok(())
    }
}

fn check_diagonal<S: Semiring>(s: &S, matrix: &Matrix<S::Elem>) -> Result<(), ShapeError> {
    let zero = s.zero();
    for row in 0..matrix.rows() {
        for col in (0..matrix.cols()).filter(|&col| col != row) {
            if !s.eq(&matrix[(row, col)], &zero) {
                return Err(ShapeError::NotDiagonal { row, col });
            }
        }
    }
    Ok(())
}

impl<S: Semiring, Obs: Hash + Eq + Debug> Hmm<S, Obs> {
    /// Forward pass over `observations`.
    ///
    /// Starting from the initial vector, each observation scales the state
    /// vector by the diagonal of its emission matrix and then advances it
    /// through the transition matrix. The result is the dot product with the
    /// final weights.
    pub fn forward<I>(&self, observations: I) -> Result<S::Elem, LookupError>
    where
        I: IntoIterator,
        I::Item: Borrow<Obs>,
    {
        let s = &self.semiring;
        let mut v = self.initial.clone();
        let mut steps = 0usize;
        for obs in observations {
            let obs = obs.borrow();
            let emission = self
                .emission
                .get(obs)
                .ok_or_else(|| LookupError::missing(obs))?;
            for (i, vi) in v.iter_mut().enumerate() {
                *vi = s.mul(vi, &emission[(i, i)]);
            }
            v = vec_mat_unchecked(s, &v, &self.transition);
            steps += 1;
        }
        let score = match &self.final_weights {
            Some(final_weights) => dot_unchecked(s, &v, final_weights),
            None => s.sum(&v),
        };
        trace!(steps, ?score, "forward pass");
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semiring::{MaxTimes, Probability};

    fn weather() -> Hmm<Probability, char> {
        let transition = Matrix::from_rows(vec![vec![0.7, 0.3], vec![0.4, 0.6]]).unwrap();
        let mut emission = IndexMap::new();
        emission.insert('u', vec![0.9, 0.2]);
        emission.insert('n', vec![0.1, 0.8]);
        Hmm::from_emission_vectors(Probability, transition, emission, vec![0.5, 0.5]).unwrap()
    }

    #[test]
    fn test_single_observation() {
        let hmm = weather();
        let p = hmm.forward("u".chars()).unwrap();
        assert!((p - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_empty_sequence_sums_initial() {
        assert!((weather().forward("".chars()).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_observation() {
        let err = weather().forward("ux".chars()).unwrap_err();
        assert_eq!(err.symbol, "'x'");
    }

    #[test]
    fn test_final_weights() {
        let hmm = weather().with_final(vec![1.0, 0.0]).unwrap();
        // 0.5·0.9·0.7 + 0.5·0.2·0.4
        let p = hmm.forward("u".chars()).unwrap();
        assert!((p - 0.355).abs() < 1e-12);
        assert!(weather().with_final(vec![1.0]).is_err());
    }

    #[test]
    fn test_viterbi_score() {
        let w = weather();
        let hmm = Hmm::new(
            MaxTimes,
            w.transition().clone(),
            w.emission().clone(),
            vec![0.5, 0.5],
        )
        .unwrap();
        // best path for "uu": state 0 twice, 0.5·0.9·0.7·0.9·max(0.7, 0.3)
        let p = hmm.forward("uu".chars()).unwrap();
        assert!((p - 0.5 * 0.9 * 0.7 * 0.9 * 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_off_diagonal_emission() {
        let mut emission = IndexMap::new();
        emission.insert('u', Matrix::from_rows(vec![vec![0.9, 0.0], vec![0.0, 0.2]]).unwrap());
        emission.insert('n', Matrix::from_rows(vec![vec![0.1, 0.3], vec![0.0, 0.8]]).unwrap());
        let err = Hmm::new(
            Probability,
            Matrix::filled(2, 2, 0.5),
            emission,
            vec![0.5, 0.5],
        )
        .unwrap_err();
        assert_eq!(err, ShapeError::NotDiagonal { row: 0, col: 1 });

        // zero is -inf under max-plus, so a 0.0 off the diagonal is a real weight
        let mut emission = IndexMap::new();
        emission.insert('u', Matrix::from_rows(vec![vec![0.0, 0.0], vec![f64::NEG_INFINITY, 0.0]]).unwrap());
        let err = Hmm::new(
            crate::semiring::MaxPlus,
            Matrix::filled(2, 2, 0.0),
            emission,
            vec![0.0, 0.0],
        )
        .unwrap_err();
        assert_eq!(err, ShapeError::NotDiagonal { row: 0, col: 1 });
    }

    #[test]
    fn test_shape_checks() {
        let err = Hmm::<Probability, char>::new(
            Probability,
            Matrix::filled(2, 2, 0.5),
            IndexMap::new(),
            vec![1.0],
        )
        .unwrap_err();
        assert!(matches!(err, ShapeError::LengthMismatch { expected: 1, found: 2, .. }));
    }
}
