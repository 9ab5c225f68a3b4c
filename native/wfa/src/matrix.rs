//! Dense matrices over an arbitrary semiring.
//!
//! [`Matrix`] carries its dimensions and is validated at construction, so the
//! shape checks in the operations below are the only places a
//! [`ShapeError`] can originate. Vectors are plain slices; `v · A` is
//! [`vec_mat`], `A · v` is [`mat_vec`].

use crate::error::ShapeError;
use crate::semiring::Semiring;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A `rows × cols` matrix stored row-major.
///
/// Serializes as `{"rows", "cols", "data"}`; deserializing rejects `data`
/// whose length is not `rows · cols`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "RawMatrix<R>",
    bound(deserialize = "R: Deserialize<'de>")
)]
pub struct Matrix<R> {
    rows: usize,
    cols: usize,
    data: Vec<R>,
}

/// Unchecked wire form of [`Matrix`].
#[derive(Deserialize)]
struct RawMatrix<R> {
    rows: usize,
    cols: usize,
    data: Vec<R>,
}

impl<R> TryFrom<RawMatrix<R>> for Matrix<R> {
    type Error = ShapeError;

    fn try_from(raw: RawMatrix<R>) -> Result<Self, ShapeError> {
        let expected = raw.rows.checked_mul(raw.cols).unwrap_or(usize::MAX);
        if raw.data.len() != expected {
            return Err(ShapeError::LengthMismatch {
                what: "matrix data",
                expected,
                found: raw.data.len(),
            });
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            data: raw.data,
        })
    }
}

impl<R: Clone> Matrix<R> {
    /// A matrix with every entry set to `value`.
    pub fn filled(rows: usize, cols: usize, value: R) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Build from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<R>>) -> Result<Self, ShapeError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(ShapeError::Ragged {
                    row: i,
                    expected: n_cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Transposed copy.
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self[(j, i)].clone())
    }

    /// Nested-row copy of the entries.
    pub fn to_rows(&self) -> Vec<Vec<R>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }
}

impl<R> Matrix<R> {
    /// Build by evaluating `f(row, col)` for every entry.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> R) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Entry at `(i, j)`, or `None` when out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<&R> {
        if i < self.rows && j < self.cols {
            self.data.get(i * self.cols + j)
        } else {
            None
        }
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    /// If `i >= rows`.
    pub fn row(&self, i: usize) -> &[R] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Apply `f` to every entry.
    pub fn map<T>(&self, mut f: impl FnMut(&R) -> T) -> Matrix<T> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(&mut f).collect(),
        }
    }

    /// Entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.data.iter()
    }

    fn require_square(&self) -> Result<(), ShapeError> {
        if self.is_square() {
            Ok(())
        } else {
            Err(ShapeError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl<R> Index<(usize, usize)> for Matrix<R> {
    type Output = R;

    fn index(&self, (i, j): (usize, usize)) -> &R {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of range");
        &self.data[i * self.cols + j]
    }
}

impl<R> IndexMut<(usize, usize)> for Matrix<R> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut R {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of range");
        &mut self.data[i * self.cols + j]
    }
}

/// `rows × cols` matrix of zeros.
pub fn zeros<S: Semiring>(s: &S, rows: usize, cols: usize) -> Matrix<S::Elem> {
    Matrix::filled(rows, cols, s.zero())
}

/// `n × n` identity: `one` on the diagonal, `zero` elsewhere.
pub fn eye<S: Semiring>(s: &S, n: usize) -> Matrix<S::Elem> {
    Matrix::from_fn(n, n, |i, j| if i == j { s.one() } else { s.zero() })
}

/// Square matrix with `diagonal` on the diagonal and `zero` elsewhere.
pub fn diag<S: Semiring>(s: &S, diagonal: &[S::Elem]) -> Matrix<S::Elem> {
    let n = diagonal.len();
    Matrix::from_fn(n, n, |i, j| {
        if i == j {
            diagonal[i].clone()
        } else {
            s.zero()
        }
    })
}

/// `A · B`
pub fn mat_mul<S: Semiring>(
    s: &S,
    a: &Matrix<S::Elem>,
    b: &Matrix<S::Elem>,
) -> Result<Matrix<S::Elem>, ShapeError> {
    if a.cols != b.rows {
        return Err(ShapeError::MulMismatch {
            left_rows: a.rows,
            left_cols: a.cols,
            right_rows: b.rows,
            right_cols: b.cols,
        });
    }
    Ok(mat_mul_unchecked(s, a, b))
}

pub(crate) fn mat_mul_unchecked<S: Semiring>(
    s: &S,
    a: &Matrix<S::Elem>,
    b: &Matrix<S::Elem>,
) -> Matrix<S::Elem> {
    debug_assert_eq!(a.cols, b.rows);
    let mut out = zeros(s, a.rows, b.cols);
    for i in 0..a.rows {
        for k in 0..a.cols {
            let aik = &a[(i, k)];
            for j in 0..b.cols {
                let term = s.mul(aik, &b[(k, j)]);
                out[(i, j)] = s.add(&out[(i, j)], &term);
            }
        }
    }
    out
}

/// Elementwise `A ⊕ B`.
pub fn mat_add<S: Semiring>(
    s: &S,
    a: &Matrix<S::Elem>,
    b: &Matrix<S::Elem>,
) -> Result<Matrix<S::Elem>, ShapeError> {
    if a.shape() != b.shape() {
        return Err(ShapeError::AddMismatch {
            left_rows: a.rows,
            left_cols: a.cols,
            right_rows: b.rows,
            right_cols: b.cols,
        });
    }
    Ok(Matrix {
        rows: a.rows,
        cols: a.cols,
        data: a
            .data
            .iter()
            .zip(&b.data)
            .map(|(x, y)| s.add(x, y))
            .collect(),
    })
}

/// Row vector times matrix, `v · A`.
pub fn vec_mat<S: Semiring>(
    s: &S,
    v: &[S::Elem],
    a: &Matrix<S::Elem>,
) -> Result<Vec<S::Elem>, ShapeError> {
    if v.len() != a.rows {
        return Err(ShapeError::LengthMismatch {
            what: "row vector",
            expected: a.rows,
            found: v.len(),
        });
    }
    Ok(vec_mat_unchecked(s, v, a))
}

pub(crate) fn vec_mat_unchecked<S: Semiring>(
    s: &S,
    v: &[S::Elem],
    a: &Matrix<S::Elem>,
) -> Vec<S::Elem> {
    debug_assert_eq!(v.len(), a.rows);
    let mut out = vec![s.zero(); a.cols];
    for (i, vi) in v.iter().enumerate() {
        for (j, slot) in out.iter_mut().enumerate() {
            let term = s.mul(vi, &a[(i, j)]);
            *slot = s.add(slot, &term);
        }
    }
    out
}

/// Matrix times column vector, `A · v`.
pub fn mat_vec<S: Semiring>(
    s: &S,
    a: &Matrix<S::Elem>,
    v: &[S::Elem],
) -> Result<Vec<S::Elem>, ShapeError> {
    if v.len() != a.cols {
        return Err(ShapeError::LengthMismatch {
            what: "column vector",
            expected: a.cols,
            found: v.len(),
        });
    }
    Ok((0..a.rows)
        .map(|i| dot_unchecked(s, a.row(i), v))
        .collect())
}

/// `Σ u[i] ⊗ v[i]`
pub fn dot<S: Semiring>(s: &S, u: &[S::Elem], v: &[S::Elem]) -> Result<S::Elem, ShapeError> {
    if u.len() != v.len() {
        return Err(ShapeError::LengthMismatch {
            what: "dot operand",
            expected: u.len(),
            found: v.len(),
        });
    }
    Ok(dot_unchecked(s, u, v))
}

pub(crate) fn dot_unchecked<S: Semiring>(s: &S, u: &[S::Elem], v: &[S::Elem]) -> S::Elem {
    u.iter()
        .zip(v)
        .fold(s.zero(), |acc, (x, y)| s.add(&acc, &s.mul(x, y)))
}

/// Kronecker product `A ⊗ B`.
///
/// The result is `(mA·mB) × (nA·nB)` and entry
/// `(iA·mB + iB, jA·nB + jB)` is `A[iA][jA] ⊗ B[iB][jB]`. Automaton products
/// rely on this exact row-major block order: product state `(p, q)` lives at
/// index `p·|B| + q`.
pub fn kron<S: Semiring>(s: &S, a: &Matrix<S::Elem>, b: &Matrix<S::Elem>) -> Matrix<S::Elem> {
    let (mb, nb) = b.shape();
    Matrix::from_fn(a.rows * mb, a.cols * nb, |i, j| {
        let (ia, ib) = (i / mb, i % mb);
        let (ja, jb) = (j / nb, j % nb);
        s.mul(&a[(ia, ja)], &b[(ib, jb)])
    })
}

/// Kronecker product of two vectors, same ordering as [`kron`].
pub fn kron_vec<S: Semiring>(s: &S, u: &[S::Elem], v: &[S::Elem]) -> Vec<S::Elem> {
    u.iter()
        .flat_map(|x| v.iter().map(move |y| s.mul(x, y)))
        .collect()
}

/// Same shape and every entry equal under the semiring's `eq`.
pub fn eq_mat<S: Semiring>(s: &S, a: &Matrix<S::Elem>, b: &Matrix<S::Elem>) -> bool {
    a.shape() == b.shape() && a.data.iter().zip(&b.data).all(|(x, y)| s.eq(x, y))
}

/// `A^k` by binary exponentiation; `A^0` is the identity.
pub fn pow_mat<S: Semiring>(
    s: &S,
    a: &Matrix<S::Elem>,
    k: u32,
) -> Result<Matrix<S::Elem>, ShapeError> {
    a.require_square()?;
    let mut result = eye(s, a.rows);
    let mut base = a.clone();
    let mut k = k;
    while k > 0 {
        if k & 1 == 1 {
            result = mat_mul_unchecked(s, &result, &base);
        }
        k >>= 1;
        if k > 0 {
            base = mat_mul_unchecked(s, &base, &base);
        }
    }
    Ok(result)
}

/// Truncated Kleene star `I ⊕ A ⊕ A² ⊕ … ⊕ A^L`.
///
/// This is not a fixed point. For reachability or shortest paths over `n`
/// vertices, `L = n - 1` suffices; [`transitive_closure_bool`] gives the exact
/// Boolean closure directly.
///
/// [`transitive_closure_bool`]: crate::graph::transitive_closure_bool
pub fn closure_up_to<S: Semiring>(
    s: &S,
    a: &Matrix<S::Elem>,
    max_len: u32,
) -> Result<Matrix<S::Elem>, ShapeError> {
    a.require_square()?;
    let mut acc = eye(s, a.rows);
    let mut power = acc.clone();
    for _ in 0..max_len {
        power = mat_mul_unchecked(s, &power, a);
        acc = mat_add(s, &acc, &power)?;
    }
    Ok(acc)
}
