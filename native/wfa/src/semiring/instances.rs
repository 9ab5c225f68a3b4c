//! Concrete semiring instances.

use super::{Field, Ring, Semiring};
use serde::{Deserialize, Serialize};

/// `({false, true}, ∨, ∧, false, true)`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BoolSemiring;

impl Semiring for BoolSemiring {
    type Elem = bool;

    fn zero(&self) -> bool {
        false
    }

    fn one(&self) -> bool {
        true
    }

    fn add(&self, a: &bool, b: &bool) -> bool {
        *a || *b
    }

    fn mul(&self, a: &bool, b: &bool) -> bool {
        *a && *b
    }
}

/// Natural numbers with saturating arithmetic, so path counts on large
/// graphs pin at `u64::MAX` instead of wrapping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NatSemiring;

impl Semiring for NatSemiring {
    type Elem = u64;

    fn zero(&self) -> u64 {
        0
    }

    fn one(&self) -> u64 {
        1
    }

    fn add(&self, a: &u64, b: &u64) -> u64 {
        a.saturating_add(*b)
    }

    fn mul(&self, a: &u64, b: &u64) -> u64 {
        a.saturating_mul(*b)
    }
}

/// Tropical `(min, +)` over `f64`; zero is `+∞`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MinPlus;

impl Semiring for MinPlus {
    type Elem = f64;

    fn zero(&self) -> f64 {
        f64::INFINITY
    }

    fn one(&self) -> f64 {
        0.0
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a.min(*b)
    }

    fn mul(&self, a: &f64, b: &f64) -> f64 {
        // +∞ must stay absorbing even against -∞ edge weights
        if *a == f64::INFINITY || *b == f64::INFINITY {
            f64::INFINITY
        } else {
            a + b
        }
    }
}

/// Tropical `(max, +)` over `f64`; zero is `-∞`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MaxPlus;

impl Semiring for MaxPlus {
    type Elem = f64;

    fn zero(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn one(&self) -> f64 {
        0.0
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a.max(*b)
    }

    fn mul(&self, a: &f64, b: &f64) -> f64 {
        if *a == f64::NEG_INFINITY || *b == f64::NEG_INFINITY {
            f64::NEG_INFINITY
        } else {
            a + b
        }
    }
}

/// `(max, ×)` over non-negative `f64`, the Viterbi semiring on raw
/// probabilities.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MaxTimes;

impl Semiring for MaxTimes {
    type Elem = f64;

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a.max(*b)
    }

    fn mul(&self, a: &f64, b: &f64) -> f64 {
        a * b
    }
}

/// Ordinary `(+, ×)` over `f64`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Probability;

impl Semiring for Probability {
    type Elem = f64;

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn mul(&self, a: &f64, b: &f64) -> f64 {
        a * b
    }
}

/// The ring of `i64` with wrapping arithmetic.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IntegerRing;

impl Semiring for IntegerRing {
    type Elem = i64;

    fn zero(&self) -> i64 {
        0
    }

    fn one(&self) -> i64 {
        1
    }

    fn add(&self, a: &i64, b: &i64) -> i64 {
        a.wrapping_add(*b)
    }

    fn mul(&self, a: &i64, b: &i64) -> i64 {
        a.wrapping_mul(*b)
    }
}

impl Ring for IntegerRing {
    fn neg(&self, a: &i64) -> i64 {
        a.wrapping_neg()
    }

    fn sub(&self, a: &i64, b: &i64) -> i64 {
        a.wrapping_sub(*b)
    }
}

/// The field of `f64`. Two elements compare equal when they differ by at
/// most `tolerance`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RealField {
    /// Absolute tolerance used by [`Semiring::eq`].
    pub tolerance: f64,
}

impl RealField {
    /// Field with the given absolute equality tolerance.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl Default for RealField {
    fn default() -> Self {
        Self { tolerance: 1e-9 }
    }
}

impl Semiring for RealField {
    type Elem = f64;

    fn zero(&self) -> f64 {
        0.0
    }

    fn one(&self) -> f64 {
        1.0
    }

    fn add(&self, a: &f64, b: &f64) -> f64 {
        a + b
    }

    fn mul(&self, a: &f64, b: &f64) -> f64 {
        a * b
    }

    fn eq(&self, a: &f64, b: &f64) -> bool {
        a == b || (a - b).abs() <= self.tolerance
    }
}

impl Ring for RealField {
    fn neg(&self, a: &f64) -> f64 {
        -a
    }
}

impl Field for RealField {
    fn inv(&self, a: &f64) -> f64 {
        1.0 / a
    }
}
