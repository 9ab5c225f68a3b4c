//! Algebraic structures.
//!
//! A semiring is a plain value carrying the operations; it is passed
//! explicitly to every generic function in this crate. Instances never carry
//! mutable state, and no algebraic laws are checked at runtime: callers are
//! responsible for supplying lawful instances.
//!
//! Provided instances:
//! - [`BoolSemiring`]: `(∨, ∧)` reachability
//! - [`NatSemiring`]: `(+, ×)` over `u64`, path counting
//! - [`MinPlus`]: `(min, +)` shortest paths
//! - [`MaxPlus`]: `(max, +)` Viterbi in log space
//! - [`MaxTimes`]: `(max, ×)` Viterbi over probabilities
//! - [`Probability`]: `(+, ×)` over `f64`
//! - [`IntegerRing`]: the ring of `i64`
//! - [`RealField`]: the field of `f64` with tolerant equality

mod instances;

pub use instances::{
    BoolSemiring, IntegerRing, MaxPlus, MaxTimes, MinPlus, NatSemiring, Probability, RealField,
};

use std::fmt::Debug;

/// A semiring `(R, ⊕, ⊗, 0, 1)`.
pub trait Semiring {
    /// Carrier type.
    type Elem: Clone + PartialEq + Debug;

    /// Additive identity, absorbing for [`mul`](Semiring::mul).
    fn zero(&self) -> Self::Elem;

    /// Multiplicative identity.
    fn one(&self) -> Self::Elem;

    /// `a ⊕ b`
    fn add(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// `a ⊗ b`
    fn mul(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem;

    /// Equality used by every comparison-sensitive algorithm.
    ///
    /// Defaults to `PartialEq`; override it for carriers where structural
    /// equality is the wrong notion (approximate reals, canonical forms).
    fn eq(&self, a: &Self::Elem, b: &Self::Elem) -> bool {
        a == b
    }

    /// Fold a sequence with [`add`](Semiring::add), starting from zero.
    fn sum<'a, I>(&self, items: I) -> Self::Elem
    where
        I: IntoIterator<Item = &'a Self::Elem>,
        Self::Elem: 'a,
    {
        items
            .into_iter()
            .fold(self.zero(), |acc, x| self.add(&acc, x))
    }
}

/// A semiring with additive inverses.
pub trait Ring: Semiring {
    /// `-a`
    fn neg(&self, a: &Self::Elem) -> Self::Elem;

    /// `a - b`
    fn sub(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
        self.add(a, &self.neg(b))
    }
}

/// A ring with multiplicative inverses for non-zero elements.
pub trait Field: Ring {
    /// `a⁻¹`. The result for zero is instance-defined.
    fn inv(&self, a: &Self::Elem) -> Self::Elem;

    /// `a / b`
    fn div(&self, a: &Self::Elem, b: &Self::Elem) -> Self::Elem {
        self.mul(a, &self.inv(b))
    }
}
