//! Property tests for the matrix algebra and the regex compiler.
//!
//! These check the algebraic laws every semiring instantiation has to
//! satisfy, plus agreement between compiled patterns and direct predicates.

use proptest::prelude::*;
use wfa::graph::transitive_closure_bool;
use wfa::matrix::{closure_up_to, eq_mat, eye, kron, kron_vec, mat_mul, mat_vec, pow_mat};
use wfa::semiring::{BoolSemiring, IntegerRing, MinPlus, NatSemiring};
use wfa::{Matrix, compile_regex_to_wa};

fn matrix<T, S>(rows: usize, cols: usize, elem: S) -> impl Strategy<Value = Matrix<T>>
where
    T: Clone + std::fmt::Debug,
    S: Strategy<Value = T>,
{
    prop::collection::vec(elem, rows * cols)
        .prop_map(move |data| Matrix::from_fn(rows, cols, |i, j| data[i * cols + j].clone()))
}

fn square<T, S>(elem: S) -> impl Strategy<Value = Matrix<T>>
where
    T: Clone + std::fmt::Debug,
    S: Strategy<Value = T> + Clone,
{
    (1usize..5).prop_flat_map(move |n| matrix(n, n, elem.clone()))
}

fn basis(n: usize, i: usize) -> Vec<u64> {
    (0..n).map(|k| u64::from(k == i)).collect()
}

// ============================================================
// Identity and power laws
// ============================================================

proptest! {
    #[test]
    fn identity_law_nat(a in square(0u64..10)) {
        let s = NatSemiring;
        let i = eye(&s, a.rows());
        prop_assert!(eq_mat(&s, &mat_mul(&s, &i, &a).unwrap(), &a));
        prop_assert!(eq_mat(&s, &mat_mul(&s, &a, &i).unwrap(), &a));
    }

    #[test]
    fn identity_law_bool(a in square(any::<bool>())) {
        let s = BoolSemiring;
        let i = eye(&s, a.rows());
        prop_assert!(eq_mat(&s, &mat_mul(&s, &i, &a).unwrap(), &a));
        prop_assert!(eq_mat(&s, &mat_mul(&s, &a, &i).unwrap(), &a));
    }

    #[test]
    fn identity_law_tropical(a in square(prop_oneof![Just(f64::INFINITY), 0.0f64..100.0])) {
        let s = MinPlus;
        let i = eye(&s, a.rows());
        prop_assert!(eq_mat(&s, &mat_mul(&s, &i, &a).unwrap(), &a));
        prop_assert!(eq_mat(&s, &mat_mul(&s, &a, &i).unwrap(), &a));
    }

    #[test]
    fn power_law_nat(a in square(0u64..4), k in 0u32..6) {
        let s = NatSemiring;
        prop_assert_eq!(pow_mat(&s, &a, 0).unwrap(), eye(&s, a.rows()));
        let next = pow_mat(&s, &a, k + 1).unwrap();
        let stepped = mat_mul(&s, &a, &pow_mat(&s, &a, k).unwrap()).unwrap();
        prop_assert!(eq_mat(&s, &next, &stepped));
    }

    #[test]
    fn power_law_integer_ring(a in square(-3i64..4), k in 0u32..5) {
        let s = IntegerRing;
        let next = pow_mat(&s, &a, k + 1).unwrap();
        let stepped = mat_mul(&s, &a, &pow_mat(&s, &a, k).unwrap()).unwrap();
        prop_assert!(eq_mat(&s, &next, &stepped));
    }
}

// ============================================================
// Closures
// ============================================================

proptest! {
    #[test]
    fn warshall_is_idempotent(a in square(any::<bool>()), reflexive in any::<bool>()) {
        let once = transitive_closure_bool(&a, reflexive).unwrap();
        let twice = transitive_closure_bool(&once, reflexive).unwrap();
        prop_assert!(eq_mat(&BoolSemiring, &once, &twice));
    }

    #[test]
    fn warshall_matches_truncated_star(a in square(any::<bool>())) {
        let n = u32::try_from(a.rows()).unwrap();
        let exact = transitive_closure_bool(&a, true).unwrap();
        let truncated = closure_up_to(&BoolSemiring, &a, n - 1).unwrap();
        prop_assert!(eq_mat(&BoolSemiring, &exact, &truncated));
    }
}

// ============================================================
// Kronecker block placement
// ============================================================

proptest! {
    #[test]
    fn kron_acts_on_basis_products(
        (a, b) in (1usize..4, 1usize..4, 1usize..4, 1usize..4).prop_flat_map(|(m, n, p, q)| {
            (matrix(m, n, 0u64..10), matrix(p, q, 0u64..10))
        }),
        i_seed in any::<usize>(),
        j_seed in any::<usize>(),
    ) {
        let s = NatSemiring;
        let i = i_seed % a.cols();
        let j = j_seed % b.cols();
        let (ei, ej) = (basis(a.cols(), i), basis(b.cols(), j));

        let lhs = mat_vec(&s, &kron(&s, &a, &b), &kron_vec(&s, &ei, &ej)).unwrap();
        let rhs = kron_vec(
            &s,
            &mat_vec(&s, &a, &ei).unwrap(),
            &mat_vec(&s, &b, &ej).unwrap(),
        );
        prop_assert_eq!(lhs, rhs);
    }
}

// ============================================================
// Regex compiler against direct predicates
// ============================================================

fn word() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just('a'), Just('b')], 0..8)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn ends_with_abb(w in word()) {
        let wa = compile_regex_to_wa("(a|b)*abb", &['a', 'b']).unwrap();
        prop_assert_eq!(wa.accepts(w.chars()).unwrap(), w.ends_with("abb"));
    }

    #[test]
    fn as_then_bs(w in word()) {
        let wa = compile_regex_to_wa("a*b*", &['a', 'b']).unwrap();
        prop_assert_eq!(wa.accepts(w.chars()).unwrap(), !w.contains("ba"));
    }

    #[test]
    fn even_number_of_bs(w in word()) {
        let wa = compile_regex_to_wa("(a*ba*b)*a*", &['a', 'b']).unwrap();
        let bs = w.chars().filter(|c| *c == 'b').count();
        prop_assert_eq!(wa.accepts(w.chars()).unwrap(), bs % 2 == 0);
    }

    #[test]
    fn optional_prefix(w in word()) {
        let wa = compile_regex_to_wa("b?a+", &['a', 'b']).unwrap();
        let rest = w.strip_prefix('b').unwrap_or(w.as_str());
        let expected = !rest.is_empty() && rest.chars().all(|c| c == 'a');
        prop_assert_eq!(wa.accepts(w.chars()).unwrap(), expected);
    }
}
