//! End-to-end checks of the semiring algorithms against brute force.

use indexmap::IndexMap;
use wfa::graph::{shortest_paths_up_to, weighted_adjacency};
use wfa::semiring::{MaxPlus, NatSemiring, Probability};
use wfa::{Alphabet, Error, Hmm, Matrix, Regex, RegexOptions, WeightedAutomaton, compile_regex_to_wa};

// ============================================================
// Graphs
// ============================================================

/// Minimum weight over every walk of at most `max_len` edges, by exhaustive
/// enumeration.
fn brute_force_shortest(edges: &[(usize, usize, f64)], n: usize, max_len: usize) -> Vec<Vec<f64>> {
    fn walk(
        edges: &[(usize, usize, f64)],
        at: usize,
        cost: f64,
        remaining: usize,
        best: &mut [f64],
    ) {
        if cost < best[at] {
            best[at] = cost;
        }
        if remaining == 0 {
            return;
        }
        for &(from, to, w) in edges {
            if from == at {
                walk(edges, to, cost + w, remaining - 1, best);
            }
        }
    }

    (0..n)
        .map(|src| {
            let mut best = vec![f64::INFINITY; n];
            walk(edges, src, 0.0, max_len, &mut best);
            best
        })
        .collect()
}

#[test]
fn shortest_paths_match_brute_force() {
    let edges = [
        (0, 1, 4.0),
        (0, 2, 1.0),
        (2, 1, 2.0),
        (1, 3, 1.0),
        (2, 3, 5.0),
        (3, 4, 3.0),
        (4, 0, 2.0),
        (1, 4, 7.0),
    ];
    let n = 5;
    let adj = weighted_adjacency(n, &edges).unwrap();
    for max_len in 0..=4 {
        let fast = shortest_paths_up_to(&adj, max_len).unwrap();
        let slow = brute_force_shortest(&edges, n, max_len as usize);
        assert_eq!(fast.to_rows(), slow, "max_len = {max_len}");
    }
}

// ============================================================
// HMM forward pass
// ============================================================

fn chain() -> (Vec<Vec<f64>>, Vec<[f64; 2]>, Vec<f64>) {
    let transition = vec![
        vec![0.6, 0.3, 0.1],
        vec![0.2, 0.5, 0.3],
        vec![0.25, 0.25, 0.5],
    ];
    // emission[state] = [P(x), P(y)]
    let emission = vec![[0.7, 0.3], [0.1, 0.9], [0.5, 0.5]];
    let initial = vec![0.5, 0.3, 0.2];
    (transition, emission, initial)
}

fn chain_hmm() -> Hmm<Probability, char> {
    let (transition, emission, initial) = chain();
    let mut by_obs = IndexMap::new();
    by_obs.insert('x', emission.iter().map(|e| e[0]).collect());
    by_obs.insert('y', emission.iter().map(|e| e[1]).collect());
    Hmm::from_emission_vectors(
        Probability,
        Matrix::from_rows(transition).unwrap(),
        by_obs,
        initial,
    )
    .unwrap()
}

/// Sum over every hidden state sequence, with the forward pass's trailing
/// transition into the all-one final vector.
fn enumerate(observations: &[usize]) -> f64 {
    let (transition, emission, initial) = chain();
    let n = initial.len();
    let len = observations.len();
    let mut total = 0.0;
    for code in 0..n.pow(len as u32) {
        let states: Vec<usize> = (0..len).map(|t| code / n.pow(t as u32) % n).collect();
        let mut p = initial[states[0]];
        for t in 0..len {
            p *= emission[states[t]][observations[t]];
            if t + 1 < len {
                p *= transition[states[t]][states[t + 1]];
            }
        }
        p *= transition[states[len - 1]].iter().sum::<f64>();
        total += p;
    }
    total
}

#[test]
fn forward_matches_enumeration() {
    let hmm = chain_hmm();
    for word in ["x", "yx", "xyy", "yxyx"] {
        let codes: Vec<usize> = word.chars().map(|c| usize::from(c == 'y')).collect();
        let forward = hmm.forward(word.chars()).unwrap();
        let expected = enumerate(&codes);
        assert!((forward - expected).abs() < 1e-12, "{word}: {forward} vs {expected}");
    }
}

#[test]
fn viterbi_in_log_space() {
    let (transition, emission, initial) = chain();
    let ln = |rows: Vec<Vec<f64>>| -> Vec<Vec<f64>> {
        rows.into_iter().map(|r| r.into_iter().map(f64::ln).collect()).collect()
    };
    let mut by_obs = IndexMap::new();
    by_obs.insert('x', emission.iter().map(|e| e[0].ln()).collect());
    by_obs.insert('y', emission.iter().map(|e| e[1].ln()).collect());
    let hmm = Hmm::from_emission_vectors(
        MaxPlus,
        Matrix::from_rows(ln(transition.clone())).unwrap(),
        by_obs,
        initial.iter().map(|p| p.ln()).collect(),
    )
    .unwrap()
    .with_final(vec![0.0; 3])
    .unwrap();

    // best single path for "xx": brute force over 3 × 3 sequences
    let mut best = f64::NEG_INFINITY;
    for s0 in 0..3 {
        for s1 in 0..3 {
            let trailing = transition[s1].iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let p = initial[s0] * emission[s0][0] * transition[s0][s1] * emission[s1][0] * trailing;
            best = best.max(p);
        }
    }
    let score = hmm.forward("xx".chars()).unwrap();
    assert!((score - best.ln()).abs() < 1e-12);
}

// ============================================================
// Automaton product
// ============================================================

fn single_state(weights: &[(char, u64)], init: u64, fin: u64) -> WeightedAutomaton<NatSemiring, char> {
    let delta = weights
        .iter()
        .map(|&(c, w)| (c, Matrix::from_rows(vec![vec![w]]).unwrap()))
        .collect();
    WeightedAutomaton::new(NatSemiring, vec![init], vec![fin], delta).unwrap()
}

#[test]
fn product_weights_are_hand_computed() {
    // A: two states, `a` has weight 2 on 0 -> 0 and 1 on 0 -> 1, `b` loops
    // on 1 with weight 3
    let mut delta = IndexMap::new();
    delta.insert('a', Matrix::from_rows(vec![vec![2, 1], vec![0, 0]]).unwrap());
    delta.insert('b', Matrix::from_rows(vec![vec![0, 0], vec![0, 3]]).unwrap());
    let a = WeightedAutomaton::new(NatSemiring, vec![1, 0], vec![1, 1], delta).unwrap();
    let b = single_state(&[('a', 5), ('b', 7)], 2, 1);

    // A("ab") = 1·3 = 3, B("ab") = 2·5·7 = 70
    assert_eq!(a.run("ab".chars()).unwrap(), 3);
    assert_eq!(b.run("ab".chars()).unwrap(), 70);

    let product = a.product(&b, &['a', 'b']).unwrap();
    assert_eq!(product.num_states(), 2);
    assert_eq!(product.init(), &[2u64, 0]);
    assert_eq!(product.final_weights(), &[1u64, 1]);
    assert_eq!(product.transition(&'a').unwrap().to_rows(), vec![vec![10u64, 5], vec![0, 0]]);
    assert_eq!(product.run("ab".chars()).unwrap(), 210);
    // A("aa") = 2·2 + 2·1 = 6, B("aa") = 50
    assert_eq!(product.run("aa".chars()).unwrap(), 300);
}

#[test]
fn product_over_regexes_intersects() {
    let alphabet = ['a', 'b'];
    let has_aa = compile_regex_to_wa("(a|b)*aa(a|b)*", &alphabet).unwrap();
    let ends_b = compile_regex_to_wa("(a|b)*b", &alphabet).unwrap();
    let both = has_aa.product(&ends_b, &alphabet).unwrap();

    assert!(both.accepts("baab".chars()).unwrap());
    assert!(!both.accepts("baa".chars()).unwrap());
    assert!(!both.accepts("abab".chars()).unwrap());
}

// ============================================================
// Regex front door
// ============================================================

#[test]
fn regex_with_options_and_alphabet() {
    let alphabet: Alphabet<char> = "0123456789-".into();
    let options = RegexOptions::default().with_max_nesting(4);
    let re = Regex::with_options("[0-9]+(-[0-9]+)?", &alphabet, &options).unwrap();
    assert!(re.is_match("2024").unwrap());
    assert!(re.is_match("12-34").unwrap());
    assert!(!re.is_match("12-").unwrap());

    let err = Regex::with_options("(((((1)))))", &alphabet, &options).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn matrix_serializes_with_shape() {
    let m = Matrix::from_rows(vec![vec![1u64, 2], vec![3, 4]]).unwrap();
    let json = serde_json::to_string(&m).unwrap();
    assert_eq!(json, r#"{"rows":2,"cols":2,"data":[1,2,3,4]}"#);
    let back: Matrix<u64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

#[test]
fn matrix_rejects_short_data() {
    let err = serde_json::from_str::<Matrix<bool>>(r#"{"rows":2,"cols":2,"data":[true]}"#)
        .unwrap_err();
    assert!(err.to_string().contains("matrix data: expected length 4, found 1"), "{err}");

    // a well-formed transition matrix still loads and runs
    let a: Matrix<bool> =
        serde_json::from_str(r#"{"rows":1,"cols":1,"data":[true]}"#).unwrap();
    let mut delta = IndexMap::new();
    delta.insert('a', a);
    let wa = WeightedAutomaton::new(wfa::semiring::BoolSemiring, vec![true], vec![true], delta)
        .unwrap();
    assert!(wa.accepts("aa".chars()).unwrap());
}
