//! Thompson construction: regex syntax tree to ε-NFA.
//!
//! Each construct contributes a fragment with one entry and one exit state:
//!
//! - `Eps`: two states joined by an ε-edge
//! - `Lit`, `Class`, `NClass`, `Dot`: two states joined by one symbol edge per
//!   matching alphabet symbol
//! - `Concat(l, r)`: ε-edge `l.accept → r.start`
//! - `Alt(l, r)`: new start and accept, ε-edges fanning out and back in
//! - `Star(x)`: new start and accept, ε-edges `start → {x.start, accept}` and
//!   `x.accept → {x.start, accept}`
//! - `Concat(x, Star(x))` sharing one operand (the parser's `x+`): `x` is
//!   built once, with a new accept and ε-edges `x.accept → {x.start, accept}`
//!
//! Every arena node is therefore built once per occurrence in the pattern
//! text, and the state count stays linear in the pattern length.
//!
//! The tree is walked with an explicit stack, so pattern nesting depth does
//! not consume call stack.

use super::ast::{Node, NodeId, RegexAst};
use crate::alphabet::Alphabet;
use crate::matrix::Matrix;
use crate::state::StateId;
use indexmap::IndexMap;
use tracing::debug;

/// An ε-NFA in adjacency-matrix form with a single start and accept state.
#[derive(Debug, Clone)]
pub struct Nfa {
    /// Number of states.
    pub n: usize,
    pub start: StateId,
    pub accept: StateId,
    /// `eps_adj[p][q]` iff there is an ε-edge `p → q`.
    pub eps_adj: Matrix<bool>,
    /// One adjacency matrix per alphabet symbol, in alphabet order.
    pub sym_adj: IndexMap<char, Matrix<bool>>,
    pub alphabet: Alphabet<char>,
}

#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: StateId,
    accept: StateId,
}

enum Task {
    /// Build the fragment for a node, or schedule its children first.
    Enter(NodeId),
    /// Children are on the fragment stack; combine them.
    Combine(NodeId),
}

#[derive(Default)]
struct Builder {
    next_state: StateId,
    eps_edges: Vec<(StateId, StateId)>,
    sym_edges: Vec<(StateId, char, StateId)>,
}

impl Builder {
    fn new_state(&mut self) -> StateId {
        let id = self.next_state;
        self.next_state += 1;
        id
    }

    fn new_fragment(&mut self) -> Fragment {
        Fragment {
            start: self.new_state(),
            accept: self.new_state(),
        }
    }

    fn eps(&mut self, from: StateId, to: StateId) {
        self.eps_edges.push((from, to));
    }

    fn symbols<'a>(&mut self, from: StateId, to: StateId, symbols: impl Iterator<Item = &'a char>) {
        self.sym_edges.extend(symbols.map(|&c| (from, c, to)));
    }
}

/// Build the Thompson NFA for `ast` over `alphabet`.
///
/// Symbols outside `alphabet` never label an edge: a literal that is not in
/// the alphabet yields a fragment with no way through.
pub fn build_nfa(ast: &RegexAst, alphabet: &Alphabet<char>) -> Nfa {
    let mut builder = Builder::default();
    let mut tasks = vec![Task::Enter(ast.root())];
    let mut fragments: Vec<Fragment> = Vec::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Enter(id) => match ast.node(id) {
                Node::Concat(l, r) | Node::Alt(l, r) => {
                    tasks.push(Task::Combine(id));
                    if !is_plus(ast, id) {
                        tasks.push(Task::Enter(*r));
                    }
                    tasks.push(Task::Enter(*l));
                }
                Node::Star(inner) => {
                    tasks.push(Task::Combine(id));
                    tasks.push(Task::Enter(*inner));
                }
                leaf => {
                    let frag = builder.new_fragment();
                    match leaf {
                        Node::Eps => builder.eps(frag.start, frag.accept),
                        Node::Lit(c) => builder.symbols(
                            frag.start,
                            frag.accept,
                            alphabet.iter().filter(|s| *s == c),
                        ),
                        Node::Class(set) => builder.symbols(
                            frag.start,
                            frag.accept,
                            alphabet.iter().filter(|s| set.contains(**s)),
                        ),
                        Node::NClass(set) => builder.symbols(
                            frag.start,
                            frag.accept,
                            alphabet.iter().filter(|s| !set.contains(**s)),
                        ),
                        Node::Dot => builder.symbols(frag.start, frag.accept, alphabet.iter()),
                        Node::Concat(..) | Node::Alt(..) | Node::Star(..) => unreachable!(),
                    }
                    fragments.push(frag);
                }
            },
            Task::Combine(id) => {
                let frag = match ast.node(id) {
                    Node::Concat(..) if is_plus(ast, id) => {
                        let inner = pop_one(&mut fragments);
                        let accept = builder.new_state();
                        builder.eps(inner.accept, inner.start);
                        builder.eps(inner.accept, accept);
                        Fragment {
                            start: inner.start,
                            accept,
                        }
                    }
                    Node::Concat(..) => {
                        let (right, left) = pop_pair(&mut fragments);
                        builder.eps(left.accept, right.start);
                        Fragment {
                            start: left.start,
                            accept: right.accept,
                        }
                    }
                    Node::Alt(..) => {
                        let (right, left) = pop_pair(&mut fragments);
                        let frag = builder.new_fragment();
                        builder.eps(frag.start, left.start);
                        builder.eps(frag.start, right.start);
                        builder.eps(left.accept, frag.accept);
                        builder.eps(right.accept, frag.accept);
                        frag
                    }
                    Node::Star(..) => {
                        let inner = pop_one(&mut fragments);
                        let frag = builder.new_fragment();
                        builder.eps(frag.start, inner.start);
                        builder.eps(frag.start, frag.accept);
                        builder.eps(inner.accept, inner.start);
                        builder.eps(inner.accept, frag.accept);
                        frag
                    }
                    _ => unreachable!("only composite nodes are combined"),
                };
                fragments.push(frag);
            }
        }
    }

    let root = pop_one(&mut fragments);
    let n = builder.next_state;

    let mut eps_adj = Matrix::filled(n, n, false);
    for (from, to) in builder.eps_edges {
        eps_adj[(from, to)] = true;
    }
    let mut sym_adj: IndexMap<char, Matrix<bool>> = alphabet
        .iter()
        .map(|&c| (c, Matrix::filled(n, n, false)))
        .collect();
    for (from, c, to) in builder.sym_edges {
        if let Some(adj) = sym_adj.get_mut(&c) {
            adj[(from, to)] = true;
        }
    }

    debug!(states = n, symbols = sym_adj.len(), "built Thompson NFA");
    Nfa {
        n,
        start: root.start,
        accept: root.accept,
        eps_adj,
        sym_adj,
        alphabet: alphabet.clone(),
    }
}

/// Whether `id` is the `Concat(x, Star(x))` node of an `x+`.
fn is_plus(ast: &RegexAst, id: NodeId) -> bool {
    matches!(ast.node(id), Node::Concat(l, r) if *ast.node(*r) == Node::Star(*l))
}

fn pop_one(fragments: &mut Vec<Fragment>) -> Fragment {
    match fragments.pop() {
        Some(frag) => frag,
        None => unreachable!("fragment stack underflow"),
    }
}

/// Pops the most recent fragment first.
fn pop_pair(fragments: &mut Vec<Fragment>) -> (Fragment, Fragment) {
    let last = pop_one(fragments);
    (last, pop_one(fragments))
}
