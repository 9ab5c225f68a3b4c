//! Regex syntax tree, stored as an arena of nodes addressed by index.
//!
//! Children are always allocated before their parents. The `+` and `?`
//! rewrites reuse the operand's node, so the arena is a DAG: a consumer that
//! needs one copy per occurrence (Thompson construction) must walk it as a
//! tree.

use std::fmt;

/// Index of a node in a [`RegexAst`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A set of characters given as inclusive code-point ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    ranges: Vec<(char, char)>,
}

impl CharSet {
    /// Add the single character `c`.
    pub fn push_char(&mut self, c: char) {
        self.ranges.push((c, c));
    }

    /// Add every character from `start` to `end` inclusive.
    pub fn push_range(&mut self, start: char, end: char) {
        self.ranges.push((start, end));
    }

    pub fn contains(&self, c: char) -> bool {
        self.ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The ranges as written, in order.
    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }
}

/// One regex construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// The empty word.
    Eps,
    /// A literal character.
    Lit(char),
    /// `[...]`
    Class(CharSet),
    /// `[^...]`
    NClass(CharSet),
    /// `.`, any symbol of the alphabet.
    Dot,
    /// `l r`
    Concat(NodeId, NodeId),
    /// `l | r`
    Alt(NodeId, NodeId),
    /// `inner*`
    Star(NodeId),
}

/// A parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexAst {
    nodes: Vec<Node>,
    root: NodeId,
}

impl RegexAst {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node stored at `id`.
    ///
    /// # Panics
    /// If `id` came from a different tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Number of distinct nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Append-only node storage used while parsing.
#[derive(Debug, Default)]
pub(crate) struct AstBuilder {
    nodes: Vec<Node>,
}

impl AstBuilder {
    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn finish(self, root: NodeId) -> RegexAst {
        RegexAst {
            nodes: self.nodes,
            root,
        }
    }
}

impl fmt::Display for RegexAst {
    /// Fully parenthesised rendering, mostly useful in test failures.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece {
            Node(NodeId),
            Text(&'static str),
        }

        let mut stack = vec![Piece::Node(self.root)];
        while let Some(piece) = stack.pop() {
            let id = match piece {
                Piece::Node(id) => id,
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
            };
            match self.node(id) {
                Node::Eps => f.write_str("ε")?,
                Node::Lit(c) => write!(f, "{c}")?,
                Node::Dot => f.write_str(".")?,
                Node::Class(set) | Node::NClass(set) => {
                    f.write_str("[")?;
                    if matches!(self.node(id), Node::NClass(_)) {
                        f.write_str("^")?;
                    }
                    for &(lo, hi) in set.ranges() {
                        if lo == hi {
                            write!(f, "{lo}")?;
                        } else {
                            write!(f, "{lo}-{hi}")?;
                        }
                    }
                    f.write_str("]")?;
                }
                Node::Concat(l, r) => {
                    stack.extend([Piece::Text(")"), Piece::Node(*r), Piece::Node(*l)]);
                    f.write_str("(")?;
                }
                Node::Alt(l, r) => {
                    stack.extend([
                        Piece::Text(")"),
                        Piece::Node(*r),
                        Piece::Text("|"),
                        Piece::Node(*l),
                    ]);
                    f.write_str("(")?;
                }
                Node::Star(inner) => {
                    stack.extend([Piece::Text(")*"), Piece::Node(*inner)]);
                    f.write_str("(")?;
                }
            }
        }
        Ok(())
    }
}
