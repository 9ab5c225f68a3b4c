//! Recursive-descent regex parser.
//!
//! Grammar, one left-to-right pass with a single character of lookahead
//! (two inside classes, to recognise ranges):
//!
//! ```text
//! Alt    := Concat ('|' Concat)*
//! Concat := Repeat+
//! Repeat := Atom ('*' | '+' | '?')*
//! Atom   := '(' Alt ')' | Class | '.' | '\' any | literal
//! Class  := '[' '^'? Item+ ']'
//! Item   := Char ('-' Char)?
//! ```
//!
//! `x+` becomes `Concat(x, Star(x))` and `x?` becomes `Alt(Eps, x)`, so later
//! stages only see the eight core constructs. Only group nesting recurses;
//! its depth is bounded by [`RegexOptions::max_nesting`].

use super::RegexOptions;
use super::ast::{AstBuilder, CharSet, Node, NodeId, RegexAst};
use crate::error::{ParseError, ParseErrorKind};
use tracing::debug;

/// Parse `pattern` with default options.
pub fn parse(pattern: &str) -> Result<RegexAst, ParseError> {
    parse_with_options(pattern, &RegexOptions::default())
}

/// Parse `pattern`.
pub fn parse_with_options(pattern: &str, options: &RegexOptions) -> Result<RegexAst, ParseError> {
    let mut parser = Parser {
        chars: pattern.chars().collect(),
        pos: 0,
        depth: 0,
        max_nesting: options.max_nesting,
        builder: AstBuilder::default(),
    };
    let root = parser.parse_alt()?;
    if let Some(c) = parser.peek() {
        return Err(ParseError::new(parser.pos, ParseErrorKind::TrailingInput(c)));
    }
    let ast = parser.builder.finish(root);
    debug!(pattern, nodes = ast.len(), "parsed regex");
    Ok(ast)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
    max_nesting: usize,
    builder: AstBuilder,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn error(&self, position: usize, kind: ParseErrorKind) -> ParseError {
        ParseError::new(position, kind)
    }

    fn parse_alt(&mut self) -> Result<NodeId, ParseError> {
        let mut node = self.parse_concat()?;
        while self.peek() == Some('|') {
            self.pos += 1;
            let right = self.parse_concat()?;
            node = self.builder.push(Node::Alt(node, right));
        }
        Ok(node)
    }

    fn parse_concat(&mut self) -> Result<NodeId, ParseError> {
        let mut node = self.parse_repeat()?;
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            let right = self.parse_repeat()?;
            node = self.builder.push(Node::Concat(node, right));
        }
        Ok(node)
    }

    fn parse_repeat(&mut self) -> Result<NodeId, ParseError> {
        let mut node = self.parse_atom()?;
        loop {
            node = match self.peek() {
                Some('*') => self.builder.push(Node::Star(node)),
                Some('+') => {
                    let star = self.builder.push(Node::Star(node));
                    self.builder.push(Node::Concat(node, star))
                }
                Some('?') => {
                    let eps = self.builder.push(Node::Eps);
                    self.builder.push(Node::Alt(eps, node))
                }
                _ => break,
            };
            self.pos += 1;
        }
        Ok(node)
    }

    fn parse_atom(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        let Some(c) = self.bump() else {
            return Err(self.error(start, ParseErrorKind::UnexpectedEnd));
        };
        match c {
            '(' => self.parse_group(start),
            '[' => self.parse_class(start),
            '.' => Ok(self.builder.push(Node::Dot)),
            '\\' => {
                let escaped = self.parse_escape(start)?;
                Ok(self.builder.push(Node::Lit(escaped)))
            }
            ')' | '|' | '*' | '+' | '?' => {
                Err(self.error(start, ParseErrorKind::UnexpectedChar(c)))
            }
            _ => Ok(self.builder.push(Node::Lit(c))),
        }
    }

    /// After the opening `(`.
    fn parse_group(&mut self, start: usize) -> Result<NodeId, ParseError> {
        if self.depth >= self.max_nesting {
            return Err(self.error(
                start,
                ParseErrorKind::NestingTooDeep {
                    limit: self.max_nesting,
                },
            ));
        }
        self.depth += 1;
        let inner = self.parse_alt()?;
        self.depth -= 1;
        match self.bump() {
            Some(')') => Ok(inner),
            _ => Err(self.error(self.pos, ParseErrorKind::UnclosedGroup)),
        }
    }

    /// After a backslash at `start`.
    fn parse_escape(&mut self, start: usize) -> Result<char, ParseError> {
        self.bump()
            .ok_or_else(|| self.error(start, ParseErrorKind::DanglingEscape))
    }

    /// After the opening `[` at `start`.
    fn parse_class(&mut self, start: usize) -> Result<NodeId, ParseError> {
        let negated = self.peek() == Some('^');
        if negated {
            self.pos += 1;
        }

        let mut set = CharSet::default();
        loop {
            let item_start = self.pos;
            let first = match self.bump() {
                None => return Err(self.error(start, ParseErrorKind::UnterminatedClass)),
                Some(']') if set.is_empty() => {
                    return Err(self.error(start, ParseErrorKind::EmptyClass));
                }
                Some(']') => break,
                Some('\\') => self.parse_escape(item_start)?,
                Some(c) => c,
            };

            let is_range = self.peek() == Some('-')
                && self.peek_second().is_some_and(|next| next != ']');
            if !is_range {
                set.push_char(first);
                continue;
            }

            self.pos += 1;
            let last_start = self.pos;
            let last = match self.bump() {
                Some('\\') => self.parse_escape(last_start)?,
                Some(c) => c,
                None => return Err(self.error(start, ParseErrorKind::UnterminatedClass)),
            };
            if first > last {
                return Err(self.error(
                    item_start,
                    ParseErrorKind::InvalidRange {
                        start: first,
                        end: last,
                    },
                ));
            }
            set.push_range(first, last);
        }

        let node = if negated {
            Node::NClass(set)
        } else {
            Node::Class(set)
        };
        Ok(self.builder.push(node))
    }
}
