//! Error types shared by the matrix, automaton and regex layers.
//!
//! Every failure in this crate is local and deterministic: retrying the same
//! call with the same inputs fails the same way.

use thiserror::Error;

/// Malformed regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    /// Character offset (in `char`s) where the problem was detected.
    pub position: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }
}

/// The reason a pattern was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A backslash was the last character of the pattern.
    #[error("dangling escape at end of pattern")]
    DanglingEscape,

    /// A `[` was never closed.
    #[error("unterminated character class")]
    UnterminatedClass,

    /// `[]` or `[^]`.
    #[error("empty character class")]
    EmptyClass,

    /// A range such as `z-a` whose start is above its end.
    #[error("invalid range {start:?}-{end:?}")]
    InvalidRange {
        /// Lower bound as written.
        start: char,
        /// Upper bound as written.
        end: char,
    },

    /// A special character where an atom was expected.
    #[error("unexpected {0:?}, expected an atom")]
    UnexpectedChar(char),

    /// The pattern ended where an atom was expected.
    #[error("unexpected end of pattern, expected an atom")]
    UnexpectedEnd,

    /// A `(` was never closed.
    #[error("missing closing parenthesis")]
    UnclosedGroup,

    /// Input left over after a complete alternation, e.g. an unmatched `)`.
    #[error("trailing input starting with {0:?}")]
    TrailingInput(char),

    /// Groups nested deeper than [`RegexOptions::max_nesting`](crate::regex::RegexOptions).
    #[error("groups nested deeper than {limit}")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },
}

/// Matrix or vector dimensions that do not fit the requested operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Inner dimensions of a product disagree.
    #[error("cannot multiply {left_rows}x{left_cols} by {right_rows}x{right_cols}")]
    MulMismatch {
        /// Rows of the left operand.
        left_rows: usize,
        /// Columns of the left operand.
        left_cols: usize,
        /// Rows of the right operand.
        right_rows: usize,
        /// Columns of the right operand.
        right_cols: usize,
    },

    /// Elementwise operation on matrices of different sizes.
    #[error("cannot combine {left_rows}x{left_cols} with {right_rows}x{right_cols}")]
    AddMismatch {
        /// Rows of the left operand.
        left_rows: usize,
        /// Columns of the left operand.
        left_cols: usize,
        /// Rows of the right operand.
        right_rows: usize,
        /// Columns of the right operand.
        right_cols: usize,
    },

    /// The operation needs a square matrix.
    #[error("expected a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },

    /// A row of nested input has the wrong length.
    #[error("row {row} has {found} entries, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// A vector (or matrix side) has the wrong length.
    #[error("{what}: expected length {expected}, found {found}")]
    LengthMismatch {
        /// Which operand was wrong.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// A matrix that must be diagonal has a non-zero entry off the diagonal.
    #[error("expected a diagonal matrix, found a non-zero entry at ({row}, {col})")]
    NotDiagonal {
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
    },

    /// A vertex index outside `0..n`.
    #[error("index {index} out of bounds for size {size}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of vertices.
        size: usize,
    },
}

/// A symbol or observation with no entry in the per-symbol map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no transition matrix for symbol {symbol}")]
pub struct LookupError {
    /// Debug rendering of the missing symbol.
    pub symbol: String,
}

impl LookupError {
    pub(crate) fn missing<T: std::fmt::Debug + ?Sized>(symbol: &T) -> Self {
        Self {
            symbol: format!("{symbol:?}"),
        }
    }
}

/// Any error produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// See [`ParseError`].
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// See [`ShapeError`].
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// See [`LookupError`].
    #[error(transparent)]
    Lookup(#[from] LookupError),
}
