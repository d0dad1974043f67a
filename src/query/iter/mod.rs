//! Sorted-advance iterators over posting lists
//!
//! Every iterator steps through document ids in strictly ascending order
//! and exposes the same protocol: `current`, `next`, `advance(target)`,
//! `score`, `reset`, `describe`. Composite iterators own their children
//! and compose recursively. The set of iterators is closed, so dispatch
//! is a `match` and the hot `next`/`advance` path never allocates.

use std::fmt;

pub mod and;
pub mod and_then;
pub mod or;
pub mod term;

pub use and::AndIter;
pub use and_then::AndThenIter;
pub use or::OrIter;
pub use term::TermIter;

/// Document identifier. Monotonically increasing within one shard;
/// sort order is numeric ascending.
pub type DocId = i64;

/// Sentinel for an iterator that has not produced anything yet.
/// Strictly less than any real document id.
pub const NOT_READY: DocId = -1;

/// Sentinel for an exhausted iterator. Strictly greater than any real
/// document id.
pub const NO_MORE: DocId = DocId::MAX;

/// One node of a compiled query: a leaf over a single posting list or a
/// boolean combination of other nodes.
#[derive(Debug)]
pub enum DocIter {
    Term(TermIter),
    Or(OrIter),
    And(AndIter),
    AndThen(AndThenIter),
}

impl DocIter {
    /// The id most recently returned, `NOT_READY` before the first movement.
    pub fn current(&self) -> DocId {
        match self {
            DocIter::Term(q) => q.current(),
            DocIter::Or(q) => q.current(),
            DocIter::And(q) => q.current(),
            DocIter::AndThen(q) => q.current(),
        }
    }

    /// Advance past the current position to the next matching id,
    /// or `NO_MORE`.
    pub fn next(&mut self) -> DocId {
        match self {
            DocIter::Term(q) => q.next(),
            DocIter::Or(q) => q.next(),
            DocIter::And(q) => q.next(),
            DocIter::AndThen(q) => q.next(),
        }
    }

    /// Reposition to the smallest matching id >= `target`. Never moves
    /// the iterator backwards; `advance(NO_MORE)` yields `NO_MORE`.
    pub fn advance(&mut self, target: DocId) -> DocId {
        match self {
            DocIter::Term(q) => q.advance(target),
            DocIter::Or(q) => q.advance(target),
            DocIter::And(q) => q.advance(target),
            DocIter::AndThen(q) => q.advance(target),
        }
    }

    /// Scalar quality hint for the current match.
    pub fn score(&self) -> f32 {
        match self {
            DocIter::Term(q) => q.score(),
            DocIter::Or(q) => q.score(),
            DocIter::And(q) => q.score(),
            DocIter::AndThen(q) => q.score(),
        }
    }

    /// Return to the `NOT_READY` state so the tree can be re-run.
    pub fn reset(&mut self) {
        match self {
            DocIter::Term(q) => q.reset(),
            DocIter::Or(q) => q.reset(),
            DocIter::And(q) => q.reset(),
            DocIter::AndThen(q) => q.reset(),
        }
    }

    /// Structural pretty-print for diagnostics.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DocIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocIter::Term(q) => write!(f, "{}", q.term()),
            DocIter::Or(q) => {
                write!(f, "(")?;
                for (i, child) in q.children().iter().enumerate() {
                    if i > 0 {
                        write!(f, " OR ")?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
            DocIter::And(q) => {
                write!(f, "(")?;
                for (i, child) in q.children().iter().enumerate() {
                    if i > 0 {
                        write!(f, " AND ")?;
                    }
                    write!(f, "{child}")?;
                }
                if let Some(not) = q.exclusion() {
                    write!(f, " NOT {not}")?;
                }
                write!(f, ")")
            }
            DocIter::AndThen(q) => {
                write!(f, "({} THEN {} WITHIN {})", q.first(), q.then(), q.delta())
            }
        }
    }
}
