//! Query layer: structured tree, compiler, and iterator algebra

pub mod ast;
pub mod compiler;
pub mod iter;

pub use ast::{QueryKind, QuerySpec};
pub use compiler::compile;
pub use iter::{DocId, DocIter, NO_MORE, NOT_READY};
