//! Query tree to iterator tree translation
//!
//! Compilation validates each node against the attribute rules for its
//! kind and fails fast on the first violation. TERM leaves are expanded
//! over the requested shard range here, so the leaf factory only ever
//! sees a single shard.

use crate::error::MurexError;
use crate::index::path;
use crate::index::shard::Shard;
use crate::query::ast::{QueryKind, QuerySpec};
use crate::query::iter::{AndIter, AndThenIter, DocIter, OrIter};
use crate::Result;

/// Compile `spec` into an iterator tree over `shards`.
///
/// `make_term` builds a leaf over one shard; tag keys and values are
/// normalized before it is called. A multi-shard range fans each TERM
/// node out into an OR of per-shard leaves; a single-shard range uses
/// the leaf directly.
pub fn compile<F>(spec: &QuerySpec, shards: &[Shard], make_term: &mut F) -> Result<DocIter>
where
    F: FnMut(&Shard, &str, &str) -> Result<DocIter>,
{
    match spec.kind {
        QueryKind::Term => compile_term(spec, shards, make_term),
        QueryKind::And => compile_and(spec, shards, make_term),
        QueryKind::Or => compile_or(spec, shards, make_term),
        QueryKind::AndThen => compile_and_then(spec, shards, make_term),
    }
}

fn invalid(kind: QueryKind, reason: impl Into<String>) -> MurexError {
    MurexError::InvalidQuery {
        kind: kind.as_str(),
        reason: reason.into(),
    }
}

fn compile_term<F>(spec: &QuerySpec, shards: &[Shard], make_term: &mut F) -> Result<DocIter>
where
    F: FnMut(&Shard, &str, &str) -> Result<DocIter>,
{
    if !spec.sub.is_empty() || spec.not.is_some() || spec.delta.is_some() {
        return Err(invalid(spec.kind, "only tag and value are allowed"));
    }
    let tag = path::normalize(spec.tag.as_deref().unwrap_or(""));
    if tag.is_empty() {
        return Err(invalid(spec.kind, "missing tag"));
    }
    let value = path::normalize(spec.value.as_deref().unwrap_or(""));

    let mut leaves = Vec::with_capacity(shards.len());
    for shard in shards {
        leaves.push(make_term(shard, &tag, &value)?);
    }
    if leaves.len() == 1 {
        return Ok(leaves.remove(0));
    }
    Ok(DocIter::Or(OrIter::new(leaves)))
}

fn compile_sub<F>(spec: &QuerySpec, shards: &[Shard], make_term: &mut F) -> Result<Vec<DocIter>>
where
    F: FnMut(&Shard, &str, &str) -> Result<DocIter>,
{
    spec.sub
        .iter()
        .map(|sub| compile(sub, shards, make_term))
        .collect()
}

fn compile_and<F>(spec: &QuerySpec, shards: &[Shard], make_term: &mut F) -> Result<DocIter>
where
    F: FnMut(&Shard, &str, &str) -> Result<DocIter>,
{
    if spec.delta.is_some() {
        return Err(invalid(spec.kind, "delta is not allowed"));
    }
    let mut and = AndIter::new(compile_sub(spec, shards, make_term)?);
    if let Some(not) = spec.not.as_deref() {
        and = and.with_exclusion(compile(not, shards, make_term)?);
    }
    Ok(DocIter::And(and))
}

fn compile_or<F>(spec: &QuerySpec, shards: &[Shard], make_term: &mut F) -> Result<DocIter>
where
    F: FnMut(&Shard, &str, &str) -> Result<DocIter>,
{
    if spec.not.is_some() || spec.delta.is_some() {
        return Err(invalid(spec.kind, "not and delta are not allowed"));
    }
    Ok(DocIter::Or(OrIter::new(compile_sub(
        spec, shards, make_term,
    )?)))
}

fn compile_and_then<F>(spec: &QuerySpec, shards: &[Shard], make_term: &mut F) -> Result<DocIter>
where
    F: FnMut(&Shard, &str, &str) -> Result<DocIter>,
{
    if spec.not.is_some() {
        return Err(invalid(spec.kind, "not is not allowed"));
    }
    if spec.sub.len() != 2 {
        return Err(invalid(spec.kind, "requires exactly 2 sub queries"));
    }
    let mut children = compile_sub(spec, shards, make_term)?;
    let then = children.remove(1);
    let first = children.remove(0);
    Ok(DocIter::AndThen(AndThenIter::new(
        first,
        then,
        spec.delta.unwrap_or(0),
    )))
}
