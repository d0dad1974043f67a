//! Term normalization and on-disk layout of posting files
//!
//! Layout: `<root>/<shard>/<bucket>/<tag_key>/<tag_value>`, where the
//! bucket is a hash prefix capping how many terms land in one
//! directory. Distinct normalized `(tag_key, tag_value)` pairs always
//! map to distinct files.

use std::path::{Path, PathBuf};

use crate::index::shard::Shard;

const BUCKETS: u32 = 4096;

/// Lowercase ASCII fold, then drop anything outside `[a-z0-9._:/-]`.
/// Idempotent; applied before both indexing and querying so only the
/// normalized form ever appears on disk.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| {
            let c = c.to_ascii_lowercase();
            match c {
                'a'..='z' | '0'..='9' | '.' | '_' | ':' | '/' | '-' => Some(c),
                _ => None,
            }
        })
        .collect()
}

fn bucket(tag_key: &str, tag_value: &str) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(tag_key.as_bytes());
    hasher.update(b":");
    hasher.update(tag_value.as_bytes());
    hasher.finalize() % BUCKETS
}

/// Escape a normalized string into a single path segment.
///
/// `/` is in the safe set but would split the segment, and dot-only
/// names collide with directory entries, so both are percent-encoded.
/// The encoding is injective: distinct inputs give distinct segments.
fn segment(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2f"),
            _ => out.push(c),
        }
    }
    match out.as_str() {
        "" => "%empty".to_string(),
        "." => "%2e".to_string(),
        ".." => "%2e%2e".to_string(),
        _ => out,
    }
}

/// Path of the posting file for one term in one shard.
pub fn posting_file(root: &Path, shard: &Shard, tag_key: &str, tag_value: &str) -> PathBuf {
    root.join(shard.to_string())
        .join(format!("b{:03x}", bucket(tag_key, tag_value)))
        .join(segment(tag_key))
        .join(segment(tag_value))
}
