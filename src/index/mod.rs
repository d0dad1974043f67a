//! Per-day inverted index and the engine value tying it together
//!
//! `EventIndex` owns the index root and the append handle cache. Reads
//! take no locks: posting files only grow, and a reader that races a
//! writer sees a consistent prefix. Appends go through one writer and
//! are serialized by its lock.

pub mod path;
pub mod postings;
pub mod shard;
pub mod writer;

use std::path::PathBuf;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::debug;

use crate::config::IndexConfig;
use crate::models::{Hit, SearchRequest, SearchResponse};
use crate::query::ast::QuerySpec;
use crate::query::compiler;
use crate::query::iter::{DocIter, TermIter, NO_MORE};
use crate::query::DocId;
use crate::Result;
use shard::Shard;
use writer::InvertedWriter;

/// Long-lived engine over one index root
pub struct EventIndex {
    root: PathBuf,
    writer: Mutex<InvertedWriter>,
}

impl EventIndex {
    pub fn new(config: IndexConfig) -> Self {
        let writer = InvertedWriter::new(&config.index_root, config.max_open_descriptors);
        Self {
            root: config.index_root,
            writer: Mutex::new(writer),
        }
    }

    /// Record that `doc_id` carries `(tag_key, tag_value)` on `day`.
    /// Ids must be appended in ascending order per term; the key and
    /// value are normalized before they reach disk.
    pub fn append(&self, day: Shard, tag_key: &str, tag_value: &str, doc_id: DocId) -> Result<()> {
        let tag_key = path::normalize(tag_key);
        let tag_value = path::normalize(tag_value);
        self.writer.lock().append(&day, &tag_key, &tag_value, doc_id)
    }

    /// Close the writer. Reads keep working; further appends fail.
    pub fn close(&self) {
        self.writer.lock().close();
    }

    /// Compile `spec` into an iterator tree over `shards`, materializing
    /// one posting slice per `(shard, term)` leaf.
    pub fn compile(&self, spec: &QuerySpec, shards: &[Shard]) -> Result<DocIter> {
        compiler::compile(spec, shards, &mut |shard, tag_key, tag_value| {
            let file = path::posting_file(&self.root, shard, tag_key, tag_value);
            let postings = postings::read_postings(&file, -1)?;
            let label = format!("{shard}:{tag_key}:{tag_value}");
            Ok(DocIter::Term(TermIter::new(label, postings)))
        })
    }

    /// Run one search: compile over the requested day range, walk the
    /// tree once in ascending doc-id order, count every match and keep
    /// the first `size` hits with the root iterator's score.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let start = Instant::now();
        let from = Shard::parse(&request.from)?;
        let to = Shard::parse(&request.to)?;
        let shards = shard::day_range(from, to)?;

        let mut root = self.compile(&request.query, &shards)?;
        let mut hits = Vec::new();
        let mut total = 0u64;
        while root.next() != NO_MORE {
            total += 1;
            if hits.len() < request.size {
                hits.push(Hit {
                    id: root.current(),
                    score: root.score(),
                });
            }
        }
        debug!(total, query = %root.describe(), "search complete");

        Ok(SearchResponse {
            total,
            hits,
            took_us: start.elapsed().as_micros() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_index() -> (TempDir, EventIndex) {
        let dir = TempDir::new().unwrap();
        let index = EventIndex::new(IndexConfig::new(dir.path()));
        (dir, index)
    }

    fn day(s: &str) -> Shard {
        Shard::parse(s).unwrap()
    }

    fn request(query: QuerySpec, from: &str, to: &str) -> SearchRequest {
        SearchRequest {
            query,
            size: 10,
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn test_single_day_term_search() {
        let (_dir, index) = test_index();
        for doc in [3, 6, 12] {
            index.append(day("2021-01-01"), "city", "sofia", doc).unwrap();
        }
        let response = index
            .search(&request(QuerySpec::term("city", "sofia"), "2021-01-01", "2021-01-01"))
            .unwrap();
        assert_eq!(response.total, 3);
        let ids: Vec<DocId> = response.hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![3, 6, 12]);
    }

    #[test]
    fn test_multi_day_fan_out() {
        let (_dir, index) = test_index();
        index.append(day("2021-01-01"), "city", "sofia", 1).unwrap();
        index.append(day("2021-01-02"), "city", "sofia", 5).unwrap();
        index.append(day("2021-01-03"), "city", "sofia", 9).unwrap();

        let response = index
            .search(&request(QuerySpec::term("city", "sofia"), "2021-01-01", "2021-01-03"))
            .unwrap();
        let ids: Vec<DocId> = response.hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 5, 9]);

        // narrowing the range drops the other shards
        let response = index
            .search(&request(QuerySpec::term("city", "sofia"), "2021-01-02", "2021-01-02"))
            .unwrap();
        let ids: Vec<DocId> = response.hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![5]);
    }

    #[test]
    fn test_boolean_search_with_exclusion() {
        let (_dir, index) = test_index();
        let d = day("2021-01-01");
        for doc in [1, 2, 3, 4] {
            index.append(d, "event_type", "click", doc).unwrap();
        }
        for doc in [2, 4] {
            index.append(d, "bot", "true", doc).unwrap();
        }
        let spec = QuerySpec::and(vec![QuerySpec::term("event_type", "click")])
            .with_not(QuerySpec::term("bot", "true"));
        let response = index.search(&request(spec, "2021-01-01", "2021-01-01")).unwrap();
        let ids: Vec<DocId> = response.hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_search_normalizes_terms() {
        let (_dir, index) = test_index();
        index.append(day("2021-01-01"), "City", "SOFIA!", 7).unwrap();
        let response = index
            .search(&request(QuerySpec::term("city", "sofia"), "2021-01-01", "2021-01-01"))
            .unwrap();
        assert_eq!(response.total, 1);
    }

    #[test]
    fn test_size_caps_hits_not_total() {
        let (_dir, index) = test_index();
        let d = day("2021-01-01");
        for doc in 0..20 {
            index.append(d, "k", "v", doc).unwrap();
        }
        let mut req = request(QuerySpec::term("k", "v"), "2021-01-01", "2021-01-01");
        req.size = 5;
        let response = index.search(&req).unwrap();
        assert_eq!(response.total, 20);
        assert_eq!(response.hits.len(), 5);

        // count-only request
        req.size = 0;
        let response = index.search(&req).unwrap();
        assert_eq!(response.total, 20);
        assert!(response.hits.is_empty());
    }

    #[test]
    fn test_search_missing_term_is_empty() {
        let (_dir, index) = test_index();
        let response = index
            .search(&request(QuerySpec::term("no", "thing"), "2021-01-01", "2021-01-02"))
            .unwrap();
        assert_eq!(response.total, 0);
        assert!(response.hits.is_empty());
    }

    #[test]
    fn test_search_rejects_bad_dates() {
        let (_dir, index) = test_index();
        let req = request(QuerySpec::term("a", "b"), "not-a-date", "2021-01-01");
        assert!(index.search(&req).is_err());

        let req = request(QuerySpec::term("a", "b"), "2021-01-02", "2021-01-01");
        assert!(index.search(&req).is_err());
    }

    #[test]
    fn test_append_after_close_fails() {
        let (_dir, index) = test_index();
        index.append(day("2021-01-01"), "k", "v", 1).unwrap();
        index.close();
        assert!(index.append(day("2021-01-01"), "k", "v", 2).is_err());
        // reads still work after close
        let response = index
            .search(&request(QuerySpec::term("k", "v"), "2021-01-01", "2021-01-01"))
            .unwrap();
        assert_eq!(response.total, 1);
    }

    #[test]
    fn test_and_then_across_terms() {
        let (_dir, index) = test_index();
        let d = day("2021-01-01");
        for doc in [0, 10, 20] {
            index.append(d, "event_type", "view", doc).unwrap();
        }
        for doc in [5, 11, 25] {
            index.append(d, "event_type", "purchase", doc).unwrap();
        }
        let spec = QuerySpec::and_then(
            QuerySpec::term("event_type", "view"),
            QuerySpec::term("event_type", "purchase"),
            5,
        );
        let response = index.search(&request(spec, "2021-01-01", "2021-01-01")).unwrap();
        let ids: Vec<DocId> = response.hits.iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![0, 10, 20]);
    }
}
